use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::progression;
use crate::restore;
use crate::rules::Rules;
use crate::state::{GameState, PlayerProfile};
use crate::theme::{self, Theme};

/// Key holding the GameState JSON
pub const GAME_STATE_KEY: &str = "mathquest-game-state";

/// Key holding the selected theme id (a JSON string)
pub const THEME_KEY: &str = "mathquest-theme";

// ==================== KEY-VALUE BACKENDS ====================

/// Synchronous string key-value store the game state lives in
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes land in a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Invalid(format!("unusable storage key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io { key: key.to_string(), source }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(key, e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

// ==================== GAME STORE ====================

/// Persistence boundary for the game state.
///
/// The transition methods apply the pure function from `progression`, write
/// the result, and return it. A failed write is logged and the new state is
/// still returned; `save` is the only call that surfaces storage errors.
pub struct GameStore<S: KeyValueStore> {
    store: S,
    rules: Rules,
}

impl<S: KeyValueStore> GameStore<S> {
    pub fn new(store: S, rules: Rules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load and repair the stored state; anything unreadable yields a fresh one
    pub fn load(&self, now: DateTime<Utc>) -> GameState {
        match self.read_snapshot(now) {
            Ok(state) => state,
            Err(StorageError::Missing(_)) => {
                log::info!("[STORAGE] no saved game, starting fresh");
                GameState::new(now, &self.rules)
            }
            Err(e) => {
                log::warn!("[STORAGE] discarding unreadable save: {}", e);
                GameState::new(now, &self.rules)
            }
        }
    }

    fn read_snapshot(&self, now: DateTime<Utc>) -> Result<GameState, StorageError> {
        let raw = self
            .store
            .get(GAME_STATE_KEY)?
            .ok_or_else(|| StorageError::Missing(GAME_STATE_KEY.to_string()))?;
        restore::import_snapshot(&raw, now, &self.rules)
    }

    pub fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        self.store.set(GAME_STATE_KEY, &json)
    }

    fn persist(&mut self, state: GameState) -> GameState {
        if let Err(e) = self.save(&state) {
            log::error!("[STORAGE] failed to save game: {}", e);
        }
        state
    }

    pub fn create_profile(&mut self, state: &GameState, profile: PlayerProfile) -> GameState {
        let next = progression::create_profile(state, profile);
        self.persist(next)
    }

    pub fn add_xp(&mut self, state: &GameState, amount: u32, now: DateTime<Utc>) -> GameState {
        let next = progression::add_xp(state, amount, now);
        self.persist(next)
    }

    pub fn record_answer(
        &mut self,
        state: &GameState,
        topic_id: &str,
        correct: bool,
        now: DateTime<Utc>,
    ) -> GameState {
        let next = progression::record_answer(state, topic_id, correct, now, &self.rules);
        self.persist(next)
    }

    /// Discard all progress. No undo.
    pub fn reset(&mut self, now: DateTime<Utc>) -> GameState {
        log::info!("[ADMIN] reset game state");
        let fresh = GameState::new(now, &self.rules);
        self.persist(fresh)
    }

    // -------------------- Theme --------------------

    /// Selected theme; absent, corrupt or unknown ids give the default
    pub fn load_theme(&self) -> &'static Theme {
        let raw = match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return theme::resolve(theme::DEFAULT_THEME_ID),
            Err(e) => {
                log::warn!("[STORAGE] theme unreadable: {}", e);
                return theme::resolve(theme::DEFAULT_THEME_ID);
            }
        };

        // Older clients stored the bare id rather than a JSON string
        let id = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        theme::resolve(&id)
    }

    pub fn save_theme(&mut self, theme_id: &str) -> Result<(), StorageError> {
        let json = serde_json::to_string(theme_id)?;
        self.store.set(THEME_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(io_error(key, std::io::Error::new(ErrorKind::PermissionDenied, "read-only")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_is_fresh() {
        let store = GameStore::new(MemoryStore::new(), Rules::default());
        let state = store.load(now());
        assert_eq!(state, GameState::new(now(), &Rules::default()));
        assert_eq!(state.unlocked_topic_count(), 3);
    }

    #[test]
    fn test_load_corrupt_is_fresh() {
        let mut kv = MemoryStore::new();
        kv.set(GAME_STATE_KEY, "{\"xp\": \"lots\"").unwrap();
        let store = GameStore::new(kv, Rules::default());
        assert_eq!(store.load(now()), GameState::new(now(), &Rules::default()));
    }

    #[test]
    fn test_transitions_persist() {
        let mut store = GameStore::new(MemoryStore::new(), Rules::default());
        let state = store.load(now());
        let state = store.create_profile(&state, PlayerProfile::new("Sam", 2, now()));
        let state = store.record_answer(&state, "multiplication", true, now());
        let state = store.add_xp(&state, 10, now());

        let reloaded = store.load(now());
        assert_eq!(reloaded, state);
        assert_eq!(reloaded.profile.as_ref().map(|p| p.name.as_str()), Some("Sam"));
    }

    #[test]
    fn test_reset_overwrites_progress() {
        let mut store = GameStore::new(MemoryStore::new(), Rules::default());
        let state = store.load(now());
        let state = store.add_xp(&state, 500, now());
        assert_eq!(state.level, 4);

        let later = now() + Duration::minutes(5);
        let fresh = store.reset(later);
        assert_eq!(fresh.xp, 0);
        assert_eq!(store.load(later), fresh);
    }

    #[test]
    fn test_failed_write_still_returns_state() {
        let mut store = GameStore::new(ReadOnlyStore, Rules::default());
        let state = store.load(now());
        let next = store.add_xp(&state, 30, now());
        assert_eq!(next.xp, 30);
        assert!(store.save(&next).is_err());
    }

    #[test]
    fn test_theme_roundtrip_and_fallback() {
        let mut store = GameStore::new(MemoryStore::new(), Rules::default());
        assert_eq!(store.load_theme().id, "classic-light");

        store.save_theme("forest-dark").unwrap();
        assert_eq!(store.store().get(THEME_KEY).unwrap().as_deref(), Some("\"forest-dark\""));
        assert_eq!(store.load_theme().id, "forest-dark");

        store.save_theme("disco").unwrap();
        assert_eq!(store.load_theme().id, "classic-light");
    }

    #[test]
    fn test_theme_accepts_bare_id() {
        let mut kv = MemoryStore::new();
        kv.set(THEME_KEY, "ocean-light").unwrap();
        let store = GameStore::new(kv, Rules::default());
        assert_eq!(store.load_theme().id, "ocean-light");
    }

    #[test]
    fn test_file_store_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut kv = FileStore::new(dir.path());
        assert!(kv.get("missing").unwrap().is_none());
        kv.set("a-key", "value").unwrap();
        assert_eq!(kv.get("a-key").unwrap().as_deref(), Some("value"));
        assert!(dir.path().join("a-key.json").exists());
        assert!(!dir.path().join("a-key.json.tmp").exists());
        kv.remove("a-key").unwrap();
        kv.remove("a-key").unwrap();
        assert!(kv.get("a-key").unwrap().is_none());
        assert!(matches!(kv.set("../escape", "x"), Err(StorageError::Invalid(_))));
    }
}
