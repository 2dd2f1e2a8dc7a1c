//! Progression engine for the MathQuest quiz.
//!
//! The engine is a set of pure transitions over a single [`GameState`]:
//! XP and levels, per-topic crowns, catalog-ordered topic unlocking,
//! answer streaks, and hearts that drain on wrong answers and come back
//! over time. [`GameStore`] is the persistence boundary; [`Session`] drives
//! one quiz run on top of the transitions.
//!
//! ```no_run
//! use chrono::Utc;
//! use mathquest::{GameStore, MemoryStore, PlayerProfile, ProceduralGenerator, Rules, Session};
//!
//! let mut store = GameStore::new(MemoryStore::new(), Rules::default());
//! let now = Utc::now();
//! let state = store.load(now);
//! let state = store.create_profile(&state, PlayerProfile::new("Robin", 0, now));
//!
//! let mut generator = ProceduralGenerator::from_entropy();
//! let mut session = Session::start(&state, "multiplication", &mut generator, store.rules()).unwrap();
//! let question = session.current_question().unwrap().clone();
//! if let Some(answered) = session.submit(&state, &question.answer, now, store.rules()) {
//!     store.save(&answered.state).unwrap();
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod generator;
pub mod progression;
pub mod question;
pub mod rules;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;

// Snapshot import/export and the load-time repair pipeline
pub mod restore;

pub use error::{RulesError, SessionError, StorageError};
pub use generator::ProceduralGenerator;
pub use progression::{add_xp, create_profile, level_for_xp, record_answer, LevelProgress};
pub use question::{answers_match, Question, QuestionGenerator, QuestionKind};
pub use rules::Rules;
pub use session::{Answered, Session, SessionPhase};
pub use state::{GameState, PlayerProfile, TopicProgress};
pub use storage::{FileStore, GameStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
