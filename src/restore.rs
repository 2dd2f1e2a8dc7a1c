// Snapshot import/export.
// Accepts the JSON written by `export_snapshot` (and by older clients, whose
// topic entries also carry the static name/emoji/color fields).

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::StorageError;
use crate::progression;
use crate::rules::Rules;
use crate::state::GameState;

/// Parse a stored snapshot without touching it
pub fn parse_snapshot(json: &str) -> Result<GameState, StorageError> {
    let value: Value = serde_json::from_str(json)?;

    let topics = value
        .get("topics")
        .ok_or_else(|| StorageError::Invalid("missing topics".to_string()))?;
    if !topics.is_object() {
        return Err(StorageError::Invalid("topics is not an object".to_string()));
    }

    let state: GameState = serde_json::from_value(value)?;
    Ok(state)
}

/// Parse and repair a snapshot against the current catalog and clock
pub fn import_snapshot(json: &str, now: DateTime<Utc>, rules: &Rules) -> Result<GameState, StorageError> {
    let parsed = parse_snapshot(json)?;
    let repaired = progression::repair(&parsed, now, rules);

    log::info!(
        "[RESTORE] imported xp:{} level:{} hearts:{} crowns:{}",
        repaired.xp, repaired.level, repaired.hearts, repaired.total_crowns()
    );
    Ok(repaired)
}

/// Human-readable backup of a state
pub fn export_snapshot(state: &GameState) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(state)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(parse_snapshot("not json"), Err(StorageError::Json(_))));
        assert!(matches!(parse_snapshot("{}"), Err(StorageError::Invalid(_))));
        assert!(matches!(parse_snapshot(r#"{"topics": []}"#), Err(StorageError::Invalid(_))));
    }

    #[test]
    fn test_camel_case_layout() {
        let json = export_snapshot(&GameState::new(now(), &Rules::default())).unwrap();
        assert!(json.contains("\"heartsLastRegen\""));
        assert!(json.contains("\"lastPlayedDate\": null"));
        assert!(json.contains("\"dailyGoal\": 50"));
        assert!(json.contains("\"correctCount\""));
    }

    #[test]
    fn test_reads_legacy_snapshot() {
        // Shape written by the browser client: static topic fields inline, no longestStreak
        let legacy = r##"{
            "profile": {"name": "Ada", "avatarIndex": 3, "createdAt": "2024-05-01T09:00:00.000Z"},
            "xp": 260, "level": 3, "streak": 2,
            "lastPlayedDate": "2024-05-14T08:00:00.000Z",
            "hearts": 4, "heartsLastRegen": "2024-05-14T11:50:00.000Z",
            "topics": {
                "multiplication": {"id": "multiplication", "name": "Multiplication", "emoji": "✖️",
                    "category": "numbers", "color": "#58CC02", "description": "Multiply bigger numbers",
                    "crowns": 2, "unlocked": true, "correctCount": 21, "totalAttempted": 30},
                "retired-topic": {"crowns": 5, "unlocked": true, "correctCount": 50, "totalAttempted": 50}
            },
            "dailyXp": 30, "dailyGoal": 50, "totalCorrect": 21, "totalAttempted": 30
        }"##;

        let state = import_snapshot(legacy, now(), &Rules::default()).unwrap();
        let profile = state.profile.as_ref().unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.avatar(), "🦊");
        assert_eq!(state.longest_streak, 2);
        assert_eq!(state.hearts, 4);
        assert_eq!(state.daily_xp, 30);
        assert!(!state.topics.contains_key("retired-topic"));
        assert_eq!(state.topics["multiplication"].crowns, 2);
        assert_eq!(state.unlocked_topic_count(), 4);
    }

    #[test]
    fn test_partial_topic_entry_takes_defaults() {
        // Entries written before some fields existed
        let json = r#"{
            "xp": 120, "level": 2, "streak": 0, "lastPlayedDate": null,
            "hearts": 5, "heartsLastRegen": "2024-05-14T11:00:00Z",
            "topics": {
                "multiplication": {"correctCount": 12},
                "division": {"unlocked": true}
            }
        }"#;

        let state = import_snapshot(json, now(), &Rules::default()).unwrap();
        let multiplication = &state.topics["multiplication"];
        assert_eq!(multiplication.correct_count, 12);
        assert_eq!(multiplication.total_attempted, 12);
        assert_eq!(multiplication.crowns, 1);
        // unlock flags come from catalog order, not the stored entry
        assert!(multiplication.unlocked);
        assert_eq!(state.topics["division"].correct_count, 0);
        assert_eq!(state.topics["division"].total_attempted, 0);
        assert_eq!(state.topics.len(), crate::catalog::TOPICS.len());
        assert_eq!(state.daily_goal, 50);
        assert_eq!(state.longest_streak, 0);
    }
}
