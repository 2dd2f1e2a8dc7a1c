use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::Deserialize;

use crate::error::RulesError;

/// Tunable game rules. Defaults are the shipped game balance.
///
/// Loadable from TOML; missing keys keep their default:
///
/// ```toml
/// max_hearts = 5
/// heart_regen_minutes = 30
/// day_offset_minutes = -480   # calendar day flips at local midnight UTC-8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_hearts: u8,
    /// One heart comes back per full interval
    pub heart_regen_minutes: u32,
    pub max_crowns: u8,
    /// Correct answers per crown
    pub correct_per_crown: u32,
    /// Topics open on a fresh profile
    pub initially_unlocked: usize,
    /// One extra topic unlocks per this many crowns (summed over all topics)
    pub crowns_per_unlock: u32,
    pub xp_per_correct: u32,
    pub questions_per_session: usize,
    pub daily_goal: u32,
    /// Offset from UTC used to decide which calendar day a timestamp falls on
    pub day_offset_minutes: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_hearts: 5,
            heart_regen_minutes: 30,
            max_crowns: 5,
            correct_per_crown: 10,
            initially_unlocked: 3,
            crowns_per_unlock: 2,
            xp_per_correct: 10,
            questions_per_session: 10,
            daily_goal: 50,
            day_offset_minutes: 0,
        }
    }
}

impl Rules {
    pub fn from_toml_str(input: &str) -> Result<Self, RulesError> {
        let rules: Rules = toml::from_str(input)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        fn invalid(field: &'static str, reason: &str) -> RulesError {
            RulesError::Invalid { field, reason: reason.to_string() }
        }

        if self.max_hearts == 0 {
            return Err(invalid("max_hearts", "must be at least 1"));
        }
        if self.heart_regen_minutes == 0 {
            return Err(invalid("heart_regen_minutes", "must be at least 1"));
        }
        if self.correct_per_crown == 0 {
            return Err(invalid("correct_per_crown", "must be at least 1"));
        }
        if self.crowns_per_unlock == 0 {
            return Err(invalid("crowns_per_unlock", "must be at least 1"));
        }
        if self.daily_goal == 0 {
            return Err(invalid("daily_goal", "must be at least 1"));
        }
        if self.questions_per_session == 0 {
            return Err(invalid("questions_per_session", "must be at least 1"));
        }
        if self.day_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(invalid("day_offset_minutes", "must be within one day of UTC"));
        }
        Ok(())
    }

    pub fn heart_regen_interval(&self) -> Duration {
        Duration::minutes(i64::from(self.heart_regen_minutes))
    }

    /// Calendar day `at` falls on, in the configured offset
    pub fn calendar_day(&self, at: DateTime<Utc>) -> NaiveDate {
        // Out-of-range offsets (validate() bypassed) count as UTC
        let offset = FixedOffset::east_opt(self.day_offset_minutes * 60).unwrap_or(Utc.fix());
        at.with_timezone(&offset).date_naive()
    }
}
