use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, TopicDefinition};
use crate::rules::Rules;

// ==================== DATA MODEL ====================

/// Player identity chosen at onboarding. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,

    /// Index into catalog::AVATARS
    pub avatar_index: usize,

    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, avatar_index: usize, created_at: DateTime<Utc>) -> Self {
        Self { name: name.into(), avatar_index, created_at }
    }

    pub fn avatar(&self) -> &'static str {
        catalog::AVATARS
            .get(self.avatar_index)
            .copied()
            .unwrap_or(catalog::AVATARS[0])
    }
}

/// Mutable progress for one topic.
///
/// `crowns` and `unlocked` are derived (from `correct_count` and the crown
/// total across all topics) and overwritten on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicProgress {
    pub crowns: u8,

    pub unlocked: bool,

    /// Always <= total_attempted
    pub correct_count: u32,

    pub total_attempted: u32,
}

impl TopicProgress {
    pub fn locked() -> Self {
        Self::default()
    }

    pub fn unlocked() -> Self {
        Self { unlocked: true, ..Self::default() }
    }

    /// Share of attempts answered correctly, 0.0 before the first attempt
    pub fn accuracy(&self) -> f64 {
        if self.total_attempted == 0 {
            0.0
        } else {
            f64::from(self.correct_count) / f64::from(self.total_attempted)
        }
    }
}

/// The single persisted game record for a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// None until onboarding completes
    pub profile: Option<PlayerProfile>,

    pub xp: u32,

    /// 1-based, derived from xp via LEVEL_XP_THRESHOLDS
    pub level: u32,

    /// Consecutive correct answers (account-wide)
    pub streak: u32,

    pub last_played_date: Option<DateTime<Utc>>,

    pub hearts: u8,

    /// Last time a heart was regenerated
    pub hearts_last_regen: DateTime<Utc>,

    /// Keyed by topic id; exactly the catalog's topics after repair
    pub topics: BTreeMap<String, TopicProgress>,

    #[serde(default)]
    pub daily_xp: u32,

    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,

    #[serde(default)]
    pub total_correct: u32,

    #[serde(default)]
    pub total_attempted: u32,

    #[serde(default)]
    pub longest_streak: u32,
}

fn default_daily_goal() -> u32 {
    Rules::default().daily_goal
}

impl GameState {
    /// Fresh state: full hearts, level 1, first topics unlocked
    pub fn new(now: DateTime<Utc>, rules: &Rules) -> Self {
        Self {
            profile: None,
            xp: 0,
            level: 1,
            streak: 0,
            last_played_date: None,
            hearts: rules.max_hearts,
            hearts_last_regen: now,
            topics: default_topics(rules),
            daily_xp: 0,
            daily_goal: rules.daily_goal,
            total_correct: 0,
            total_attempted: 0,
            longest_streak: 0,
        }
    }

    pub fn topic(&self, id: &str) -> Option<&TopicProgress> {
        self.topics.get(id)
    }

    /// Topics with their static definitions, in catalog order
    pub fn topics_in_order(&self) -> impl Iterator<Item = (&'static TopicDefinition, &TopicProgress)> {
        catalog::TOPICS
            .iter()
            .filter_map(move |def| self.topics.get(def.id).map(|p| (def, p)))
    }

    pub fn total_crowns(&self) -> u32 {
        catalog::topic_ids()
            .filter_map(|id| self.topics.get(id))
            .map(|t| u32::from(t.crowns))
            .sum()
    }

    pub fn unlocked_topic_count(&self) -> usize {
        self.topics.values().filter(|t| t.unlocked).count()
    }

    pub fn has_hearts(&self) -> bool {
        self.hearts > 0
    }

    pub fn daily_goal_met(&self) -> bool {
        self.daily_xp >= self.daily_goal
    }

    /// Daily XP as a fraction of the goal, capped at 1.0
    pub fn daily_goal_progress(&self) -> f64 {
        if self.daily_goal == 0 {
            return 1.0;
        }
        (f64::from(self.daily_xp) / f64::from(self.daily_goal)).min(1.0)
    }

    /// Lifetime accuracy, 0.0 before the first attempt
    pub fn accuracy(&self) -> f64 {
        if self.total_attempted == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_attempted)
        }
    }
}

/// Default progress for every catalog topic; the first few are open
pub fn default_topics(rules: &Rules) -> BTreeMap<String, TopicProgress> {
    catalog::topic_ids()
        .enumerate()
        .map(|(i, id)| {
            let progress = if i < rules.initially_unlocked {
                TopicProgress::unlocked()
            } else {
                TopicProgress::locked()
            };
            (id.to_string(), progress)
        })
        .collect()
}
