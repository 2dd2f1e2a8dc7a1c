//! Pure state transitions over [`GameState`].
//!
//! Every function here takes the current snapshot by reference and returns
//! a new one. The caller owns persistence (see `storage::GameStore`) and
//! passes a single captured `now` so one logical operation sees one clock
//! reading.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::catalog::{self, LEVEL_XP_THRESHOLDS};
use crate::rules::Rules;
use crate::state::{GameState, PlayerProfile, TopicProgress};

// ==================== DERIVED VALUES ====================

/// Level for an XP total: the largest 1-based index whose threshold is met,
/// capped at the table length
pub fn level_for_xp(xp: u32) -> u32 {
    LEVEL_XP_THRESHOLDS
        .iter()
        .rposition(|&threshold| xp >= threshold)
        .map(|i| i as u32 + 1)
        .unwrap_or(1)
}

/// Crowns for a topic: one per `correct_per_crown` correct answers, capped
pub fn crowns_for(correct_count: u32, rules: &Rules) -> u8 {
    let earned = correct_count / rules.correct_per_crown.max(1);
    earned.min(u32::from(rules.max_crowns)) as u8
}

/// How many topics (from the front of the catalog) are open for a crown total
pub fn unlocked_count(total_crowns: u32, catalog_len: usize, rules: &Rules) -> usize {
    let bonus = (total_crowns / rules.crowns_per_unlock.max(1)) as usize;
    catalog_len.min(rules.initially_unlocked.saturating_add(bonus))
}

/// Overwrite every topic's `unlocked` flag from the crown total.
///
/// Unlocks follow catalog order, not which topics hold the crowns.
fn apply_unlocks(topics: &mut BTreeMap<String, TopicProgress>, rules: &Rules) {
    let total_crowns: u32 = catalog::topic_ids()
        .filter_map(|id| topics.get(id))
        .map(|t| u32::from(t.crowns))
        .sum();
    let open = unlocked_count(total_crowns, catalog::TOPICS.len(), rules);

    for (i, id) in catalog::topic_ids().enumerate() {
        if let Some(topic) = topics.get_mut(id) {
            topic.unlocked = i < open;
        }
    }
}

/// XP window of the current level, for progress bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP at which the current level started
    pub current_floor: u32,
    /// XP at which the next level starts (last threshold once capped)
    pub next_threshold: u32,
    /// Position inside the window, 0.0..=1.0
    pub fraction: f64,
}

pub fn level_progress(state: &GameState) -> LevelProgress {
    let last = LEVEL_XP_THRESHOLDS[LEVEL_XP_THRESHOLDS.len() - 1];
    let level = state.level.max(1) as usize;
    let current_floor = LEVEL_XP_THRESHOLDS.get(level - 1).copied().unwrap_or(0);
    let next_threshold = LEVEL_XP_THRESHOLDS.get(level).copied().unwrap_or(last);

    let fraction = if next_threshold > current_floor {
        let gained = state.xp.saturating_sub(current_floor);
        (f64::from(gained) / f64::from(next_threshold - current_floor)).min(1.0)
    } else {
        1.0
    };

    LevelProgress { level: state.level, current_floor, next_threshold, fraction }
}

/// When the next heart comes back; None at full hearts
pub fn next_heart_at(state: &GameState, rules: &Rules) -> Option<DateTime<Utc>> {
    if state.hearts >= rules.max_hearts {
        return None;
    }
    Some(state.hearts_last_regen + rules.heart_regen_interval())
}

// ==================== TRANSITIONS ====================

pub fn create_profile(state: &GameState, profile: PlayerProfile) -> GameState {
    log::info!("[PROFILE] created name:{} avatar:{}", profile.name, profile.avatar_index);
    GameState { profile: Some(profile), ..state.clone() }
}

/// Award XP. Level is recomputed from the threshold table and never drops.
pub fn add_xp(state: &GameState, amount: u32, now: DateTime<Utc>) -> GameState {
    let xp = state.xp.saturating_add(amount);
    let level = state.level.max(level_for_xp(xp));

    if level > state.level {
        log::info!("[LEVEL] up {} -> {} xp:{}", state.level, level, xp);
    }

    GameState {
        xp,
        daily_xp: state.daily_xp.saturating_add(amount),
        level,
        last_played_date: Some(now),
        ..state.clone()
    }
}

/// Record one answered question for a topic.
///
/// Unknown topic ids leave the state untouched. Does not award XP; the
/// session layer calls `add_xp` separately for correct answers.
pub fn record_answer(
    state: &GameState,
    topic_id: &str,
    correct: bool,
    now: DateTime<Utc>,
    rules: &Rules,
) -> GameState {
    let Some(topic) = state.topics.get(topic_id) else {
        log::debug!("[PROGRESS] ignoring answer for unknown topic:{}", topic_id);
        return state.clone();
    };

    let correct_count = topic.correct_count.saturating_add(u32::from(correct));
    let updated = TopicProgress {
        correct_count,
        total_attempted: topic.total_attempted.saturating_add(1),
        crowns: crowns_for(correct_count, rules),
        unlocked: topic.unlocked,
    };
    if updated.crowns > topic.crowns {
        log::info!("[PROGRESS] crown topic:{} crowns:{}", topic_id, updated.crowns);
    }

    let mut topics = state.topics.clone();
    topics.insert(topic_id.to_string(), updated);

    let open_before = state.unlocked_topic_count();
    apply_unlocks(&mut topics, rules);
    let open_after = topics.values().filter(|t| t.unlocked).count();
    if open_after > open_before {
        log::info!("[UNLOCK] topics open:{} -> {}", open_before, open_after);
    }

    let streak = if correct { state.streak.saturating_add(1) } else { 0 };
    let hearts = if correct { state.hearts } else { state.hearts.saturating_sub(1) };

    log::debug!(
        "[PROGRESS] answer topic:{} correct:{} streak:{} hearts:{}",
        topic_id, correct, streak, hearts
    );

    GameState {
        topics,
        hearts,
        streak,
        longest_streak: state.longest_streak.max(streak),
        total_correct: state.total_correct.saturating_add(u32::from(correct)),
        total_attempted: state.total_attempted.saturating_add(1),
        last_played_date: Some(now),
        ..state.clone()
    }
}

// ==================== REPAIR ====================

/// Reconcile a loaded snapshot with the current catalog and the clock.
///
/// Steps: topic reconciliation, derived-field recompute (crowns, unlocks,
/// level), heart regeneration, then the calendar-day rollover.
pub fn repair(state: &GameState, now: DateTime<Utc>, rules: &Rules) -> GameState {
    let mut repaired = state.clone();
    repaired.topics = reconcile_topics(&state.topics, rules);
    apply_unlocks(&mut repaired.topics, rules);
    repaired.hearts = repaired.hearts.min(rules.max_hearts);
    repaired.level = repaired.level.max(level_for_xp(repaired.xp));
    repaired.longest_streak = repaired.longest_streak.max(repaired.streak);
    if repaired.daily_goal == 0 {
        repaired.daily_goal = rules.daily_goal;
    }

    let repaired = regenerate_hearts(&repaired, now, rules);
    roll_over_day(&repaired, now, rules)
}

/// Keep stored progress for catalog topics, default the missing ones and
/// drop ids the catalog no longer has
fn reconcile_topics(
    stored: &BTreeMap<String, TopicProgress>,
    rules: &Rules,
) -> BTreeMap<String, TopicProgress> {
    let dropped = stored.keys().filter(|id| catalog::topic(id).is_none()).count();
    if dropped > 0 {
        log::warn!("[RESTORE] dropping {} stale topic(s)", dropped);
    }

    catalog::topic_ids()
        .map(|id| {
            let progress = match stored.get(id) {
                // a partial entry keeps its correct answers; attempts are raised to match
                Some(p) => TopicProgress {
                    correct_count: p.correct_count,
                    total_attempted: p.total_attempted.max(p.correct_count),
                    crowns: crowns_for(p.correct_count, rules),
                    unlocked: p.unlocked,
                },
                None => TopicProgress::locked(),
            };
            (id.to_string(), progress)
        })
        .collect()
}

/// One heart per full interval since `hearts_last_regen`, capped.
///
/// The timestamp only moves when a heart is actually added, so time spent
/// at full hearts is not banked.
pub fn regenerate_hearts(state: &GameState, now: DateTime<Utc>, rules: &Rules) -> GameState {
    let elapsed_ms = (now - state.hearts_last_regen).num_milliseconds();
    let interval_ms = rules.heart_regen_interval().num_milliseconds().max(1);
    let intervals = if elapsed_ms > 0 { elapsed_ms / interval_ms } else { 0 };

    if intervals == 0 || state.hearts >= rules.max_hearts {
        return state.clone();
    }

    let missing = i64::from(rules.max_hearts - state.hearts);
    let hearts = state.hearts + intervals.min(missing) as u8;
    log::info!("[HEARTS] regenerated {} -> {}", state.hearts, hearts);

    GameState { hearts, hearts_last_regen: now, ..state.clone() }
}

/// New calendar day: reset daily XP, and the streak too if a day was skipped
pub fn roll_over_day(state: &GameState, now: DateTime<Utc>, rules: &Rules) -> GameState {
    let Some(last_played) = state.last_played_date else {
        return state.clone();
    };

    let last_day = rules.calendar_day(last_played);
    let today = rules.calendar_day(now);
    if last_day == today {
        return state.clone();
    }

    let mut next = state.clone();
    if today.pred_opt() != Some(last_day) {
        if state.streak > 0 {
            log::info!("[STREAK] broken streak:{} last_played:{}", state.streak, last_day);
        }
        next.streak = 0;
    }
    next.daily_xp = 0;
    next
}
