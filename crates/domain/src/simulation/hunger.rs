//! Time-based hunger.
//!
//! Hunger is not driven by a timer. It is derived lazily from the time since the
//! pet was last fed whenever an activity runs or status is read.

use chrono::{DateTime, Utc};

use super::activity_log::ActivityLog;
use super::hours_between;
use crate::value_objects::{ActivityType, PetStats, StatDelta};

/// A pet not fed for longer than this gets hungrier.
pub const HUNGER_GROWTH_AFTER_HOURS: f64 = 24.0;
pub const HUNGER_GROWTH: i64 = 10;
/// At or above this hunger level a status read costs health and happiness.
pub const STARVATION_LEVEL: i64 = 80;
pub const STARVATION_PENALTY: StatDelta = StatDelta::new(-20, -10, 0);

/// Hours since the latest feed, or since `fallback` if the pet was never fed.
pub fn hours_since_fed(log: &ActivityLog, fallback: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let since = log
        .last_of(ActivityType::Feed)
        .map(|record| record.at)
        .unwrap_or(fallback);
    hours_between(since, now)
}

/// Raises hunger by 10 if the pet has gone unfed for over a day. Returns whether it did.
pub fn apply_time_growth(
    stats: &mut PetStats,
    log: &ActivityLog,
    fallback: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    if hours_since_fed(log, fallback, now) > HUNGER_GROWTH_AFTER_HOURS {
        stats.hunger = stats.hunger.offset(HUNGER_GROWTH);
        return true;
    }
    false
}

/// A starving pet (hunger >= 80) loses 10 health and 20 happiness. Returns whether it did.
pub fn apply_starvation_penalty(stats: &mut PetStats) -> bool {
    if stats.hunger.get() >= STARVATION_LEVEL {
        stats.apply(STARVATION_PENALTY);
        return true;
    }
    false
}
