//! Disease onset rules and the penalty for being sick.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

use super::activity_log::ActivityLog;
use super::hours_between;
use crate::error::DomainError;
use crate::value_objects::{ActivityType, DiseaseName, Diseases, PetStats, StatDelta};

pub const WEAKNESS_AFTER_IDLE_HOURS: f64 = 24.0;
pub const UPSET_STOMACH_WINDOW_HOURS: i64 = 2;
/// More feeds than this inside the window upset the stomach.
pub const UPSET_STOMACH_MAX_FEEDS: usize = 2;
pub const RASH_AFTER_HOURS: f64 = 48.0;
pub const SADNESS_AFTER_HOURS: f64 = 48.0;

pub const HEALTH_PENALTY_PER_DISEASE: i64 = 10;
pub const HAPPINESS_PENALTY_PER_DISEASE: i64 = 20;

/// Adds every disease whose trigger fires. Returns the ones newly contracted.
///
/// `previous_interaction` is the pet's `last_interaction` from before the current
/// activity; `log` already includes the current activity's record. Overfeeding is only
/// checked when `activity` is a feed.
pub fn evaluate(
    diseases: &mut Diseases,
    log: &ActivityLog,
    activity: ActivityType,
    previous_interaction: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<DiseaseName> {
    let mut triggered = Vec::new();

    if hours_between(previous_interaction, now) > WEAKNESS_AFTER_IDLE_HOURS {
        triggered.push(DiseaseName::weakness());
    }

    let window_start = now - Duration::hours(UPSET_STOMACH_WINDOW_HOURS);
    if activity == ActivityType::Feed
        && log.count_since(ActivityType::Feed, window_start) > UPSET_STOMACH_MAX_FEEDS
    {
        triggered.push(DiseaseName::upset_stomach());
    }

    if neglected(log, ActivityType::Bathe, RASH_AFTER_HOURS, now) {
        triggered.push(DiseaseName::rash());
    }

    if neglected(log, ActivityType::Walk, SADNESS_AFTER_HOURS, now) {
        triggered.push(DiseaseName::sadness());
    }

    triggered
        .into_iter()
        .filter(|disease| diseases.insert(disease.clone()))
        .collect()
}

// A pet that has never done the activity is not considered neglected.
fn neglected(log: &ActivityLog, activity: ActivityType, hours: f64, now: DateTime<Utc>) -> bool {
    log.last_of(activity)
        .is_some_and(|record| hours_between(record.at, now) > hours)
}

/// How often the sickness penalty is charged on status reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiseasePenaltyMode {
    /// Every read charges every active disease again.
    #[default]
    EveryRead,
    /// Each disease is charged once until it is cured.
    Once,
}

impl DiseasePenaltyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EveryRead => "every_read",
            Self::Once => "once",
        }
    }
}

impl fmt::Display for DiseasePenaltyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiseasePenaltyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "every_read" | "every-read" | "repeat" => Ok(Self::EveryRead),
            "once" => Ok(Self::Once),
            other => Err(DomainError::parse(format!(
                "Unknown disease penalty mode: '{other}'"
            ))),
        }
    }
}

/// Charges `health -10` and `happiness -20` per chargeable disease.
///
/// `penalized` remembers which diseases were already charged; it is only consulted in
/// [`DiseasePenaltyMode::Once`] and is always pruned to the diseases still present.
pub fn apply_penalty(
    stats: &mut PetStats,
    diseases: &Diseases,
    penalized: &mut Diseases,
    mode: DiseasePenaltyMode,
) -> StatDelta {
    penalized.retain(|disease| diseases.contains(disease));

    let count = match mode {
        DiseasePenaltyMode::EveryRead => diseases.len(),
        DiseasePenaltyMode::Once => diseases
            .iter()
            .filter(|disease| penalized.insert((*disease).clone()))
            .count(),
    } as i64;

    if count == 0 {
        return StatDelta::default();
    }

    let before = *stats;
    stats.apply(StatDelta::new(
        -HAPPINESS_PENALTY_PER_DISEASE * count,
        -HEALTH_PENALTY_PER_DISEASE * count,
        0,
    ));
    StatDelta::new(
        stats.happiness.get() - before.happiness.get(),
        stats.health.get() - before.health.get(),
        0,
    )
}
