//! Pet state evolution.
//!
//! Everything here is pure and synchronous. Time is always passed in; nothing reads
//! the wall clock or schedules work. Passive drift is computed lazily from elapsed
//! time whenever an activity runs or status is read.

use chrono::{DateTime, Utc};

pub mod activity_log;
pub mod cooldown;
pub mod disease;
pub mod effects;
pub mod hunger;
pub mod personality;

pub use activity_log::{ActivityLog, ActivityRecord};
pub use cooldown::{ActivityTimestamps, CooldownGate, CooldownRejection, COOLDOWN_WINDOW_MS};
pub use disease::DiseasePenaltyMode;
pub use effects::{EffectOutcome, OverusePenalty};

/// Fractional hours from `from` to `to`. Negative if `from` is later.
pub(crate) fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}
