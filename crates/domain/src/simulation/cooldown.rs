//! Cooldown gate for repeated identical activities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::ActivityType;

/// Minimum time between two activities of the same type.
pub const COOLDOWN_WINDOW_MS: i64 = 5_000;

/// Returned when an activity is attempted inside its cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Wait {remaining_ms} ms before doing '{activity}' again")]
pub struct CooldownRejection {
    pub activity: ActivityType,
    /// Always in `(0, window]`.
    pub remaining_ms: i64,
}

/// Last invocation time per activity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityTimestamps(BTreeMap<ActivityType, DateTime<Utc>>);

impl ActivityTimestamps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, activity: ActivityType) -> Option<DateTime<Utc>> {
        self.0.get(&activity).copied()
    }

    pub fn record(&mut self, activity: ActivityType, at: DateTime<Utc>) {
        self.0.insert(activity, at);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGate {
    window: Duration,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Checks eligibility without recording anything.
    pub fn check(
        &self,
        timestamps: &ActivityTimestamps,
        activity: ActivityType,
        now: DateTime<Utc>,
    ) -> Result<(), CooldownRejection> {
        let Some(last) = timestamps.get(activity) else {
            return Ok(());
        };

        // A timestamp in the future (clock skew) counts as "just now".
        let elapsed = (now - last).max(Duration::zero());
        if elapsed < self.window {
            return Err(CooldownRejection {
                activity,
                remaining_ms: (self.window - elapsed).num_milliseconds().max(1),
            });
        }
        Ok(())
    }

    /// Checks eligibility and, on success, records `now` for `activity`.
    ///
    /// The timestamp is recorded before any effect is resolved, so a failure later in
    /// the same request cannot be retried to skip the cooldown.
    pub fn admit(
        &self,
        timestamps: &mut ActivityTimestamps,
        activity: ActivityType,
        now: DateTime<Utc>,
    ) -> Result<(), CooldownRejection> {
        self.check(timestamps, activity, now)?;
        timestamps.record(activity, now);
        Ok(())
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(Duration::milliseconds(COOLDOWN_WINDOW_MS))
    }
}
