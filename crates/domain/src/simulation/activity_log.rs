//! Append-only activity history.
//!
//! Records are stored structured (type + effect + timestamp) so the rules can query
//! them without parsing. `Display` renders the legacy `{type} - {effect} - {ISO timestamp}`
//! line shown to players.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::ActivityType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub activity: ActivityType,
    pub effect: String,
    pub at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(activity: ActivityType, effect: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            activity,
            effect: effect.into(),
            at,
        }
    }
}

impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.activity,
            self.effect,
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog(Vec<ActivityRecord>);

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ActivityRecord) {
        self.0.push(record);
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent record of `activity` by timestamp (not by position).
    pub fn last_of(&self, activity: ActivityType) -> Option<&ActivityRecord> {
        self.0
            .iter()
            .filter(|r| r.activity == activity)
            .max_by_key(|r| r.at)
    }

    /// Records of `activity` strictly newer than `since`.
    pub fn count_since(&self, activity: ActivityType, since: DateTime<Utc>) -> usize {
        self.0
            .iter()
            .filter(|r| r.activity == activity && r.at > since)
            .count()
    }
}
