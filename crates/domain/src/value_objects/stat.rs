//! Bounded pet stats.
//!
//! Every stat is an integer in `[0, 100]`. The bound is enforced by construction:
//! [`StatValue`] can only be built through clamping constructors, so no code path can
//! observe a value outside the range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stat value clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct StatValue(u8);

impl StatValue {
    pub const MIN: StatValue = StatValue(0);
    pub const MAX: StatValue = StatValue(100);

    /// Build a stat value, clamping into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn get(self) -> i64 {
        i64::from(self.0)
    }

    /// Returns a new value with `delta` added, clamped to `[0, 100]`.
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(self.get() + delta)
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<StatValue> for i64 {
    fn from(value: StatValue) -> Self {
        value.get()
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed change to a pet's stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    pub happiness: i64,
    pub health: i64,
    pub hunger: i64,
}

impl StatDelta {
    pub const fn new(happiness: i64, health: i64, hunger: i64) -> Self {
        Self {
            happiness,
            health,
            hunger,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.happiness == 0 && self.health == 0 && self.hunger == 0
    }
}

impl fmt::Display for StatDelta {
    /// Formats as `+10 happiness, +5 health, -20 hunger`, skipping zero components.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            (self.happiness, "happiness"),
            (self.health, "health"),
            (self.hunger, "hunger"),
        ]
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, label)| format!("{value:+} {label}"))
        .collect();

        if parts.is_empty() {
            write!(f, "no change")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// The three numeric stats of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStats {
    pub happiness: StatValue,
    pub health: StatValue,
    pub hunger: StatValue,
}

impl PetStats {
    pub fn new(happiness: i64, health: i64, hunger: i64) -> Self {
        Self {
            happiness: StatValue::clamped(happiness),
            health: StatValue::clamped(health),
            hunger: StatValue::clamped(hunger),
        }
    }

    /// Apply each component of `delta` independently, clamping after each.
    pub fn apply(&mut self, delta: StatDelta) {
        self.happiness = self.happiness.offset(delta.happiness);
        self.health = self.health.offset(delta.health);
        self.hunger = self.hunger.offset(delta.hunger);
    }
}

impl Default for PetStats {
    /// A freshly adopted pet: fully happy and healthy, not hungry.
    fn default() -> Self {
        Self::new(100, 100, 0)
    }
}
