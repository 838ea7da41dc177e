//! Mood derivation.

use chrono::{DateTime, Utc};

use super::hours_between;
use crate::value_objects::{Diseases, PetStats, Personality};

/// Idle for longer than this makes any pet angry.
pub const ANGRY_AFTER_IDLE_HOURS: f64 = 24.0;

/// Derives the mood from current stats, diseases and idle time.
///
/// Rules in priority order: any disease → sad; happiness and health both above 80 →
/// happy; happiness below 30 → sad; below 50 → angry; otherwise normal. Being idle
/// for over a day overrides all of these with angry.
pub fn derive(
    stats: &PetStats,
    diseases: &Diseases,
    last_interaction: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Personality {
    if hours_between(last_interaction, now) > ANGRY_AFTER_IDLE_HOURS {
        return Personality::Angry;
    }

    let happiness = stats.happiness.get();
    let health = stats.health.get();

    if !diseases.is_empty() {
        Personality::Sad
    } else if happiness > 80 && health > 80 {
        Personality::Happy
    } else if happiness < 30 {
        Personality::Sad
    } else if happiness < 50 {
        Personality::Angry
    } else {
        Personality::Normal
    }
}
