//! Activity effect resolution.
//!
//! Deltas are server-defined constants. Callers name an activity; they never supply
//! the numbers.

use std::fmt;

use crate::value_objects::{ActivityType, DiseaseName, Diseases, PetStats, StatDelta};

/// Hunger added by passive decay on every activity.
pub const PASSIVE_HUNGER_GAIN: i64 = 2;
/// Above this hunger level passive decay also costs happiness.
pub const HUNGRY_THRESHOLD: i64 = 70;

/// Base stat change for each activity.
pub fn base_delta(activity: ActivityType) -> StatDelta {
    match activity {
        ActivityType::Feed => StatDelta::new(10, 5, -20),
        ActivityType::Walk => StatDelta::new(15, 2, 10),
        ActivityType::Bathe => StatDelta::new(5, 0, 0),
        ActivityType::Play => StatDelta::new(20, 0, 15),
    }
}

/// Penalty for doing an activity when the pet is in no state for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverusePenalty {
    /// Fed while hunger < 20.
    Overfeeding,
    /// Walked while happiness > 80 and health < 50.
    Overexertion,
    /// Bathed while happiness > 90.
    BathStress,
    /// Played while happiness > 85 and health < 60.
    Exhaustion,
}

impl OverusePenalty {
    /// The penalty that applies to `activity` given the stats after the base delta.
    pub fn detect(activity: ActivityType, stats: &PetStats) -> Option<Self> {
        let happiness = stats.happiness.get();
        let health = stats.health.get();
        let hunger = stats.hunger.get();

        match activity {
            ActivityType::Feed if hunger < 20 => Some(Self::Overfeeding),
            ActivityType::Walk if happiness > 80 && health < 50 => Some(Self::Overexertion),
            ActivityType::Bathe if happiness > 90 => Some(Self::BathStress),
            ActivityType::Play if happiness > 85 && health < 60 => Some(Self::Exhaustion),
            _ => None,
        }
    }

    pub fn delta(&self) -> StatDelta {
        match self {
            Self::Overfeeding => StatDelta::new(-10, -5, 0),
            Self::Overexertion => StatDelta::new(-15, 0, 0),
            Self::BathStress => StatDelta::new(-5, 0, 0),
            Self::Exhaustion => StatDelta::new(-12, -8, 0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overfeeding => "overfeeding",
            Self::Overexertion => "overexertion",
            Self::BathStress => "bath stress",
            Self::Exhaustion => "exhaustion",
        }
    }
}

impl fmt::Display for OverusePenalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.delta())
    }
}

/// What resolving one activity did to a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    pub activity: ActivityType,
    pub base: StatDelta,
    pub penalty: Option<OverusePenalty>,
    pub cured: Option<DiseaseName>,
    pub passive: StatDelta,
}

impl EffectOutcome {
    /// Human-readable effect description stored in the activity log.
    pub fn summary(&self) -> String {
        let mut summary = self.base.to_string();
        if let Some(penalty) = self.penalty {
            summary.push_str(&format!("; {penalty}"));
        }
        if let Some(cured) = &self.cured {
            summary.push_str(&format!("; cured {cured}"));
        }
        summary
    }
}

/// Applies base delta, overuse penalty, side effects and passive decay, in that order.
pub fn resolve(activity: ActivityType, stats: &mut PetStats, diseases: &mut Diseases) -> EffectOutcome {
    let base = base_delta(activity);
    stats.apply(base);

    let penalty = OverusePenalty::detect(activity, stats);
    if let Some(penalty) = penalty {
        stats.apply(penalty.delta());
    }

    let cured = match activity {
        ActivityType::Bathe => {
            let rash = DiseaseName::rash();
            diseases.remove(&rash).then_some(rash)
        }
        _ => None,
    };

    let passive = apply_passive_decay(stats);

    EffectOutcome {
        activity,
        base,
        penalty,
        cured,
        passive,
    }
}

/// Hunger creeps up by 2; a hungry pet (hunger > 70 afterwards) also loses 1 happiness.
fn apply_passive_decay(stats: &mut PetStats) -> StatDelta {
    let before = *stats;
    stats.hunger = stats.hunger.offset(PASSIVE_HUNGER_GAIN);
    if stats.hunger.get() > HUNGRY_THRESHOLD {
        stats.happiness = stats.happiness.offset(-1);
    }
    StatDelta::new(
        stats.happiness.get() - before.happiness.get(),
        stats.health.get() - before.health.get(),
        stats.hunger.get() - before.hunger.get(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeding_a_full_pet_overfeeds() {
        let mut stats = PetStats::default();
        let mut diseases = Diseases::new();

        let outcome = resolve(ActivityType::Feed, &mut stats, &mut diseases);

        assert_eq!(outcome.penalty, Some(OverusePenalty::Overfeeding));
        assert_eq!(stats, PetStats::new(90, 95, 2));
    }

    #[test]
    fn feeding_a_hungry_pet_has_no_penalty() {
        let mut stats = PetStats::new(50, 50, 60);
        let mut diseases = Diseases::new();

        let outcome = resolve(ActivityType::Feed, &mut stats, &mut diseases);

        assert_eq!(outcome.penalty, None);
        assert_eq!(stats, PetStats::new(60, 55, 42));
    }

    #[test]
    fn walking_a_frail_cheerful_pet_overexerts() {
        let mut stats = PetStats::new(70, 40, 10);
        let mut diseases = Diseases::new();

        let outcome = resolve(ActivityType::Walk, &mut stats, &mut diseases);

        // 70 + 15 = 85 > 80 and health 42 < 50.
        assert_eq!(outcome.penalty, Some(OverusePenalty::Overexertion));
        assert_eq!(stats, PetStats::new(70, 42, 22));
    }

    #[test]
    fn bathing_a_very_happy_pet_stresses_it_and_cures_rash() {
        let mut stats = PetStats::new(95, 80, 10);
        let mut diseases: Diseases = [DiseaseName::rash(), DiseaseName::new("flu").unwrap()]
            .into_iter()
            .collect();

        let outcome = resolve(ActivityType::Bathe, &mut stats, &mut diseases);

        assert_eq!(outcome.penalty, Some(OverusePenalty::BathStress));
        assert_eq!(outcome.cured, Some(DiseaseName::rash()));
        assert!(!diseases.contains(&DiseaseName::rash()));
        assert_eq!(diseases.len(), 1);
        assert_eq!(stats, PetStats::new(95, 80, 12));
    }

    #[test]
    fn playing_while_weak_exhausts() {
        let mut stats = PetStats::new(70, 50, 0);
        let mut diseases = Diseases::new();

        let outcome = resolve(ActivityType::Play, &mut stats, &mut diseases);

        assert_eq!(outcome.penalty, Some(OverusePenalty::Exhaustion));
        assert_eq!(stats, PetStats::new(78, 42, 17));
    }

    #[test]
    fn passive_decay_costs_happiness_when_hungry() {
        let mut stats = PetStats::new(50, 50, 60);
        let mut diseases = Diseases::new();

        let outcome = resolve(ActivityType::Play, &mut stats, &mut diseases);

        // hunger 60 + 15 + 2 = 77 > 70
        assert_eq!(stats.hunger.get(), 77);
        assert_eq!(stats.happiness.get(), 69);
        assert_eq!(outcome.passive, StatDelta::new(-1, 0, 2));
    }

    #[test]
    fn summary_lists_base_penalty_and_cure() {
        let mut stats = PetStats::new(95, 80, 10);
        let mut diseases: Diseases = [DiseaseName::rash()].into_iter().collect();

        let outcome = resolve(ActivityType::Bathe, &mut stats, &mut diseases);

        assert_eq!(
            outcome.summary(),
            "+5 happiness; bath stress (-5 happiness); cured rash"
        );
    }

    #[test]
    fn stats_stay_in_range_for_every_activity_from_extremes() {
        for activity in ActivityType::all() {
            for stats in [PetStats::new(0, 0, 0), PetStats::new(100, 100, 100)] {
                let mut stats = stats;
                let mut diseases = Diseases::new();
                resolve(activity, &mut stats, &mut diseases);
                for value in [stats.happiness, stats.health, stats.hunger] {
                    assert!((0..=100).contains(&value.get()));
                }
            }
        }
    }
}
