//! Pet aggregate - the virtual pet and its evolving state
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state only changes through the game operations below
//! - **Valid by construction**: stats are [`StatValue`]s, names are validated newtypes
//! - **Time is injected**: every mutation takes `now`, nothing reads the clock
//! - **Reports from mutations**: game operations return what happened

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{HeroId, PetId};
use crate::simulation::{
    disease, effects, hunger, personality, ActivityLog, ActivityRecord, ActivityTimestamps,
    CooldownGate, CooldownRejection, DiseasePenaltyMode, EffectOutcome,
};
use crate::value_objects::{
    ActivityType, AnimalKind, DiseaseName, Diseases, ItemType, PetName, PetStats, Personality,
    StatDelta, StatValue, Superpower,
};

/// One use of an item. The item list is a history, not a stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item: ItemType,
    pub used_at: DateTime<Utc>,
}

/// A virtual pet.
///
/// # Invariants
///
/// - `happiness`, `health` and `hunger` are always within `[0, 100]`
/// - `diseases` never holds the same disease twice
/// - `activity_history` and `items` are append-only
/// - `personality` is re-derived after every game operation; only
///   [`Pet::override_personality`] sets it directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    // Identity
    id: PetId,
    name: PetName,
    animal: AnimalKind,
    superpower: Superpower,
    owner_hero_id: Option<HeroId>,

    // Simulation state
    #[serde(flatten)]
    stats: PetStats,
    diseases: Diseases,
    /// Diseases already charged while the penalty runs in `once` mode.
    #[serde(default)]
    penalized_diseases: Diseases,
    items: Vec<ItemRecord>,
    personality: Personality,
    activity_history: ActivityLog,
    last_interaction: DateTime<Utc>,
    last_activity_timestamps: ActivityTimestamps,

    created_at: DateTime<Utc>,
}

/// Result of a successful activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    pub effect: EffectOutcome,
    pub record: ActivityRecord,
    pub contracted: Vec<DiseaseName>,
    pub hunger_grew: bool,
}

/// Result of a status read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub disease_penalty: StatDelta,
    pub hunger_grew: bool,
    pub starving: bool,
}

impl Pet {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// A fresh pet: happiness 100, health 100, hunger 0, happy, no history.
    pub fn new(
        id: PetId,
        name: PetName,
        animal: AnimalKind,
        superpower: Superpower,
        owner_hero_id: Option<HeroId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            animal,
            superpower,
            owner_hero_id,
            stats: PetStats::default(),
            diseases: Diseases::new(),
            penalized_diseases: Diseases::new(),
            items: Vec::new(),
            personality: Personality::Happy,
            activity_history: ActivityLog::new(),
            last_interaction: now,
            last_activity_timestamps: ActivityTimestamps::new(),
            created_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PetId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PetName {
        &self.name
    }

    #[inline]
    pub fn animal(&self) -> &AnimalKind {
        &self.animal
    }

    #[inline]
    pub fn superpower(&self) -> &Superpower {
        &self.superpower
    }

    #[inline]
    pub fn owner_hero_id(&self) -> Option<HeroId> {
        self.owner_hero_id
    }

    #[inline]
    pub fn stats(&self) -> PetStats {
        self.stats
    }

    #[inline]
    pub fn happiness(&self) -> StatValue {
        self.stats.happiness
    }

    #[inline]
    pub fn health(&self) -> StatValue {
        self.stats.health
    }

    #[inline]
    pub fn hunger(&self) -> StatValue {
        self.stats.hunger
    }

    #[inline]
    pub fn diseases(&self) -> &Diseases {
        &self.diseases
    }

    #[inline]
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    #[inline]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    #[inline]
    pub fn activity_history(&self) -> &ActivityLog {
        &self.activity_history
    }

    #[inline]
    pub fn last_interaction(&self) -> DateTime<Utc> {
        self.last_interaction
    }

    #[inline]
    pub fn last_activity_timestamps(&self) -> &ActivityTimestamps {
        &self.last_activity_timestamps
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn set_owner(&mut self, hero_id: HeroId) {
        self.owner_hero_id = Some(hero_id);
    }

    pub fn rename(&mut self, name: PetName) {
        self.name = name;
    }

    pub fn set_animal(&mut self, animal: AnimalKind) {
        self.animal = animal;
    }

    pub fn set_superpower(&mut self, superpower: Superpower) {
        self.superpower = superpower;
    }

    // =========================================================================
    // Game operations
    // =========================================================================

    /// Performs `activity` if its cooldown has elapsed.
    ///
    /// Order: cooldown gate, effect resolver, history append, disease rules, hunger
    /// model, personality. On rejection the pet is left untouched.
    pub fn perform_activity(
        &mut self,
        activity: ActivityType,
        gate: &CooldownGate,
        now: DateTime<Utc>,
    ) -> Result<ActivityReport, CooldownRejection> {
        gate.admit(&mut self.last_activity_timestamps, activity, now)?;

        let effect = effects::resolve(activity, &mut self.stats, &mut self.diseases);

        let record = ActivityRecord::new(activity, effect.summary(), now);
        self.activity_history.append(record.clone());
        let previous_interaction = self.last_interaction;
        self.last_interaction = now;

        let contracted = disease::evaluate(
            &mut self.diseases,
            &self.activity_history,
            activity,
            previous_interaction,
            now,
        );
        let hunger_grew = hunger::apply_time_growth(
            &mut self.stats,
            &self.activity_history,
            previous_interaction,
            now,
        );
        self.rederive_personality(now);

        Ok(ActivityReport {
            effect,
            record,
            contracted,
            hunger_grew,
        })
    }

    /// Applies the item's fixed effect and records its use.
    pub fn use_item(&mut self, item: ItemType, now: DateTime<Utc>) -> StatDelta {
        let effect = item.effect();
        self.stats.apply(effect);
        self.items.push(ItemRecord { item, used_at: now });
        self.last_interaction = now;
        self.rederive_personality(now);
        effect
    }

    /// Adds `disease`. Returns `false` if the pet already had it.
    pub fn mark_sick(&mut self, disease: DiseaseName, now: DateTime<Utc>) -> bool {
        let added = self.diseases.insert(disease);
        self.rederive_personality(now);
        added
    }

    /// Removes `disease`. Returns `false` if the pet did not have it.
    pub fn cure(&mut self, disease: &DiseaseName, now: DateTime<Utc>) -> bool {
        let removed = self.diseases.remove(disease);
        self.penalized_diseases.retain(|d| d != disease);
        self.rederive_personality(now);
        removed
    }

    /// Applies the lazy penalties a status read triggers.
    ///
    /// Order: disease penalty, time-based hunger, starvation penalty, personality.
    /// Does not count as an interaction.
    pub fn refresh_status(&mut self, mode: DiseasePenaltyMode, now: DateTime<Utc>) -> StatusReport {
        let disease_penalty = disease::apply_penalty(
            &mut self.stats,
            &self.diseases,
            &mut self.penalized_diseases,
            mode,
        );
        let hunger_grew = hunger::apply_time_growth(
            &mut self.stats,
            &self.activity_history,
            self.last_interaction,
            now,
        );
        let starving = hunger::apply_starvation_penalty(&mut self.stats);
        self.rederive_personality(now);

        StatusReport {
            disease_penalty,
            hunger_grew,
            starving,
        }
    }

    /// Sets the personality label verbatim. Test and admin use only; the next game
    /// operation derives it again.
    pub fn override_personality(&mut self, personality: Personality) {
        self.personality = personality;
    }

    fn rederive_personality(&mut self, now: DateTime<Utc>) {
        self.personality =
            personality::derive(&self.stats, &self.diseases, self.last_interaction, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    fn new_pet() -> Pet {
        Pet::new(
            PetId::new(1),
            PetName::new("Krypto").unwrap(),
            AnimalKind::new("dog").unwrap(),
            Superpower::new("flight").unwrap(),
            Some(HeroId::new(1)),
            t0(),
        )
    }

    fn stats_of(pet: &Pet) -> (i64, i64, i64) {
        (pet.happiness().get(), pet.health().get(), pet.hunger().get())
    }

    #[test]
    fn new_pet_has_default_state() {
        let pet = new_pet();
        assert_eq!(stats_of(&pet), (100, 100, 0));
        assert_eq!(pet.personality(), &Personality::Happy);
        assert!(pet.diseases().is_empty());
        assert!(pet.items().is_empty());
        assert!(pet.activity_history().is_empty());
    }

    #[test]
    fn feeding_a_new_pet_overfeeds_it() {
        let mut pet = new_pet();
        let now = t0() + Duration::minutes(1);

        let report = pet
            .perform_activity(ActivityType::Feed, &CooldownGate::default(), now)
            .unwrap();

        assert_eq!(stats_of(&pet), (90, 95, 2));
        assert_eq!(pet.personality(), &Personality::Happy);
        assert_eq!(pet.last_interaction(), now);
        assert_eq!(pet.activity_history().len(), 1);
        assert_eq!(
            report.record.to_string(),
            "feed - +10 happiness, +5 health, -20 hunger; overfeeding (-10 happiness, -5 health) - 2025-06-01T10:01:00.000Z"
        );
    }

    #[test]
    fn repeating_an_activity_inside_the_window_is_rejected_without_changes() {
        let mut pet = new_pet();
        let gate = CooldownGate::default();
        pet.perform_activity(ActivityType::Play, &gate, t0()).unwrap();
        let before = pet.clone();

        let err = pet
            .perform_activity(ActivityType::Play, &gate, t0() + Duration::seconds(2))
            .unwrap_err();

        assert_eq!(err.remaining_ms, 3_000);
        assert_eq!(pet, before);
    }

    #[test]
    fn starving_pet_loses_health_on_status_read() {
        let mut pet = new_pet();
        pet.stats = PetStats::new(100, 100, 85);

        let report = pet.refresh_status(DiseasePenaltyMode::EveryRead, t0());

        assert!(report.starving);
        assert_eq!(stats_of(&pet), (80, 90, 85));
    }

    #[test]
    fn bathing_cures_a_marked_rash() {
        let mut pet = new_pet();
        let gate = CooldownGate::default();
        pet.perform_activity(ActivityType::Bathe, &gate, t0()).unwrap();
        pet.mark_sick(DiseaseName::rash(), t0() + Duration::seconds(1));
        assert!(pet.diseases().contains(&DiseaseName::rash()));

        let report = pet
            .perform_activity(ActivityType::Bathe, &gate, t0() + Duration::seconds(10))
            .unwrap();

        assert_eq!(report.effect.cured, Some(DiseaseName::rash()));
        assert!(!pet.diseases().contains(&DiseaseName::rash()));
    }

    #[test]
    fn status_reads_compound_the_disease_penalty() {
        let mut pet = new_pet();
        pet.mark_sick(DiseaseName::new("flu").unwrap(), t0());

        pet.refresh_status(DiseasePenaltyMode::EveryRead, t0());
        pet.refresh_status(DiseasePenaltyMode::EveryRead, t0());

        assert_eq!(stats_of(&pet), (60, 80, 0));
    }

    #[test]
    fn once_mode_charges_a_disease_a_single_time() {
        let mut pet = new_pet();
        pet.mark_sick(DiseaseName::new("flu").unwrap(), t0());

        pet.refresh_status(DiseasePenaltyMode::Once, t0());
        pet.refresh_status(DiseasePenaltyMode::Once, t0());

        assert_eq!(stats_of(&pet), (80, 90, 0));
    }

    #[test]
    fn sick_then_cure_restores_previous_personality() {
        let mut pet = new_pet();
        let flu = DiseaseName::new("flu").unwrap();

        pet.mark_sick(flu.clone(), t0());
        assert_eq!(pet.personality(), &Personality::Sad);

        pet.cure(&flu, t0());
        assert!(pet.diseases().is_empty());
        assert_eq!(pet.personality(), &Personality::Happy);
    }

    #[test]
    fn marking_an_existing_disease_is_a_no_op() {
        let mut pet = new_pet();
        assert!(pet.mark_sick(DiseaseName::rash(), t0()));
        assert!(!pet.mark_sick(DiseaseName::rash(), t0()));
        assert_eq!(pet.diseases().len(), 1);
    }

    #[test]
    fn returning_after_two_days_weakens_and_angers_the_pet() {
        let mut pet = new_pet();
        let later = t0() + Duration::hours(30);

        let report = pet
            .perform_activity(ActivityType::Play, &CooldownGate::default(), later)
            .unwrap();

        // Idle over a day: weakness. Never fed since the last interaction: hunger +10.
        assert_eq!(report.contracted, vec![DiseaseName::weakness()]);
        assert!(report.hunger_grew);
        assert_eq!(pet.hunger().get(), 27);
        assert_eq!(pet.personality(), &Personality::Sad);
    }

    #[test]
    fn third_quick_feed_upsets_the_stomach() {
        let mut pet = new_pet();
        let gate = CooldownGate::default();
        for minutes in [0, 20, 40] {
            pet.perform_activity(ActivityType::Feed, &gate, t0() + Duration::minutes(minutes))
                .unwrap();
        }

        assert!(pet.diseases().contains(&DiseaseName::upset_stomach()));
    }

    #[test]
    fn playing_after_a_cure_does_not_bring_back_the_upset_stomach() {
        let mut pet = new_pet();
        let gate = CooldownGate::default();
        for minutes in [0, 20, 40] {
            pet.perform_activity(ActivityType::Feed, &gate, t0() + Duration::minutes(minutes))
                .unwrap();
        }
        pet.cure(&DiseaseName::upset_stomach(), t0() + Duration::minutes(45));

        let report = pet
            .perform_activity(ActivityType::Play, &gate, t0() + Duration::minutes(50))
            .unwrap();

        assert!(report.contracted.is_empty());
        assert!(!pet.diseases().contains(&DiseaseName::upset_stomach()));
    }

    #[test]
    fn using_an_item_applies_its_effect_and_records_it() {
        let mut pet = new_pet();
        pet.stats = PetStats::new(40, 40, 50);
        let now = t0() + Duration::minutes(5);

        pet.use_item(ItemType::MagicHat, now);

        assert_eq!(stats_of(&pet), (70, 55, 50));
        assert_eq!(
            pet.items(),
            &[ItemRecord {
                item: ItemType::MagicHat,
                used_at: now
            }]
        );
        assert_eq!(pet.last_interaction(), now);
        assert_eq!(pet.personality(), &Personality::Normal);
    }

    #[test]
    fn idle_pet_reads_as_angry_without_touching_last_interaction() {
        let mut pet = new_pet();
        let later = t0() + Duration::hours(25);

        pet.refresh_status(DiseasePenaltyMode::EveryRead, later);

        assert_eq!(pet.personality(), &Personality::Angry);
        assert_eq!(pet.last_interaction(), t0());
        // Unfed for over a day.
        assert_eq!(pet.hunger().get(), 10);
    }

    #[test]
    fn stats_stay_in_range_through_a_long_session() {
        let mut pet = new_pet();
        let gate = CooldownGate::default();
        let mut now = t0();
        for round in 0..200 {
            now += Duration::minutes(37);
            let activity = ActivityType::all()[round % 4];
            let _ = pet.perform_activity(activity, &gate, now);
            if round % 3 == 0 {
                pet.use_item(ItemType::all()[round % 5], now);
            }
            if round % 7 == 0 {
                pet.refresh_status(DiseasePenaltyMode::EveryRead, now + Duration::hours(30));
            }
            for value in [pet.happiness(), pet.health(), pet.hunger()] {
                assert!((0..=100).contains(&value.get()));
            }
        }
    }

    #[test]
    fn override_sets_any_label() {
        let mut pet = new_pet();
        pet.override_personality(Personality::from("playful"));
        assert_eq!(pet.personality().as_str(), "playful");
    }

    #[test]
    fn stored_document_round_trips() {
        let mut pet = new_pet();
        pet.perform_activity(ActivityType::Walk, &CooldownGate::default(), t0())
            .unwrap();
        pet.use_item(ItemType::Water, t0());

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["happiness"], 100);
        assert_eq!(json["owner_hero_id"], 1);

        let restored: Pet = serde_json::from_value(json).unwrap();
        assert_eq!(restored, pet);
    }
}
