//! Pet care use cases: activities, items, sickness and status reads.
//!
//! Each call loads the pet, runs one domain operation and saves the whole pet back.
//! There is no lock between the load and the save, so two concurrent calls on the same
//! pet race and the later save wins.

use std::str::FromStr;
use std::sync::Arc;

use petpals_domain::{
    ActivityReport, ActivityType, CooldownGate, CooldownRejection, DiseaseName,
    DiseasePenaltyMode, ItemRecord, ItemType, Personality, Pet, PetId, UserId,
};

use crate::infrastructure::ports::{ClockPort, PetRepo, RepoError};

use super::access::{AccessError, Ownership};

#[derive(Debug, thiserror::Error)]
pub enum PetCareError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("You do not have permission to access {entity_type} {id}")]
    Forbidden {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Cooldown(#[from] CooldownRejection),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<AccessError> for PetCareError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            AccessError::Forbidden { entity_type, id } => Self::Forbidden { entity_type, id },
            AccessError::Repo(e) => Self::Repo(e),
        }
    }
}

/// A performed activity and the pet it left behind.
#[derive(Debug, Clone)]
pub struct PerformedActivity {
    pub pet: Pet,
    pub report: ActivityReport,
}

pub struct PetCareUseCases {
    pets: Arc<dyn PetRepo>,
    access: Arc<Ownership>,
    clock: Arc<dyn ClockPort>,
    gate: CooldownGate,
    penalty_mode: DiseasePenaltyMode,
}

impl PetCareUseCases {
    pub fn new(
        pets: Arc<dyn PetRepo>,
        access: Arc<Ownership>,
        clock: Arc<dyn ClockPort>,
        penalty_mode: DiseasePenaltyMode,
    ) -> Self {
        Self {
            pets,
            access,
            clock,
            gate: CooldownGate::default(),
            penalty_mode,
        }
    }

    /// Performs an activity named by the caller (`feed`, `walk`, `bathe`, `play` or the
    /// legacy Spanish names).
    pub async fn perform_activity(
        &self,
        caller: UserId,
        pet_id: PetId,
        activity: &str,
    ) -> Result<PerformedActivity, PetCareError> {
        if activity.trim().is_empty() {
            return Err(PetCareError::InvalidInput(
                "Activity type is required".to_string(),
            ));
        }
        let activity = ActivityType::from_str(activity)
            .map_err(|e| PetCareError::InvalidInput(e.to_string()))?;

        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        let now = self.clock.now();

        let report = match pet.perform_activity(activity, &self.gate, now) {
            Ok(report) => report,
            Err(rejection) => {
                tracing::warn!(
                    pet_id = %pet_id,
                    activity = %activity,
                    remaining_ms = rejection.remaining_ms,
                    "Activity rejected by cooldown"
                );
                return Err(rejection.into());
            }
        };

        self.pets.save(&pet).await?;

        tracing::info!(
            pet_id = %pet_id,
            activity = %activity,
            effect = %report.record.effect,
            personality = %pet.personality(),
            "Activity performed"
        );
        for disease in &report.contracted {
            tracing::info!(pet_id = %pet_id, disease = %disease, "Pet fell sick");
        }
        if report.hunger_grew {
            tracing::debug!(pet_id = %pet_id, hunger = %pet.hunger(), "Hunger grew with time");
        }

        Ok(PerformedActivity { pet, report })
    }

    pub async fn use_item(
        &self,
        caller: UserId,
        pet_id: PetId,
        item: &str,
    ) -> Result<Pet, PetCareError> {
        if item.trim().is_empty() {
            return Err(PetCareError::InvalidInput("Item type is required".to_string()));
        }
        let item =
            ItemType::from_str(item).map_err(|e| PetCareError::InvalidInput(e.to_string()))?;

        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        let effect = pet.use_item(item, self.clock.now());
        self.pets.save(&pet).await?;

        tracing::info!(pet_id = %pet_id, item = %item, effect = %effect, "Item used");
        Ok(pet)
    }

    pub async fn mark_sick(
        &self,
        caller: UserId,
        pet_id: PetId,
        disease: &str,
    ) -> Result<Pet, PetCareError> {
        let disease = parse_disease(disease)?;

        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        let added = pet.mark_sick(disease.clone(), self.clock.now());
        self.pets.save(&pet).await?;

        if added {
            tracing::info!(pet_id = %pet_id, disease = %disease, "Disease added");
        } else {
            tracing::debug!(pet_id = %pet_id, disease = %disease, "Pet already had disease");
        }
        Ok(pet)
    }

    pub async fn cure(
        &self,
        caller: UserId,
        pet_id: PetId,
        disease: &str,
    ) -> Result<Pet, PetCareError> {
        let disease = parse_disease(disease)?;

        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        let removed = pet.cure(&disease, self.clock.now());
        self.pets.save(&pet).await?;

        if removed {
            tracing::info!(pet_id = %pet_id, disease = %disease, "Disease cured");
        } else {
            tracing::debug!(pet_id = %pet_id, disease = %disease, "Pet did not have disease");
        }
        Ok(pet)
    }

    /// Reads the pet's status, applying the penalties that accrue lazily on read.
    pub async fn status(&self, caller: UserId, pet_id: PetId) -> Result<Pet, PetCareError> {
        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        let report = pet.refresh_status(self.penalty_mode, self.clock.now());
        self.pets.save(&pet).await?;

        tracing::debug!(
            pet_id = %pet_id,
            disease_penalty = %report.disease_penalty,
            hunger_grew = report.hunger_grew,
            starving = report.starving,
            personality = %pet.personality(),
            "Status refreshed"
        );
        Ok(pet)
    }

    /// Sets the personality label verbatim.
    pub async fn override_personality(
        &self,
        caller: UserId,
        pet_id: PetId,
        label: &str,
    ) -> Result<Pet, PetCareError> {
        if label.trim().is_empty() {
            return Err(PetCareError::InvalidInput(
                "Personality is required".to_string(),
            ));
        }
        let personality = Personality::from(label);

        let mut pet = self.access.owned_pet(caller, pet_id).await?;
        pet.override_personality(personality);
        self.pets.save(&pet).await?;

        tracing::info!(pet_id = %pet_id, personality = %pet.personality(), "Personality overridden");
        Ok(pet)
    }

    /// Item use history, oldest first.
    pub async fn items(
        &self,
        caller: UserId,
        pet_id: PetId,
    ) -> Result<Vec<ItemRecord>, PetCareError> {
        let pet = self.access.owned_pet(caller, pet_id).await?;
        Ok(pet.items().to_vec())
    }
}

fn parse_disease(raw: &str) -> Result<DiseaseName, PetCareError> {
    DiseaseName::new(raw).map_err(|e| PetCareError::InvalidInput(e.to_string()))
}
