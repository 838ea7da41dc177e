//! Adoption - the permanent link between a hero and a pet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AdoptionId, HeroId, PetId};

/// An adoption record. There is no un-adopt operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoption {
    id: AdoptionId,
    hero_id: HeroId,
    pet_id: PetId,
    adopted_at: DateTime<Utc>,
}

impl Adoption {
    /// Creates an adoption after checking the pet has not been adopted yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if any record in `existing` already
    /// references `pet_id`.
    pub fn create<'a>(
        id: AdoptionId,
        hero_id: HeroId,
        pet_id: PetId,
        adopted_at: DateTime<Utc>,
        existing: impl IntoIterator<Item = &'a Adoption>,
    ) -> Result<Self, DomainError> {
        if existing.into_iter().any(|a| a.pet_id == pet_id) {
            return Err(DomainError::constraint(format!(
                "Pet {pet_id} has already been adopted"
            )));
        }
        Ok(Self {
            id,
            hero_id,
            pet_id,
            adopted_at,
        })
    }

    #[inline]
    pub fn id(&self) -> AdoptionId {
        self.id
    }

    #[inline]
    pub fn hero_id(&self) -> HeroId {
        self.hero_id
    }

    #[inline]
    pub fn pet_id(&self) -> PetId {
        self.pet_id
    }

    #[inline]
    pub fn adopted_at(&self) -> DateTime<Utc> {
        self.adopted_at
    }
}
