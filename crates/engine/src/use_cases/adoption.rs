//! Adoption use cases.
//!
//! An adoption links a hero to a pet permanently and makes the hero the pet's owner.
//! Only the pet's current owner can adopt it, through any of their heroes.
//! A pet can be adopted once; the store enforces this as well, so two concurrent
//! adoptions of the same pet cannot both succeed.

use std::collections::HashMap;
use std::sync::Arc;

use petpals_domain::{Adoption, Hero, HeroId, PetId, UserId};

use crate::infrastructure::ports::{AdoptionRepo, ClockPort, HeroRepo, PetRepo, RepoError};

use super::access::{AccessError, Ownership};

#[derive(Debug, thiserror::Error)]
pub enum AdoptionError {
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
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<AccessError> for AdoptionError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            AccessError::Forbidden { entity_type, id } => Self::Forbidden { entity_type, id },
            AccessError::Repo(e) => Self::Repo(e),
        }
    }
}

/// An adoption with the names of the hero and pet it links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionView {
    pub adoption: Adoption,
    pub hero_name: Option<String>,
    pub pet_name: Option<String>,
}

pub struct AdoptionUseCases {
    adoptions: Arc<dyn AdoptionRepo>,
    pets: Arc<dyn PetRepo>,
    heroes: Arc<dyn HeroRepo>,
    access: Arc<Ownership>,
    clock: Arc<dyn ClockPort>,
}

impl AdoptionUseCases {
    pub fn new(
        adoptions: Arc<dyn AdoptionRepo>,
        pets: Arc<dyn PetRepo>,
        heroes: Arc<dyn HeroRepo>,
        access: Arc<Ownership>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            adoptions,
            pets,
            heroes,
            access,
            clock,
        }
    }

    /// Adopts `pet_id` for one of the caller's heroes.
    ///
    /// Checks, in order: hero exists, pet exists, caller owns the hero, caller owns the
    /// pet's current hero (if it has one), pet not yet adopted.
    pub async fn adopt(
        &self,
        caller: UserId,
        hero_id: HeroId,
        pet_id: PetId,
    ) -> Result<AdoptionView, AdoptionError> {
        let hero = self
            .heroes
            .get(hero_id)
            .await?
            .ok_or_else(|| AdoptionError::NotFound {
                entity_type: "Hero",
                id: hero_id.to_string(),
            })?;
        let mut pet = self
            .pets
            .get(pet_id)
            .await?
            .ok_or_else(|| AdoptionError::NotFound {
                entity_type: "Pet",
                id: pet_id.to_string(),
            })?;

        if !hero.is_owned_by(caller) {
            tracing::warn!(user_id = %caller, hero_id = %hero_id, "Adoption denied");
            return Err(AdoptionError::Forbidden {
                entity_type: "Hero",
                id: hero_id.to_string(),
            });
        }

        if let Some(owner) = pet.owner_hero_id().filter(|owner| *owner != hero_id) {
            let owns_pet = self
                .heroes
                .get(owner)
                .await?
                .is_some_and(|owner| owner.is_owned_by(caller));
            if !owns_pet {
                tracing::warn!(
                    user_id = %caller,
                    pet_id = %pet_id,
                    "Adoption of another user's pet denied"
                );
                return Err(AdoptionError::Forbidden {
                    entity_type: "Pet",
                    id: pet_id.to_string(),
                });
            }
        }

        let existing = self.adoptions.find_by_pet(pet_id).await?;
        let adoption = Adoption::create(
            self.adoptions.next_id().await?,
            hero_id,
            pet_id,
            self.clock.now(),
            existing.iter(),
        )
        .map_err(|e| AdoptionError::Conflict(e.to_string()))?;

        self.adoptions.save(&adoption).await.map_err(|e| match e {
            RepoError::ConstraintViolation(msg) => AdoptionError::Conflict(msg),
            other => AdoptionError::Repo(other),
        })?;

        pet.set_owner(hero_id);
        self.pets.save(&pet).await?;

        tracing::info!(
            adoption_id = %adoption.id(),
            hero_id = %hero_id,
            pet_id = %pet_id,
            "Pet adopted"
        );

        Ok(AdoptionView {
            adoption,
            hero_name: Some(hero.name().to_string()),
            pet_name: Some(pet.name().to_string()),
        })
    }

    /// Adoptions made by any of the caller's heroes.
    pub async fn list(&self, caller: UserId) -> Result<Vec<AdoptionView>, AdoptionError> {
        let heroes = self.heroes.list_by_owner(caller).await?;
        let mut adoptions = Vec::new();
        for hero in &heroes {
            adoptions.extend(self.adoptions.list_by_hero(hero.id()).await?);
        }
        adoptions.sort_by_key(Adoption::id);
        self.views(adoptions, &heroes).await
    }

    pub async fn by_hero(
        &self,
        caller: UserId,
        hero_id: HeroId,
    ) -> Result<Vec<AdoptionView>, AdoptionError> {
        let hero = self.access.owned_hero(caller, hero_id).await?;
        let adoptions = self.adoptions.list_by_hero(hero_id).await?;
        self.views(adoptions, std::slice::from_ref(&hero)).await
    }

    pub async fn by_pet(
        &self,
        caller: UserId,
        pet_id: PetId,
    ) -> Result<AdoptionView, AdoptionError> {
        self.access.owned_pet(caller, pet_id).await?;
        let adoption =
            self.adoptions
                .find_by_pet(pet_id)
                .await?
                .ok_or_else(|| AdoptionError::NotFound {
                    entity_type: "Adoption",
                    id: format!("pet {}", pet_id),
                })?;

        let hero = self.heroes.get(adoption.hero_id()).await?;
        let mut views = self.views(vec![adoption], hero.as_slice()).await?;
        views.pop().ok_or_else(|| AdoptionError::NotFound {
            entity_type: "Adoption",
            id: format!("pet {}", pet_id),
        })
    }

    async fn views(
        &self,
        adoptions: Vec<Adoption>,
        heroes: &[Hero],
    ) -> Result<Vec<AdoptionView>, AdoptionError> {
        let hero_names: HashMap<HeroId, String> = heroes
            .iter()
            .map(|hero| (hero.id(), hero.name().to_string()))
            .collect();

        let mut views = Vec::with_capacity(adoptions.len());
        for adoption in adoptions {
            let pet_name = self
                .pets
                .get(adoption.pet_id())
                .await?
                .map(|pet| pet.name().to_string());
            views.push(AdoptionView {
                hero_name: hero_names.get(&adoption.hero_id()).cloned(),
                pet_name,
                adoption,
            });
        }
        Ok(views)
    }
}
