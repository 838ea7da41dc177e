//! Ownership checks shared by the pet, hero and adoption use cases.
//!
//! A caller may touch a hero only if they own it, and a pet only if they own the
//! hero that owns the pet.

use std::sync::Arc;

use petpals_domain::{Hero, HeroId, Pet, PetId, UserId};

use crate::infrastructure::ports::{HeroRepo, PetRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
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
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct Ownership {
    pets: Arc<dyn PetRepo>,
    heroes: Arc<dyn HeroRepo>,
}

impl Ownership {
    pub fn new(pets: Arc<dyn PetRepo>, heroes: Arc<dyn HeroRepo>) -> Self {
        Self { pets, heroes }
    }

    /// Loads a hero the caller owns.
    pub async fn owned_hero(&self, caller: UserId, hero_id: HeroId) -> Result<Hero, AccessError> {
        let hero = self
            .heroes
            .get(hero_id)
            .await?
            .ok_or_else(|| AccessError::NotFound {
                entity_type: "Hero",
                id: hero_id.to_string(),
            })?;

        if !hero.is_owned_by(caller) {
            tracing::warn!(user_id = %caller, hero_id = %hero_id, "Hero access denied");
            return Err(AccessError::Forbidden {
                entity_type: "Hero",
                id: hero_id.to_string(),
            });
        }
        Ok(hero)
    }

    /// Loads a pet the caller owns through one of their heroes.
    ///
    /// A pet without an owner hero, or whose hero no longer exists, is forbidden.
    pub async fn owned_pet(&self, caller: UserId, pet_id: PetId) -> Result<Pet, AccessError> {
        let pet = self
            .pets
            .get(pet_id)
            .await?
            .ok_or_else(|| AccessError::NotFound {
                entity_type: "Pet",
                id: pet_id.to_string(),
            })?;

        let owner = match pet.owner_hero_id() {
            Some(hero_id) => self.heroes.get(hero_id).await?,
            None => None,
        };

        match owner {
            Some(hero) if hero.is_owned_by(caller) => Ok(pet),
            _ => {
                tracing::warn!(user_id = %caller, pet_id = %pet_id, "Pet access denied");
                Err(AccessError::Forbidden {
                    entity_type: "Pet",
                    id: pet_id.to_string(),
                })
            }
        }
    }

    /// Ids of every hero the caller owns.
    pub async fn hero_ids_of(&self, caller: UserId) -> Result<Vec<HeroId>, RepoError> {
        Ok(self
            .heroes
            .list_by_owner(caller)
            .await?
            .iter()
            .map(Hero::id)
            .collect())
    }
}
