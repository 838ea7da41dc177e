//! In-memory storage.
//!
//! Keyed maps with the same get/upsert semantics as the SQLite store. Built once per
//! process and handed to the use cases explicitly; nothing here is a global.

use async_trait::async_trait;
use dashmap::DashMap;
use petpals_domain::{
    Adoption, AdoptionId, Email, Hero, HeroId, Pet, PetId, User, UserId,
};
use std::sync::Arc;

use crate::infrastructure::ports::{AdoptionRepo, HeroRepo, PetRepo, RepoError, UserRepo};

/// All in-memory repositories.
pub struct MemoryRepositories {
    pub pet: Arc<MemoryPetRepo>,
    pub hero: Arc<MemoryHeroRepo>,
    pub adoption: Arc<MemoryAdoptionRepo>,
    pub user: Arc<MemoryUserRepo>,
}

impl MemoryRepositories {
    pub fn new() -> Self {
        Self {
            pet: Arc::new(MemoryPetRepo::default()),
            hero: Arc::new(MemoryHeroRepo::default()),
            adoption: Arc::new(MemoryAdoptionRepo::default()),
            user: Arc::new(MemoryUserRepo::default()),
        }
    }
}

impl Default for MemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_values<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut entries: Vec<(i64, T)> = map
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    entries.sort_by_key(|(id, _)| *id);
    entries.into_iter().map(|(_, value)| value).collect()
}

fn next_key<T>(map: &DashMap<i64, T>) -> i64 {
    map.iter().map(|entry| *entry.key()).max().unwrap_or(0) + 1
}

// =============================================================================
// Pets
// =============================================================================

#[derive(Default)]
pub struct MemoryPetRepo {
    pets: DashMap<i64, Pet>,
}

#[async_trait]
impl PetRepo for MemoryPetRepo {
    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepoError> {
        Ok(self.pets.get(&id.value()).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Pet>, RepoError> {
        Ok(sorted_values(&self.pets))
    }

    async fn save(&self, pet: &Pet) -> Result<(), RepoError> {
        self.pets.insert(pet.id().value(), pet.clone());
        Ok(())
    }

    async fn delete(&self, id: PetId) -> Result<(), RepoError> {
        self.pets
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Pet", id))
    }

    async fn next_id(&self) -> Result<PetId, RepoError> {
        Ok(PetId::new(next_key(&self.pets)))
    }
}

// =============================================================================
// Heroes
// =============================================================================

#[derive(Default)]
pub struct MemoryHeroRepo {
    heroes: DashMap<i64, Hero>,
}

#[async_trait]
impl HeroRepo for MemoryHeroRepo {
    async fn get(&self, id: HeroId) -> Result<Option<Hero>, RepoError> {
        Ok(self.heroes.get(&id.value()).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Hero>, RepoError> {
        Ok(sorted_values(&self.heroes))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Hero>, RepoError> {
        Ok(sorted_values(&self.heroes)
            .into_iter()
            .filter(|hero| hero.is_owned_by(owner))
            .collect())
    }

    async fn save(&self, hero: &Hero) -> Result<(), RepoError> {
        self.heroes.insert(hero.id().value(), hero.clone());
        Ok(())
    }

    async fn delete(&self, id: HeroId) -> Result<(), RepoError> {
        self.heroes
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Hero", id))
    }

    async fn next_id(&self) -> Result<HeroId, RepoError> {
        Ok(HeroId::new(next_key(&self.heroes)))
    }
}

// =============================================================================
// Adoptions
// =============================================================================

#[derive(Default)]
pub struct MemoryAdoptionRepo {
    adoptions: DashMap<i64, Adoption>,
    /// pet id -> adoption id, the in-memory counterpart of the UNIQUE column.
    by_pet: DashMap<i64, i64>,
}

#[async_trait]
impl AdoptionRepo for MemoryAdoptionRepo {
    async fn list(&self) -> Result<Vec<Adoption>, RepoError> {
        Ok(sorted_values(&self.adoptions))
    }

    async fn find_by_pet(&self, pet_id: PetId) -> Result<Option<Adoption>, RepoError> {
        let Some(adoption_id) = self.by_pet.get(&pet_id.value()).map(|entry| *entry.value())
        else {
            return Ok(None);
        };
        Ok(self
            .adoptions
            .get(&adoption_id)
            .map(|entry| entry.value().clone()))
    }

    async fn list_by_hero(&self, hero_id: HeroId) -> Result<Vec<Adoption>, RepoError> {
        Ok(sorted_values(&self.adoptions)
            .into_iter()
            .filter(|adoption| adoption.hero_id() == hero_id)
            .collect())
    }

    async fn save(&self, adoption: &Adoption) -> Result<(), RepoError> {
        let id = adoption.id().value();
        // The entry guard holds the shard lock, so the check and claim are atomic.
        match self.by_pet.entry(adoption.pet_id().value()) {
            dashmap::mapref::entry::Entry::Occupied(existing) if *existing.get() != id => {
                return Err(RepoError::constraint(format!(
                    "Pet {} has already been adopted",
                    adoption.pet_id()
                )));
            }
            dashmap::mapref::entry::Entry::Occupied(_) => {}
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        self.adoptions.insert(id, adoption.clone());
        Ok(())
    }

    async fn next_id(&self) -> Result<AdoptionId, RepoError> {
        Ok(AdoptionId::new(next_key(&self.adoptions)))
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct MemoryUserRepo {
    users: DashMap<i64, User>,
    by_email: DashMap<String, i64>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(&id.value()).map(|entry| entry.value().clone()))
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepoError> {
        let Some(user_id) = self.by_email.get(email.as_str()).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let id = user.id().value();
        match self.by_email.entry(user.email().as_str().to_string()) {
            dashmap::mapref::entry::Entry::Occupied(existing) if *existing.get() != id => {
                return Err(RepoError::constraint(format!(
                    "Email {} is already registered",
                    user.email()
                )));
            }
            dashmap::mapref::entry::Entry::Occupied(_) => {}
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        self.users.insert(id, user.clone());
        Ok(())
    }

    async fn next_id(&self) -> Result<UserId, RepoError> {
        Ok(UserId::new(next_key(&self.users)))
    }
}
