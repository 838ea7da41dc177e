//! Repository port traits for storage access.
//!
//! Every store is a mapping keyed by numeric id with get/upsert semantics. Writes are
//! last-write-wins; nothing here locks a record between a read and the following save.

use async_trait::async_trait;
use petpals_domain::{
    Adoption, AdoptionId, Email, Hero, HeroId, Pet, PetId, User, UserId,
};

use super::error::RepoError;

// =============================================================================
// Pets
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepo: Send + Sync {
    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepoError>;
    async fn list(&self) -> Result<Vec<Pet>, RepoError>;
    /// Insert or replace by id.
    async fn save(&self, pet: &Pet) -> Result<(), RepoError>;
    async fn delete(&self, id: PetId) -> Result<(), RepoError>;
    /// `max(id) + 1`, or 1 for an empty store.
    async fn next_id(&self) -> Result<PetId, RepoError>;
}

// =============================================================================
// Heroes
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HeroRepo: Send + Sync {
    async fn get(&self, id: HeroId) -> Result<Option<Hero>, RepoError>;
    async fn list(&self) -> Result<Vec<Hero>, RepoError>;
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Hero>, RepoError>;
    async fn save(&self, hero: &Hero) -> Result<(), RepoError>;
    async fn delete(&self, id: HeroId) -> Result<(), RepoError>;
    async fn next_id(&self) -> Result<HeroId, RepoError>;
}

// =============================================================================
// Adoptions
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Adoption>, RepoError>;
    async fn find_by_pet(&self, pet_id: PetId) -> Result<Option<Adoption>, RepoError>;
    async fn list_by_hero(&self, hero_id: HeroId) -> Result<Vec<Adoption>, RepoError>;
    /// Fails with `RepoError::ConstraintViolation` if another adoption already
    /// references the same pet.
    async fn save(&self, adoption: &Adoption) -> Result<(), RepoError>;
    async fn next_id(&self) -> Result<AdoptionId, RepoError>;
}

// =============================================================================
// Users
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepoError>;
    /// Fails with `RepoError::ConstraintViolation` if the email is taken by another user.
    async fn save(&self, user: &User) -> Result<(), RepoError>;
    async fn next_id(&self) -> Result<UserId, RepoError>;
}
