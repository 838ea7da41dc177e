//! Hero management operations.

use std::sync::Arc;

use petpals_domain::{Hero, HeroAlias, HeroId, HeroName, UserId};
use petpals_shared::{CreateHeroRequest, UpdateHeroRequest};

use crate::infrastructure::ports::{AdoptionRepo, ClockPort, HeroRepo, PetRepo};
use crate::use_cases::access::Ownership;

use super::ManagementError;

pub struct HeroManagement {
    heroes: Arc<dyn HeroRepo>,
    pets: Arc<dyn PetRepo>,
    adoptions: Arc<dyn AdoptionRepo>,
    access: Arc<Ownership>,
    clock: Arc<dyn ClockPort>,
}

impl HeroManagement {
    pub fn new(
        heroes: Arc<dyn HeroRepo>,
        pets: Arc<dyn PetRepo>,
        adoptions: Arc<dyn AdoptionRepo>,
        access: Arc<Ownership>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            heroes,
            pets,
            adoptions,
            access,
            clock,
        }
    }

    pub async fn create(
        &self,
        caller: UserId,
        request: CreateHeroRequest,
    ) -> Result<Hero, ManagementError> {
        let name: HeroName = request
            .name
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid hero name: {}", e)))?;
        let alias: HeroAlias = request
            .alias
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid hero alias: {}", e)))?;

        let mut hero = Hero::new(
            self.heroes.next_id().await?,
            caller,
            name,
            alias,
            self.clock.now(),
        );
        hero.set_city(request.city);
        hero.set_team(request.team);
        self.heroes.save(&hero).await?;

        tracing::info!(hero_id = %hero.id(), user_id = %caller, "Hero created");
        Ok(hero)
    }

    /// Heroes owned by the caller.
    pub async fn list(&self, caller: UserId) -> Result<Vec<Hero>, ManagementError> {
        Ok(self.heroes.list_by_owner(caller).await?)
    }

    pub async fn get(&self, caller: UserId, id: HeroId) -> Result<Hero, ManagementError> {
        Ok(self.access.owned_hero(caller, id).await?)
    }

    /// Merges the provided fields into the hero. The id never changes.
    pub async fn update(
        &self,
        caller: UserId,
        id: HeroId,
        request: UpdateHeroRequest,
    ) -> Result<Hero, ManagementError> {
        let mut hero = self.access.owned_hero(caller, id).await?;

        if let Some(name) = request.name {
            let name: HeroName = name.try_into().map_err(|e| {
                ManagementError::InvalidInput(format!("Invalid hero name: {}", e))
            })?;
            hero.rename(name);
        }
        if let Some(alias) = request.alias {
            let alias: HeroAlias = alias.try_into().map_err(|e| {
                ManagementError::InvalidInput(format!("Invalid hero alias: {}", e))
            })?;
            hero.set_alias(alias);
        }
        if request.city.is_some() {
            hero.set_city(request.city);
        }
        if request.team.is_some() {
            hero.set_team(request.team);
        }

        self.heroes.save(&hero).await?;
        tracing::info!(hero_id = %id, "Hero updated");
        Ok(hero)
    }

    /// Deletes a hero that has never adopted a pet and no longer owns one.
    pub async fn delete(&self, caller: UserId, id: HeroId) -> Result<(), ManagementError> {
        self.access.owned_hero(caller, id).await?;

        if !self.adoptions.list_by_hero(id).await?.is_empty() {
            return Err(ManagementError::Conflict(format!(
                "Hero {} has adopted pets and cannot be deleted",
                id
            )));
        }

        let owned_pets = self
            .pets
            .list()
            .await?
            .iter()
            .filter(|pet| pet.owner_hero_id() == Some(id))
            .count();
        if owned_pets > 0 {
            return Err(ManagementError::Conflict(format!(
                "Hero {} still owns {} pet(s) and cannot be deleted",
                id, owned_pets
            )));
        }

        self.heroes.delete(id).await?;
        tracing::info!(hero_id = %id, "Hero deleted");
        Ok(())
    }

    /// The caller's heroes based in `city`, compared case-insensitively.
    pub async fn find_by_city(
        &self,
        caller: UserId,
        city: &str,
    ) -> Result<Vec<Hero>, ManagementError> {
        if city.trim().is_empty() {
            return Err(ManagementError::InvalidInput("City is required".to_string()));
        }
        Ok(self
            .heroes
            .list_by_owner(caller)
            .await?
            .into_iter()
            .filter(|hero| hero.is_in_city(city))
            .collect())
    }
}
