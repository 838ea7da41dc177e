//! Pet management operations.

use std::sync::Arc;

use petpals_domain::{AnimalKind, HeroId, Pet, PetId, PetName, Superpower, UserId};
use petpals_shared::{CreatePetRequest, UpdatePetRequest};

use crate::infrastructure::ports::{AdoptionRepo, ClockPort, PetRepo};
use crate::use_cases::access::Ownership;

use super::ManagementError;

pub struct PetManagement {
    pets: Arc<dyn PetRepo>,
    adoptions: Arc<dyn AdoptionRepo>,
    access: Arc<Ownership>,
    clock: Arc<dyn ClockPort>,
}

impl PetManagement {
    pub fn new(
        pets: Arc<dyn PetRepo>,
        adoptions: Arc<dyn AdoptionRepo>,
        access: Arc<Ownership>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            pets,
            adoptions,
            access,
            clock,
        }
    }

    /// Creates a pet for one of the caller's heroes, with default stats.
    pub async fn create(
        &self,
        caller: UserId,
        request: CreatePetRequest,
    ) -> Result<Pet, ManagementError> {
        let name: PetName = request
            .name
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid pet name: {}", e)))?;
        let animal: AnimalKind = request
            .animal
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid animal: {}", e)))?;
        let superpower: Superpower = request
            .superpower
            .try_into()
            .map_err(|e| ManagementError::InvalidInput(format!("Invalid superpower: {}", e)))?;

        let hero = self
            .access
            .owned_hero(caller, HeroId::new(request.hero_id))
            .await?;

        let pet = Pet::new(
            self.pets.next_id().await?,
            name,
            animal,
            superpower,
            Some(hero.id()),
            self.clock.now(),
        );
        self.pets.save(&pet).await?;

        tracing::info!(pet_id = %pet.id(), hero_id = %hero.id(), "Pet created");
        Ok(pet)
    }

    /// Pets owned by any of the caller's heroes.
    pub async fn list(&self, caller: UserId) -> Result<Vec<Pet>, ManagementError> {
        let hero_ids = self.access.hero_ids_of(caller).await?;
        Ok(self
            .pets
            .list()
            .await?
            .into_iter()
            .filter(|pet| pet.owner_hero_id().is_some_and(|id| hero_ids.contains(&id)))
            .collect())
    }

    pub async fn get(&self, caller: UserId, id: PetId) -> Result<Pet, ManagementError> {
        Ok(self.access.owned_pet(caller, id).await?)
    }

    /// Merges the provided profile fields into the pet. Simulation state is untouched.
    pub async fn update(
        &self,
        caller: UserId,
        id: PetId,
        request: UpdatePetRequest,
    ) -> Result<Pet, ManagementError> {
        let mut pet = self.access.owned_pet(caller, id).await?;

        if let Some(name) = request.name {
            let name: PetName = name
                .try_into()
                .map_err(|e| ManagementError::InvalidInput(format!("Invalid pet name: {}", e)))?;
            pet.rename(name);
        }
        if let Some(animal) = request.animal {
            let animal: AnimalKind = animal
                .try_into()
                .map_err(|e| ManagementError::InvalidInput(format!("Invalid animal: {}", e)))?;
            pet.set_animal(animal);
        }
        if let Some(superpower) = request.superpower {
            let superpower: Superpower = superpower.try_into().map_err(|e| {
                ManagementError::InvalidInput(format!("Invalid superpower: {}", e))
            })?;
            pet.set_superpower(superpower);
        }

        self.pets.save(&pet).await?;
        tracing::info!(pet_id = %id, "Pet updated");
        Ok(pet)
    }

    /// Deletes a pet that has not been adopted.
    pub async fn delete(&self, caller: UserId, id: PetId) -> Result<(), ManagementError> {
        self.access.owned_pet(caller, id).await?;

        if self.adoptions.find_by_pet(id).await?.is_some() {
            return Err(ManagementError::Conflict(format!(
                "Pet {} has been adopted and cannot be deleted",
                id
            )));
        }

        self.pets.delete(id).await?;
        tracing::info!(pet_id = %id, "Pet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockAdoptionRepo, MockHeroRepo, MockPetRepo};
    use crate::use_cases::management::test_support::{clock, hero, now, pet};
    use petpals_domain::{Adoption, AdoptionId, Personality, StatValue};

    fn management(
        pets: MockPetRepo,
        heroes: MockHeroRepo,
        adoptions: MockAdoptionRepo,
    ) -> PetManagement {
        let pets: Arc<dyn PetRepo> = Arc::new(pets);
        let access = Arc::new(Ownership::new(pets.clone(), Arc::new(heroes)));
        PetManagement::new(pets, Arc::new(adoptions), access, clock())
    }

    fn heroes_owned_by(owner: i64) -> MockHeroRepo {
        let mut heroes = MockHeroRepo::new();
        heroes
            .expect_get()
            .returning(move |id| Ok(Some(hero(id.value(), owner))));
        heroes
            .expect_list_by_owner()
            .returning(move |_| Ok(vec![hero(1, owner)]));
        heroes
    }

    fn create_request(hero_id: i64) -> CreatePetRequest {
        CreatePetRequest {
            name: "Krypto".to_string(),
            animal: "dog".to_string(),
            superpower: "flight".to_string(),
            hero_id,
        }
    }

    #[tokio::test]
    async fn when_created_pet_starts_with_default_stats() {
        let mut pets = MockPetRepo::new();
        pets.expect_next_id().returning(|| Ok(PetId::new(12)));
        pets.expect_save().times(1).returning(|_| Ok(()));

        let created = management(pets, heroes_owned_by(1), MockAdoptionRepo::new())
            .create(UserId::new(1), create_request(1))
            .await
            .unwrap();

        assert_eq!(created.id(), PetId::new(12));
        assert_eq!(created.owner_hero_id(), Some(HeroId::new(1)));
        assert_eq!(created.happiness(), StatValue::from(100));
        assert_eq!(created.health(), StatValue::from(100));
        assert_eq!(created.hunger(), StatValue::from(0));
        assert_eq!(created.personality(), &Personality::Happy);
        assert_eq!(created.last_interaction(), now());
    }

    #[tokio::test]
    async fn when_hero_belongs_to_someone_else_create_is_forbidden() {
        let mut pets = MockPetRepo::new();
        pets.expect_save().never();

        let result = management(pets, heroes_owned_by(1), MockAdoptionRepo::new())
            .create(UserId::new(2), create_request(1))
            .await;

        assert!(matches!(result, Err(ManagementError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn when_superpower_is_blank_returns_invalid_input() {
        let mut request = create_request(1);
        request.superpower = "   ".to_string();

        let result = management(MockPetRepo::new(), MockHeroRepo::new(), MockAdoptionRepo::new())
            .create(UserId::new(1), request)
            .await;

        assert!(matches!(result, Err(ManagementError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn list_only_returns_pets_of_callers_heroes() {
        let mut pets = MockPetRepo::new();
        pets.expect_list()
            .returning(|| Ok(vec![pet(1, 1), pet(2, 5), pet(3, 1)]));

        let listed = management(pets, heroes_owned_by(1), MockAdoptionRepo::new())
            .list(UserId::new(1))
            .await
            .unwrap();

        let ids: Vec<_> = listed.iter().map(Pet::id).collect();
        assert_eq!(ids, vec![PetId::new(1), PetId::new(3)]);
    }

    #[tokio::test]
    async fn when_update_is_partial_stats_are_untouched() {
        let mut pets = MockPetRepo::new();
        pets.expect_get().returning(|id| Ok(Some(pet(id.value(), 1))));
        pets.expect_save().times(1).returning(|_| Ok(()));

        let updated = management(pets, heroes_owned_by(1), MockAdoptionRepo::new())
            .update(
                UserId::new(1),
                PetId::new(1),
                UpdatePetRequest {
                    name: Some("Titus".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name().as_str(), "Titus");
        assert_eq!(updated.animal().as_str(), "dog");
        assert_eq!(updated.happiness(), StatValue::from(100));
    }

    #[tokio::test]
    async fn when_pet_is_adopted_delete_returns_conflict() {
        let mut pets = MockPetRepo::new();
        pets.expect_get().returning(|id| Ok(Some(pet(id.value(), 1))));
        pets.expect_delete().never();
        let mut adoptions = MockAdoptionRepo::new();
        adoptions.expect_find_by_pet().returning(|pet_id| {
            Ok(Some(
                Adoption::create(AdoptionId::new(1), HeroId::new(1), pet_id, now(), []).unwrap(),
            ))
        });

        let result = management(pets, heroes_owned_by(1), adoptions)
            .delete(UserId::new(1), PetId::new(1))
            .await;

        assert!(matches!(result, Err(ManagementError::Conflict(_))));
    }

    #[tokio::test]
    async fn when_pet_is_not_adopted_delete_removes_it() {
        let mut pets = MockPetRepo::new();
        pets.expect_get().returning(|id| Ok(Some(pet(id.value(), 1))));
        pets.expect_delete().times(1).returning(|_| Ok(()));
        let mut adoptions = MockAdoptionRepo::new();
        adoptions.expect_find_by_pet().returning(|_| Ok(None));

        let result = management(pets, heroes_owned_by(1), adoptions)
            .delete(UserId::new(1), PetId::new(1))
            .await;

        assert!(result.is_ok());
    }
}
