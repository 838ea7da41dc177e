//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    memory::MemoryRepositories,
    ports::{AdoptionRepo, ClockPort, HeroRepo, PetRepo, UserRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for all repository ports, whichever store backs them.
#[derive(Clone)]
pub struct Repositories {
    pub pet: Arc<dyn PetRepo>,
    pub hero: Arc<dyn HeroRepo>,
    pub adoption: Arc<dyn AdoptionRepo>,
    pub user: Arc<dyn UserRepo>,
}

impl From<SqliteRepositories> for Repositories {
    fn from(repos: SqliteRepositories) -> Self {
        Self {
            pet: repos.pet,
            hero: repos.hero,
            adoption: repos.adoption,
            user: repos.user,
        }
    }
}

impl From<MemoryRepositories> for Repositories {
    fn from(repos: MemoryRepositories) -> Self {
        Self {
            pet: repos.pet,
            hero: repos.hero,
            adoption: repos.adoption,
            user: repos.user,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub pet_care: use_cases::PetCareUseCases,
    pub management: use_cases::ManagementUseCases,
    pub adoption: use_cases::AdoptionUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: Repositories, clock: Arc<dyn ClockPort>, config: EngineConfig) -> Self {
        let access = Arc::new(use_cases::Ownership::new(
            repos.pet.clone(),
            repos.hero.clone(),
        ));

        let pet_care = use_cases::PetCareUseCases::new(
            repos.pet.clone(),
            access.clone(),
            clock.clone(),
            config.disease_penalty_mode,
        );

        let management = use_cases::ManagementUseCases::new(
            use_cases::management::UserManagement::new(repos.user.clone(), clock.clone()),
            use_cases::management::HeroManagement::new(
                repos.hero.clone(),
                repos.pet.clone(),
                repos.adoption.clone(),
                access.clone(),
                clock.clone(),
            ),
            use_cases::management::PetManagement::new(
                repos.pet.clone(),
                repos.adoption.clone(),
                access.clone(),
                clock.clone(),
            ),
        );

        let adoption = use_cases::AdoptionUseCases::new(
            repos.adoption.clone(),
            repos.pet.clone(),
            repos.hero.clone(),
            access,
            clock,
        );

        Self {
            use_cases: UseCases {
                pet_care,
                management,
                adoption,
            },
            config,
        }
    }
}
