//! Management use cases for CRUD-style operations on users, heroes and pets.

mod hero;
mod pet;
mod user;

pub use hero::HeroManagement;
pub use pet::PetManagement;
pub use user::UserManagement;

use crate::infrastructure::ports::RepoError;

use super::access::AccessError;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
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
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<AccessError> for ManagementError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            AccessError::Forbidden { entity_type, id } => Self::Forbidden { entity_type, id },
            AccessError::Repo(e) => Self::Repo(e),
        }
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub user: UserManagement,
    pub hero: HeroManagement,
    pub pet: PetManagement,
}

impl ManagementUseCases {
    pub fn new(user: UserManagement, hero: HeroManagement, pet: PetManagement) -> Self {
        Self { user, hero, pet }
    }
}
