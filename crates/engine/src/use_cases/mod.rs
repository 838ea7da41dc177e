//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Use cases load aggregates
//! through the port traits, run domain operations and save the results.

pub mod access;
pub mod adoption;
pub mod management;
pub mod pet_care;

pub use access::{AccessError, Ownership};
pub use adoption::{AdoptionError, AdoptionUseCases, AdoptionView};
pub use management::{ManagementError, ManagementUseCases};
pub use pet_care::{PerformedActivity, PetCareError, PetCareUseCases};
