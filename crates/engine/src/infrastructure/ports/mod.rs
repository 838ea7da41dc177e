//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage of pets, heroes, adoptions and users (SQLite or in-memory)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{AdoptionRepo, HeroRepo, PetRepo, UserRepo};
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::{MockAdoptionRepo, MockHeroRepo, MockPetRepo, MockUserRepo};
#[cfg(test)]
pub use testing::MockClockPort;
