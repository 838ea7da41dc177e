//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique numeric identity assigned by the store
//! - Keeps its fields private and exposes behavior through methods
//! - Takes the current time as a parameter instead of reading a clock
//! - Returns reports from game mutations

pub mod adoption;
pub mod hero;
pub mod pet;
pub mod user;

pub use adoption::Adoption;
pub use hero::Hero;
pub use pet::{ActivityReport, ItemRecord, Pet, StatusReport};
pub use user::User;
