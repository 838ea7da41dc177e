//! PetPals domain.
//!
//! Aggregates (`Pet`, `Hero`, `Adoption`, `User`), validated value objects, and the
//! pet state-evolution rules in [`simulation`]. This crate does no I/O.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod simulation;
pub mod value_objects;

pub use aggregates::{
    ActivityReport, Adoption, Hero, ItemRecord, Pet, StatusReport, User,
};
pub use error::DomainError;
pub use ids::{AdoptionId, HeroId, PetId, UserId};
pub use simulation::{
    ActivityLog, ActivityRecord, ActivityTimestamps, CooldownGate, CooldownRejection,
    DiseasePenaltyMode, EffectOutcome, OverusePenalty, COOLDOWN_WINDOW_MS,
};
pub use value_objects::{
    ActivityType, AnimalKind, DiseaseName, Diseases, Email, HeroAlias, HeroName, ItemType,
    PetName, PetStats, Personality, StatDelta, StatValue, Superpower,
};
