//! Value objects shared by the pet aggregates and the simulation rules.

mod activity;
mod disease;
mod item;
mod names;
mod personality;
mod stat;

pub use activity::ActivityType;
pub use disease::{DiseaseName, Diseases};
pub use item::ItemType;
pub use names::{AnimalKind, Email, HeroAlias, HeroName, PetName, Superpower};
pub use personality::Personality;
pub use stat::{PetStats, StatDelta, StatValue};
