//! PetPals Shared - wire types for the HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde and serde_json
//! 2. **No business logic** - pure data types and serialization
//! 3. **No domain types** - raw `i64` ids and string labels; the engine converts

pub mod requests;
pub mod responses;

pub use requests::{
    ActivityRequest, AdoptRequest, CreateHeroRequest, CreatePetRequest, DiseaseRequest,
    PersonalityRequest, RegisterUserRequest, UpdateHeroRequest, UpdatePetRequest, UseItemRequest,
};
pub use responses::{
    ActivityResponse, AdoptionResponse, ErrorResponse, HeroResponse, ItemUseResponse,
    ItemsResponse, PetResponse, UseItemResponse, UserResponse,
};
