//! Response bodies for the HTTP API.
//!
//! Timestamps are RFC 3339 strings so this crate needs nothing beyond serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Errors
// =============================================================================

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Remaining cooldown in milliseconds, only on 429.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<i64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            cooldown: None,
        }
    }

    pub fn cooldown(error: impl Into<String>, remaining_ms: i64) -> Self {
        Self {
            error: error.into(),
            cooldown: Some(remaining_ms),
        }
    }
}

// =============================================================================
// Users and heroes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroResponse {
    pub id: i64,
    pub owner_user_id: i64,
    pub name: String,
    pub alias: String,
    pub city: Option<String>,
    pub team: Option<String>,
    pub created_at: String,
}

// =============================================================================
// Pets
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUseResponse {
    pub item: String,
    pub used_at: String,
}

/// Full pet state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: i64,
    pub name: String,
    pub animal: String,
    pub superpower: String,
    pub owner_hero_id: Option<i64>,
    pub happiness: i64,
    pub health: i64,
    pub hunger: i64,
    pub personality: String,
    pub diseases: Vec<String>,
    pub items: Vec<ItemUseResponse>,
    /// `{activity} - {effect} - {timestamp}` lines, oldest first.
    pub activity_history: Vec<String>,
    pub last_interaction: String,
    /// Last invocation per activity type.
    pub last_activity: BTreeMap<String, String>,
    pub created_at: String,
}

/// Returned by `POST /api/pets/{id}/activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub pet: PetResponse,
    /// Summary of what the activity did.
    pub effect: String,
    /// Diseases contracted as a result of this activity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contracted: Vec<String>,
}

/// Returned by `POST /api/pets/{id}/item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseItemResponse {
    pub pet: PetResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemUseResponse>,
}

// =============================================================================
// Adoptions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionResponse {
    pub id: i64,
    pub hero_id: i64,
    pub pet_id: i64,
    pub adopted_at: String,
    pub hero_name: Option<String>,
    pub pet_name: Option<String>,
}
