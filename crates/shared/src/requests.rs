//! Request bodies for the HTTP API.
//!
//! Field names are camelCase on the wire. The Spanish field names used by older
//! clients are accepted as aliases. Free-text identifiers (activity, item, disease)
//! stay as strings here; the engine parses them so unknown values map to a 400.

use serde::{Deserialize, Serialize};

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
}

// =============================================================================
// Heroes
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeroRequest {
    pub name: String,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// Merge update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

// =============================================================================
// Pets
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub animal: String,
    pub superpower: String,
    #[serde(alias = "superheroeId")]
    pub hero_id: i64,
}

/// Merge update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superpower: Option<String>,
}

/// `effects` sent by older clients is ignored; effects are decided server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(default, alias = "actividad")]
    pub activity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseItemRequest {
    #[serde(default, alias = "item")]
    pub item_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRequest {
    #[serde(default, alias = "enfermedad")]
    pub disease: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityRequest {
    #[serde(default, alias = "personalidad")]
    pub personality: String,
}

// =============================================================================
// Adoptions
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptRequest {
    pub hero_id: i64,
    pub pet_id: i64,
}
