//! Hero aggregate - the player's character that adopts pets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{HeroId, UserId};
use crate::value_objects::{HeroAlias, HeroName};

/// A hero owned by a user.
///
/// # Invariants
///
/// - `owner_user_id` never changes after creation
/// - `city` and `team`, when present, are trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    id: HeroId,
    owner_user_id: UserId,
    name: HeroName,
    alias: HeroAlias,
    city: Option<String>,
    team: Option<String>,
    created_at: DateTime<Utc>,
}

impl Hero {
    pub fn new(
        id: HeroId,
        owner_user_id: UserId,
        name: HeroName,
        alias: HeroAlias,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_user_id,
            name,
            alias,
            city: None,
            team: None,
            created_at: now,
        }
    }

    /// Builder-style city setter.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.set_city(Some(city.into()));
        self
    }

    /// Builder-style team setter.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.set_team(Some(team.into()));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> HeroId {
        self.id
    }

    #[inline]
    pub fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    #[inline]
    pub fn name(&self) -> &HeroName {
        &self.name
    }

    #[inline]
    pub fn alias(&self) -> &HeroAlias {
        &self.alias
    }

    #[inline]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    #[inline]
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_user_id == user_id
    }

    /// Case-insensitive city match.
    pub fn is_in_city(&self, city: &str) -> bool {
        self.city
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(city.trim()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn rename(&mut self, name: HeroName) {
        self.name = name;
    }

    pub fn set_alias(&mut self, alias: HeroAlias) {
        self.alias = alias;
    }

    /// Blank values clear the city.
    pub fn set_city(&mut self, city: Option<String>) {
        self.city = normalize_optional(city);
    }

    /// Blank values clear the team.
    pub fn set_team(&mut self, team: Option<String>) {
        self.team = normalize_optional(team);
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
