//! Usable items and their fixed effects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::StatDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    BasicFood,
    Water,
    NeonGlasses,
    RedCape,
    MagicHat,
}

impl ItemType {
    pub fn all() -> [ItemType; 5] {
        [
            Self::BasicFood,
            Self::Water,
            Self::NeonGlasses,
            Self::RedCape,
            Self::MagicHat,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicFood => "basic_food",
            Self::Water => "water",
            Self::NeonGlasses => "neon_glasses",
            Self::RedCape => "red_cape",
            Self::MagicHat => "magic_hat",
        }
    }

    /// Fixed stat effect of using this item.
    pub fn effect(&self) -> StatDelta {
        match self {
            Self::BasicFood => StatDelta::new(10, 0, -20),
            Self::Water => StatDelta::new(5, 5, 0),
            Self::NeonGlasses => StatDelta::new(15, 5, 0),
            Self::RedCape => StatDelta::new(25, 10, 0),
            Self::MagicHat => StatDelta::new(30, 15, 0),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DomainError;

    /// Accepts the English identifiers and the legacy Spanish shop names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic_food" | "comida_basica" => Ok(Self::BasicFood),
            "water" | "agua" => Ok(Self::Water),
            "neon_glasses" | "gafas_neon" => Ok(Self::NeonGlasses),
            "red_cape" | "capa_roja" => Ok(Self::RedCape),
            "magic_hat" | "sombrero_magico" => Ok(Self::MagicHat),
            _ => Err(DomainError::parse(format!(
                "Unknown item type: '{}'. Valid values: basic_food, water, neon_glasses, \
                red_cape, magic_hat",
                s
            ))),
        }
    }
}
