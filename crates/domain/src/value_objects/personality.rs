//! Pet personality / mood label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical mood of a pet.
///
/// Game rules only ever produce the four named variants. `Custom` exists for the
/// test-only override path, which may set any label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Personality {
    #[default]
    Happy,
    Normal,
    Sad,
    Angry,
    Custom(String),
}

impl Personality {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Happy => "happy",
            Self::Normal => "normal",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Personality {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "happy" | "feliz" => Self::Happy,
            "normal" => Self::Normal,
            "sad" | "triste" => Self::Sad,
            "angry" | "enojado" => Self::Angry,
            _ => Self::Custom(value.trim().to_string()),
        }
    }
}

impl From<&str> for Personality {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Personality> for String {
    fn from(value: Personality) -> Self {
        value.as_str().to_string()
    }
}
