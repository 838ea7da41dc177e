//! Care activities a pet owner can perform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the four timed care actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Feed,
    Walk,
    Bathe,
    Play,
}

impl ActivityType {
    pub fn all() -> [ActivityType; 4] {
        [Self::Feed, Self::Walk, Self::Bathe, Self::Play]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Walk => "walk",
            Self::Bathe => "bathe",
            Self::Play => "play",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = DomainError;

    /// Accepts the English identifiers and the legacy Spanish ones
    /// (`alimentar`, `pasear`, `bañar`, `jugar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feed" | "alimentar" => Ok(Self::Feed),
            "walk" | "pasear" => Ok(Self::Walk),
            "bathe" | "bañar" | "banar" => Ok(Self::Bathe),
            "play" | "jugar" => Ok(Self::Play),
            _ => Err(DomainError::parse(format!(
                "Unknown activity: '{}'. Valid values: feed, walk, bathe, play",
                s
            ))),
        }
    }
}
