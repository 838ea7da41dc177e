//! Disease names and the per-pet disease set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A disease name (trimmed, lowercased, non-empty).
///
/// Arbitrary names are allowed so a pet can be marked sick with e.g. `flu`; the
/// rule engine only ever adds the four names exposed as constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiseaseName(String);

impl DiseaseName {
    pub const WEAKNESS: &'static str = "weakness";
    pub const UPSET_STOMACH: &'static str = "upset_stomach";
    pub const RASH: &'static str = "rash";
    pub const SADNESS: &'static str = "sadness";

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("Disease name cannot be empty"));
        }
        Ok(Self(normalized))
    }

    /// Not engaged with for over a day.
    pub fn weakness() -> Self {
        Self(Self::WEAKNESS.to_string())
    }

    /// Fed too often in a short window.
    pub fn upset_stomach() -> Self {
        Self(Self::UPSET_STOMACH.to_string())
    }

    /// Not bathed for two days. Cured by bathing.
    pub fn rash() -> Self {
        Self(Self::RASH.to_string())
    }

    /// Not walked for two days.
    pub fn sadness() -> Self {
        Self(Self::SADNESS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiseaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DiseaseName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DiseaseName> for String {
    fn from(name: DiseaseName) -> String {
        name.0
    }
}

/// Set of active diseases, kept in the order they were contracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DiseaseName>", into = "Vec<DiseaseName>")]
pub struct Diseases(Vec<DiseaseName>);

impl Diseases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `disease`. Returns `false` (and changes nothing) if it was already present.
    pub fn insert(&mut self, disease: DiseaseName) -> bool {
        if self.contains(&disease) {
            return false;
        }
        self.0.push(disease);
        true
    }

    /// Removes `disease`. Returns `false` if it was not present.
    pub fn remove(&mut self, disease: &DiseaseName) -> bool {
        let before = self.0.len();
        self.0.retain(|d| d != disease);
        self.0.len() != before
    }

    pub fn retain(&mut self, keep: impl FnMut(&DiseaseName) -> bool) {
        self.0.retain(keep);
    }

    pub fn contains(&self, disease: &DiseaseName) -> bool {
        self.0.iter().any(|d| d == disease)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseName> {
        self.0.iter()
    }
}

impl FromIterator<DiseaseName> for Diseases {
    fn from_iter<I: IntoIterator<Item = DiseaseName>>(iter: I) -> Self {
        let mut set = Diseases::new();
        for disease in iter {
            set.insert(disease);
        }
        set
    }
}

impl From<Vec<DiseaseName>> for Diseases {
    fn from(value: Vec<DiseaseName>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Diseases> for Vec<DiseaseName> {
    fn from(value: Diseases) -> Self {
        value.0
    }
}
