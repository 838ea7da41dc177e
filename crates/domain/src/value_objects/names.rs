//! Validated text newtypes for domain entities
//!
//! These newtypes ensure that required text fields are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name-like fields
const MAX_NAME_LENGTH: usize = 200;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new validated ", $label, ".")]
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the value is empty after trimming
            /// or exceeds 200 characters.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if trimmed.chars().count() > MAX_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_NAME_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

define_name!(
    /// A validated pet name (non-empty, <=200 chars, trimmed)
    PetName,
    "Pet name"
);
define_name!(
    /// The kind of animal a pet is ("dog", "dragon", ...)
    AnimalKind,
    "Animal kind"
);
define_name!(
    /// A pet's superpower
    Superpower,
    "Superpower"
);
define_name!(
    /// A validated hero name
    HeroName,
    "Hero name"
);
define_name!(
    /// A hero's public alias
    HeroAlias,
    "Hero alias"
);

/// A user's email address (trimmed, lowercased, must contain `@`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();
        let valid = match normalized.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        };
        if !valid {
            return Err(DomainError::validation(format!(
                "Invalid email address: '{}'",
                value
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}
