//! Engine configuration from environment variables.

use petpals_domain::DiseasePenaltyMode;

/// Which storage backend to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store: StoreKind,
    pub db_path: String,
    pub disease_penalty_mode: DiseasePenaltyMode,
    /// `*` or a comma-separated origin list. `None` disables CORS handling.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            store: StoreKind::Sqlite,
            db_path: "petpals.db".to_string(),
            disease_penalty_mode: DiseasePenaltyMode::EveryRead,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => defaults.server_port,
        };

        let store = match get("PETPALS_STORE") {
            Some(raw) => match raw.to_lowercase().as_str() {
                "sqlite" => StoreKind::Sqlite,
                "memory" | "in-memory" | "in_memory" => StoreKind::Memory,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "PETPALS_STORE",
                        value: raw,
                    })
                }
            },
            None => defaults.store,
        };

        let disease_penalty_mode = match get("DISEASE_PENALTY_MODE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DISEASE_PENALTY_MODE",
                value: raw,
            })?,
            None => defaults.disease_penalty_mode,
        };

        Ok(Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            store,
            db_path: get("PETPALS_DB").unwrap_or(defaults.db_path),
            disease_penalty_mode,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        })
    }
}
