//! Engine configuration

use std::env;
use std::path::PathBuf;

use charsheet_domain::OwnerId;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be one of {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Record store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per character
    Json,
    /// One row per character in a SQLite database
    Sqlite,
}

/// Engine configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Storage backend: "json" or "sqlite"
    pub storage: StorageBackend,
    /// Root directory of the JSON record store
    pub data_dir: PathBuf,
    /// SQLite database path (if using sqlite backend)
    pub db_path: String,
    /// Owner identifier used by the console front end
    pub owner: OwnerId,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let storage = match var("CHARSHEET_STORAGE", "json").to_lowercase().as_str() {
            "json" => StorageBackend::Json,
            "sqlite" => StorageBackend::Sqlite,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "CHARSHEET_STORAGE",
                    expected: "json, sqlite",
                    value: other.to_string(),
                })
            }
        };

        let owner_raw = var("CHARSHEET_OWNER", "local");
        let owner = OwnerId::new(owner_raw.clone()).map_err(|_| ConfigError::InvalidValue {
            key: "CHARSHEET_OWNER",
            expected: "a non-empty identifier",
            value: owner_raw,
        })?;

        Ok(Self {
            storage,
            data_dir: PathBuf::from(var("CHARSHEET_DATA_DIR", "characters")),
            db_path: var("CHARSHEET_DB", "characters.db"),
            owner,
        })
    }
}
