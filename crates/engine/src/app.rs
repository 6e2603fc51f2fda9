//! Application state and composition.

use std::sync::Arc;

use crate::config::{EngineConfig, StorageBackend};
use crate::infrastructure::{
    clock::SystemClock,
    persistence::{JsonFileCharacterRepo, SqliteCharacterRepo},
    ports::{CharacterRepo, ClockPort, RepoError},
};
use crate::use_cases::{CharacterCreation, ManagementUseCases};

/// Main application state.
///
/// Holds the use cases; shared by every front end.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub creation: CharacterCreation,
    pub management: ManagementUseCases,
}

impl App {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self {
            use_cases: UseCases {
                creation: CharacterCreation::new(repo.clone()),
                management: ManagementUseCases::new(repo),
            },
        }
    }

    /// Build the configured record store and compose the application.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, RepoError> {
        let repo: Arc<dyn CharacterRepo> = match config.storage {
            StorageBackend::Json => {
                tracing::info!(dir = %config.data_dir.display(), "Using JSON file record store");
                Arc::new(JsonFileCharacterRepo::new(config.data_dir.clone()))
            }
            StorageBackend::Sqlite => {
                tracing::info!(db = %config.db_path, "Using SQLite record store");
                let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
                Arc::new(SqliteCharacterRepo::new(&config.db_path, clock).await?)
            }
        };
        Ok(Self::new(repo))
    }
}
