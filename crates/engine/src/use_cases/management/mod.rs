//! Management use cases for sheet operations.
//!
//! Every mutation follows the same sequence: load the record, apply the domain
//! operation, save the whole aggregate. A rejected operation or a failed write
//! never reaches the store half-applied.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterName, DomainError, OwnerId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

mod equipment;
mod roster;
mod sheet;
mod spells;

pub use equipment::EquipmentManagement;
pub use roster::RosterManagement;
pub use sheet::SheetManagement;
pub use spells::SpellManagement;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// A save or delete did not complete; the change was discarded
    #[error("Could not store changes: {0}")]
    PersistenceFailure(#[source] RepoError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ManagementError {
    pub fn character_not_found(name: &CharacterName) -> Self {
        Self::NotFound {
            entity_type: "Character",
            id: name.to_string(),
        }
    }

    pub fn persistence(error: RepoError) -> Self {
        Self::PersistenceFailure(error)
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub roster: RosterManagement,
    pub sheet: SheetManagement,
    pub equipment: EquipmentManagement,
    pub spells: SpellManagement,
}

impl ManagementUseCases {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self {
            roster: RosterManagement::new(repo.clone()),
            sheet: SheetManagement::new(repo.clone()),
            equipment: EquipmentManagement::new(repo.clone()),
            spells: SpellManagement::new(repo),
        }
    }
}

pub(crate) async fn load_character(
    repo: &dyn CharacterRepo,
    owner: &OwnerId,
    name: &CharacterName,
) -> Result<Character, ManagementError> {
    repo.load(owner, name)
        .await?
        .ok_or_else(|| ManagementError::character_not_found(name))
}

/// Load, apply `apply`, save. Returns the saved aggregate and the operation's
/// own result.
pub(crate) async fn modify_character<T, F>(
    repo: &dyn CharacterRepo,
    owner: &OwnerId,
    name: &CharacterName,
    operation: &'static str,
    apply: F,
) -> Result<(Character, T), ManagementError>
where
    F: FnOnce(&mut Character) -> Result<T, DomainError> + Send,
    T: Send,
{
    let mut character = load_character(repo, owner, name).await?;

    let outcome = match apply(&mut character) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(%owner, character = %name, operation, error = %e, "Operation rejected");
            return Err(e.into());
        }
    };

    if let Err(e) = repo.save(&character).await {
        tracing::warn!(%owner, character = %name, operation, error = %e, "Failed to save character");
        return Err(ManagementError::persistence(e));
    }

    tracing::info!(%owner, character = %name, operation, "Character updated");
    Ok((character, outcome))
}

#[cfg(test)]
pub(crate) mod test_support {
    use charsheet_domain::{Character, CharacterClass, CharacterName, OwnerId, Race};

    pub fn owner() -> OwnerId {
        OwnerId::new("user-1").unwrap()
    }

    pub fn name(value: &str) -> CharacterName {
        CharacterName::new(value).unwrap()
    }

    /// Level 1 wizard: DEX 14, CON 12, INT 16
    pub fn wizard(value: &str) -> Character {
        Character::create(
            owner(),
            name(value),
            Race::Elf,
            CharacterClass::Wizard,
            1,
            &[8, 14, 12, 16, 10, 11],
        )
        .unwrap()
    }
}
