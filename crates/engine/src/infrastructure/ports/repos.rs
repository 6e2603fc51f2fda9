//! Record store port.

use async_trait::async_trait;
use charsheet_domain::{Character, CharacterName, OwnerId};

use super::error::RepoError;

/// Keyed persistence of characters by (owner, name).
///
/// `save` is atomic: after a failure a subsequent `load` still sees the prior
/// state in full.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    /// `Ok(None)` when the owner has no character with that name.
    async fn load(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Option<Character>, RepoError>;

    /// Insert or replace the record keyed by the character's owner and name.
    async fn save(&self, character: &Character) -> Result<(), RepoError>;

    /// Every character of `owner`, ordered by name.
    async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, RepoError>;

    /// `RepoError::NotFound` when there is nothing to delete.
    async fn delete(&self, owner: &OwnerId, name: &CharacterName) -> Result<(), RepoError>;
}
