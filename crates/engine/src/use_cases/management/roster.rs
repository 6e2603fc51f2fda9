//! Listing, viewing, activating and deleting characters.

use std::sync::Arc;

use charsheet_domain::{roster, Character, CharacterName, OwnerId};

use crate::infrastructure::ports::CharacterRepo;

use super::{load_character, ManagementError};

pub struct RosterManagement {
    repo: Arc<dyn CharacterRepo>,
}

impl RosterManagement {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    /// Every character of `owner`, ordered by name.
    pub async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, ManagementError> {
        Ok(self.repo.list(owner).await?)
    }

    pub async fn get(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Character, ManagementError> {
        load_character(self.repo.as_ref(), owner, name).await
    }

    pub async fn get_active(&self, owner: &OwnerId) -> Result<Option<Character>, ManagementError> {
        let characters = self.repo.list(owner).await?;
        Ok(roster::active(&characters).cloned())
    }

    /// Make `name` the owner's only active character.
    ///
    /// Previously active characters are saved first, so an interrupted
    /// sequence leaves zero active characters rather than two.
    pub async fn set_active(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Character, ManagementError> {
        let mut characters = self.repo.list(owner).await?;
        let changed = roster::promote(&mut characters, name)
            .ok_or_else(|| ManagementError::character_not_found(name))?;

        let (promoted, demoted): (Vec<&Character>, Vec<&Character>) = characters
            .iter()
            .filter(|c| changed.contains(c.name()))
            .partition(|c| c.is_active());

        for character in demoted.into_iter().chain(promoted) {
            if let Err(e) = self.repo.save(character).await {
                tracing::warn!(%owner, character = %character.name(), error = %e, "Failed to save active flag");
                return Err(ManagementError::persistence(e));
            }
        }

        tracing::info!(%owner, character = %name, "Active character set");
        characters
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ManagementError::character_not_found(name))
    }

    pub async fn delete(&self, owner: &OwnerId, name: &CharacterName) -> Result<(), ManagementError> {
        match self.repo.delete(owner, name).await {
            Ok(()) => {
                tracing::info!(%owner, character = %name, "Character deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(ManagementError::character_not_found(name)),
            Err(e) => {
                tracing::warn!(%owner, character = %name, error = %e, "Failed to delete character");
                Err(ManagementError::persistence(e))
            }
        }
    }
}
