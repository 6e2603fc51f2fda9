//! Character creation.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterDraft, DomainError, OwnerId};

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::management::ManagementError;

pub struct CharacterCreation {
    repo: Arc<dyn CharacterRepo>,
}

impl CharacterCreation {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    /// Start a draft that knows which names the owner already uses.
    pub async fn start(&self, owner: &OwnerId) -> Result<CharacterDraft, ManagementError> {
        let taken = self
            .repo
            .list(owner)
            .await?
            .into_iter()
            .map(|c| c.name().clone())
            .collect();
        Ok(CharacterDraft::new(owner.clone(), taken))
    }

    /// Persist a completed draft.
    ///
    /// # Errors
    ///
    /// `DomainError::DuplicateName` when a record with the same name appeared
    /// since the draft started.
    pub async fn complete(&self, character: Character) -> Result<Character, ManagementError> {
        let owner = character.owner();
        let name = character.name();
        if self.repo.load(owner, name).await?.is_some() {
            tracing::warn!(%owner, character = %name, "Character name already in use");
            return Err(DomainError::DuplicateName(name.to_string()).into());
        }

        if let Err(e) = self.repo.save(&character).await {
            tracing::warn!(%owner, character = %name, error = %e, "Failed to save new character");
            return Err(ManagementError::persistence(e));
        }

        tracing::info!(
            %owner,
            character = %name,
            race = %character.race(),
            class = %character.class(),
            level = character.level(),
            "Character created"
        );
        Ok(character)
    }
}
