//! Inventory and money operations.

use std::sync::Arc;

use charsheet_domain::{
    Character, CharacterName, Coins, EquipmentCategory, MoneyOperation, OwnerId,
};

use crate::infrastructure::ports::CharacterRepo;

use super::{load_character, modify_character, ManagementError};

pub struct EquipmentManagement {
    repo: Arc<dyn CharacterRepo>,
}

impl EquipmentManagement {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    pub async fn view(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Character, ManagementError> {
        load_character(self.repo.as_ref(), owner, name).await
    }

    pub async fn add_item(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        category: EquipmentCategory,
        item: &str,
    ) -> Result<Character, ManagementError> {
        let (character, ()) = modify_character(self.repo.as_ref(), owner, name, "add_item", |c| {
            c.add_item(category, item)
        })
        .await?;
        Ok(character)
    }

    pub async fn remove_item(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        category: EquipmentCategory,
        item: &str,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "remove_item", |c| {
                c.remove_item(category, item)
            })
            .await?;
        Ok(character)
    }

    /// Returns the new balance.
    pub async fn adjust_money(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        operation: MoneyOperation,
        amounts: Coins,
    ) -> Result<Coins, ManagementError> {
        let (_, balance) =
            modify_character(self.repo.as_ref(), owner, name, "adjust_money", |c| {
                c.adjust_money(operation, amounts)
            })
            .await?;
        Ok(balance)
    }
}
