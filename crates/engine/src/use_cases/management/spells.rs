//! Spell slot and spell list operations.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterName, KnownSpell, OwnerId};

use crate::infrastructure::ports::CharacterRepo;

use super::{modify_character, ManagementError};

pub struct SpellManagement {
    repo: Arc<dyn CharacterRepo>,
}

impl SpellManagement {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    pub async fn set_slots(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        counts: &[u32],
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_spell_slots", |c| {
                c.set_spell_slots(counts)
            })
            .await?;
        Ok(character)
    }

    /// `true` when the cantrip was new.
    pub async fn add_cantrip(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        cantrip: &str,
    ) -> Result<(Character, bool), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "add_cantrip", |c| {
            c.add_cantrip(cantrip)
        })
        .await
    }

    /// `true` when the spell was new.
    pub async fn add_spell(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        spell: &str,
        level: u8,
    ) -> Result<(Character, bool), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "add_spell", |c| {
            Ok(c.add_spell(KnownSpell::new(spell, level)?))
        })
        .await
    }

    /// `true` when the cantrip was known.
    pub async fn remove_cantrip(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        cantrip: &str,
    ) -> Result<(Character, bool), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "remove_cantrip", |c| {
            Ok(c.remove_cantrip(cantrip))
        })
        .await
    }

    /// `true` when the spell was known.
    pub async fn remove_spell(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        spell: &KnownSpell,
    ) -> Result<(Character, bool), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "remove_spell", |c| {
            Ok(c.remove_spell(spell))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterRepo;
    use crate::use_cases::management::test_support::{name, owner, wizard};

    fn repo_with(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_load()
            .returning(move |_, _| Ok(Some(character.clone())));
        repo.expect_save().returning(|_| Ok(()));
        repo
    }

    #[tokio::test]
    async fn add_spell_keeps_level_order_stable() {
        let mut pc = wizard("Aria");
        pc.add_spell(KnownSpell::new("MagicMissile", 1).unwrap());
        pc.add_spell(KnownSpell::new("Fly", 3).unwrap());

        let spells = SpellManagement::new(Arc::new(repo_with(pc)));
        let (character, added) = spells
            .add_spell(&owner(), &name("Aria"), "Fireball", 3)
            .await
            .unwrap();

        assert!(added);
        let listed: Vec<String> = character
            .spellcasting()
            .spells()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, vec!["MagicMissile (1)", "Fly (3)", "Fireball (3)"]);
    }

    #[tokio::test]
    async fn spell_level_outside_range_is_rejected() {
        let spells = SpellManagement::new(Arc::new(repo_with(wizard("Aria"))));
        assert!(spells
            .add_spell(&owner(), &name("Aria"), "Wish", 10)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn slots_beyond_input_are_kept() {
        let mut pc = wizard("Aria");
        pc.set_spell_slots(&[4, 3, 2]).unwrap();

        let spells = SpellManagement::new(Arc::new(repo_with(pc)));
        let character = spells
            .set_slots(&owner(), &name("Aria"), &[5])
            .await
            .unwrap();
        assert_eq!(character.spellcasting().slots_at(1), 5);
        assert_eq!(character.spellcasting().slots_at(2), 3);
        assert_eq!(character.spellcasting().slots_at(3), 2);
    }

    #[tokio::test]
    async fn removing_unknown_cantrip_is_a_no_op() {
        let spells = SpellManagement::new(Arc::new(repo_with(wizard("Aria"))));
        let (_, removed) = spells
            .remove_cantrip(&owner(), &name("Aria"), "Light")
            .await
            .unwrap();
        assert!(!removed);
    }
}
