//! Ability, proficiency and progression edits.

use std::sync::Arc;

use charsheet_domain::{
    Ability, Character, CharacterName, Description, HitPoints, OwnerId, ProficiencyChange, Speed,
};

use crate::infrastructure::ports::CharacterRepo;

use super::{modify_character, ManagementError};

pub struct SheetManagement {
    repo: Arc<dyn CharacterRepo>,
}

impl SheetManagement {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    pub async fn toggle_proficiencies(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        skills: &[&str],
    ) -> Result<(Character, ProficiencyChange), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "toggle_proficiencies", |c| {
            c.toggle_proficiencies(skills)
        })
        .await
    }

    pub async fn toggle_expertise(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        skills: &[&str],
    ) -> Result<(Character, ProficiencyChange), ManagementError> {
        modify_character(self.repo.as_ref(), owner, name, "toggle_expertise", |c| {
            c.toggle_expertise(skills)
        })
        .await
    }

    pub async fn set_saving_throws(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        abilities: &[&str],
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_saving_throws", |c| {
                c.set_saving_throw_proficiencies(abilities)
            })
            .await?;
        Ok(character)
    }

    pub async fn set_ability_score(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        ability: Ability,
        score: i32,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_ability_score", |c| {
                c.set_ability_score(ability, score)
            })
            .await?;
        Ok(character)
    }

    pub async fn set_proficiency_bonus(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        bonus: u32,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_proficiency_bonus", |c| {
                c.set_proficiency_bonus(bonus);
                Ok(())
            })
            .await?;
        Ok(character)
    }

    pub async fn set_hit_points(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        max: u32,
        current: u32,
        temporary: u32,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_hit_points", |c| {
                c.set_hit_points(HitPoints::new(max, current, temporary)?);
                Ok(())
            })
            .await?;
        Ok(character)
    }

    pub async fn set_armor_class(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        armor_class: u32,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_armor_class", |c| {
                c.set_armor_class(armor_class);
                Ok(())
            })
            .await?;
        Ok(character)
    }

    pub async fn set_speed(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        speed: Speed,
    ) -> Result<Character, ManagementError> {
        let (character, ()) = modify_character(self.repo.as_ref(), owner, name, "set_speed", |c| {
            c.set_speed(speed);
            Ok(())
        })
        .await?;
        Ok(character)
    }

    pub async fn set_level(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        level: i64,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_level", |c| c.set_level(level))
                .await?;
        Ok(character)
    }

    pub async fn set_description(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
        text: &str,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "set_description", |c| {
                c.set_description(Description::new(text)?);
                Ok(())
            })
            .await?;
        Ok(character)
    }

    pub async fn clear_description(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Character, ManagementError> {
        let (character, ()) =
            modify_character(self.repo.as_ref(), owner, name, "clear_description", |c| {
                c.clear_description();
                Ok(())
            })
            .await?;
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use crate::use_cases::management::test_support::{name, owner, wizard};
    use charsheet_domain::{DomainError, Skill};

    fn repo_with(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_load()
            .withf(|o, n| o.as_str() == "user-1" && n.as_str() == "Aria")
            .returning(move |_, _| Ok(Some(character.clone())));
        repo
    }

    #[tokio::test]
    async fn toggle_saves_recomputed_character() {
        let mut repo = repo_with(wizard("Aria"));
        repo.expect_save()
            .withf(|c| c.proficiencies().skill_bonus(Skill::Arcana) == 5)
            .times(1)
            .returning(|_| Ok(()));

        let sheet = SheetManagement::new(Arc::new(repo));
        let (character, change) = sheet
            .toggle_proficiencies(&owner(), &name("Aria"), &["arcana"])
            .await
            .unwrap();

        assert_eq!(change.added, vec![Skill::Arcana]);
        assert!(character.proficiencies().proficient().contains(&Skill::Arcana));
    }

    #[tokio::test]
    async fn unknown_skill_is_never_saved() {
        let mut repo = repo_with(wizard("Aria"));
        repo.expect_save().never();

        let sheet = SheetManagement::new(Arc::new(repo));
        let err = sheet
            .toggle_expertise(&owner(), &name("Aria"), &["Stealth", "Basket Weaving"])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ManagementError::Domain(DomainError::UnknownSkill(_))
        ));
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_load().returning(|_, _| Ok(None));
        repo.expect_save().never();

        let sheet = SheetManagement::new(Arc::new(repo));
        let err = sheet
            .set_armor_class(&owner(), &name("Ghost"), 12)
            .await
            .unwrap_err();
        assert!(matches!(err, ManagementError::NotFound { .. }));
    }

    #[tokio::test]
    async fn failed_save_is_persistence_failure() {
        let mut repo = repo_with(wizard("Aria"));
        repo.expect_save()
            .returning(|_| Err(RepoError::io("save", "disk full")));

        let sheet = SheetManagement::new(Arc::new(repo));
        let err = sheet
            .set_proficiency_bonus(&owner(), &name("Aria"), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, ManagementError::PersistenceFailure(_)));
    }

    #[tokio::test]
    async fn hit_points_current_above_max_is_rejected() {
        let mut repo = repo_with(wizard("Aria"));
        repo.expect_save().never();

        let sheet = SheetManagement::new(Arc::new(repo));
        let err = sheet
            .set_hit_points(&owner(), &name("Aria"), 10, 12, 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ManagementError::Domain(DomainError::Validation { field: "hitPoints", .. })
        ));
    }

    #[tokio::test]
    async fn saving_throws_replace_previous_set() {
        let mut pc = wizard("Aria");
        pc.set_saving_throw_proficiencies(&["Wisdom"]).unwrap();
        let mut repo = repo_with(pc);
        repo.expect_save().returning(|_| Ok(()));

        let sheet = SheetManagement::new(Arc::new(repo));
        let character = sheet
            .set_saving_throws(&owner(), &name("Aria"), &["Intelligence"])
            .await
            .unwrap();
        assert_eq!(
            character.abilities().saving_throw_proficiencies(),
            vec![Ability::Intelligence]
        );
        assert_eq!(
            character.abilities().get(Ability::Intelligence).saving_throw_bonus(),
            5
        );
    }

    #[tokio::test]
    async fn description_is_trimmed_and_cleared() {
        let mut repo = repo_with(wizard("Aria"));
        repo.expect_save().returning(|_| Ok(()));

        let sheet = SheetManagement::new(Arc::new(repo));
        let character = sheet
            .set_description(&owner(), &name("Aria"), "  Bookish  ")
            .await
            .unwrap();
        assert_eq!(character.description().unwrap().as_str(), "Bookish");

        let err = sheet
            .set_description(&owner(), &name("Aria"), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, ManagementError::Domain(_)));
    }
}
