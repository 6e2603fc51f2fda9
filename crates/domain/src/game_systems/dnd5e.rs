//! D&D 5th Edition calculation rules.

use super::traits::CalculationEngine;
use crate::aggregates::Character;
use crate::value_objects::{Ability, Skill};

/// Base of the spell save DC formula
const SPELL_DC_BASE: i32 = 8;

/// D&D 5th Edition rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dnd5eRules;

impl Dnd5eRules {
    pub const fn new() -> Self {
        Self
    }

    fn proficiency_bonus(character: &Character) -> i32 {
        i32::try_from(character.progression().proficiency_bonus()).unwrap_or(i32::MAX)
    }

    fn casting_modifier(&self, character: &Character) -> Option<i32> {
        character
            .class()
            .spellcasting_ability()
            .map(|ability| self.ability_modifier(character.abilities().score(ability)))
    }
}

impl CalculationEngine for Dnd5eRules {
    fn ability_modifier(&self, score: i32) -> i32 {
        // D&D uses floor division, Rust's / rounds toward zero
        score.saturating_sub(10).div_euclid(2)
    }

    fn skill_bonus(&self, character: &Character, skill: Skill) -> i32 {
        let ability = skill.ability();
        let mut bonus = self.ability_modifier(character.abilities().score(ability));
        let prof = Self::proficiency_bonus(character);
        let ledger = character.proficiencies();
        let proficient = ledger.proficient().contains(&skill);
        let expert = ledger.expert().contains(&skill);
        // Expertise implies proficiency and adds the bonus a second time
        if proficient || expert {
            bonus = bonus.saturating_add(prof);
        }
        if expert {
            bonus = bonus.saturating_add(prof);
        }
        bonus
    }

    fn saving_throw_bonus(&self, character: &Character, ability: Ability) -> i32 {
        let entry = character.abilities().get(ability);
        let modifier = self.ability_modifier(entry.score());
        if entry.saving_throw_proficient() {
            modifier.saturating_add(Self::proficiency_bonus(character))
        } else {
            modifier
        }
    }

    fn spell_save_dc(&self, character: &Character) -> i32 {
        self.casting_modifier(character)
            .map(|m| {
                SPELL_DC_BASE
                    .saturating_add(Self::proficiency_bonus(character))
                    .saturating_add(m)
            })
            .unwrap_or(0)
    }

    fn spell_attack_bonus(&self, character: &Character) -> i32 {
        self.casting_modifier(character)
            .map(|m| Self::proficiency_bonus(character).saturating_add(m))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::Character;
    use crate::ids::OwnerId;
    use crate::value_objects::{CharacterClass, CharacterName, Race};

    fn character(class: CharacterClass, scores: [i32; 6]) -> Character {
        Character::create(
            OwnerId::new("user-1").unwrap(),
            CharacterName::new("Tester").unwrap(),
            Race::Human,
            class,
            1,
            &scores,
        )
        .unwrap()
    }

    #[test]
    fn ability_modifier_calculation() {
        let rules = Dnd5eRules::new();
        assert_eq!(rules.ability_modifier(1), -5);
        assert_eq!(rules.ability_modifier(3), -4);
        assert_eq!(rules.ability_modifier(8), -1);
        assert_eq!(rules.ability_modifier(9), -1);
        assert_eq!(rules.ability_modifier(10), 0);
        assert_eq!(rules.ability_modifier(11), 0);
        assert_eq!(rules.ability_modifier(15), 2);
        assert_eq!(rules.ability_modifier(18), 4);
        assert_eq!(rules.ability_modifier(30), 10);
    }

    #[test]
    fn ability_modifier_is_floor_for_every_score() {
        let rules = Dnd5eRules::new();
        for score in -20..=40 {
            let expected = ((f64::from(score) - 10.0) / 2.0).floor() as i32;
            assert_eq!(rules.ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn expert_skill_adds_proficiency_twice() {
        let rules = Dnd5eRules::new();
        // DEX 14 → +2, proficiency bonus 2
        let mut pc = character(CharacterClass::Rogue, [10, 14, 10, 10, 10, 10]);
        pc.toggle_expertise(&["Stealth"]).unwrap();
        assert_eq!(rules.skill_bonus(&pc, Skill::Stealth), 6);
        assert_eq!(rules.skill_bonus_by_name(&pc, "stealth").unwrap(), 6);
    }

    #[test]
    fn proficient_skill_adds_proficiency_once() {
        let rules = Dnd5eRules::new();
        let mut pc = character(CharacterClass::Rogue, [10, 14, 10, 10, 10, 10]);
        pc.toggle_proficiencies(&["Acrobatics"]).unwrap();
        assert_eq!(rules.skill_bonus(&pc, Skill::Acrobatics), 4);
        assert_eq!(rules.skill_bonus(&pc, Skill::Stealth), 2);
    }

    #[test]
    fn unknown_skill_name() {
        let rules = Dnd5eRules::new();
        let pc = character(CharacterClass::Rogue, [10; 6]);
        assert!(matches!(
            rules.skill_bonus_by_name(&pc, "Cooking"),
            Err(crate::DomainError::UnknownSkill(_))
        ));
    }

    #[test]
    fn saving_throw_with_and_without_proficiency() {
        let rules = Dnd5eRules::new();
        // CON 12 → +1
        let mut pc = character(CharacterClass::Fighter, [10, 10, 12, 10, 10, 10]);
        pc.set_proficiency_bonus(3);
        assert_eq!(rules.saving_throw_bonus(&pc, Ability::Constitution), 1);

        pc.set_saving_throw_proficiencies(&["Constitution"]).unwrap();
        assert_eq!(rules.saving_throw_bonus(&pc, Ability::Constitution), 4);
    }

    #[test]
    fn spellcasting_uses_class_ability() {
        let rules = Dnd5eRules::new();
        // INT 16 → +3, proficiency 2
        let wizard = character(CharacterClass::Wizard, [10, 10, 10, 16, 10, 10]);
        assert_eq!(rules.spell_save_dc(&wizard), 13);
        assert_eq!(rules.spell_attack_bonus(&wizard), 5);

        let fighter = character(CharacterClass::Fighter, [10, 10, 10, 16, 10, 10]);
        assert_eq!(rules.spell_save_dc(&fighter), 0);
        assert_eq!(rules.spell_attack_bonus(&fighter), 0);
    }

    #[test]
    fn derive_is_deterministic() {
        let rules = Dnd5eRules::new();
        let mut pc = character(CharacterClass::Bard, [8, 15, 13, 12, 10, 17]);
        pc.toggle_proficiencies(&["Performance", "Deception"]).unwrap();
        assert_eq!(rules.derive(&pc), rules.derive(&pc));
        assert_eq!(rules.derive(&pc).skill_bonuses.len(), 18);
    }

    #[test]
    fn huge_proficiency_bonus_saturates() {
        let rules = Dnd5eRules::new();
        let mut wizard = character(CharacterClass::Wizard, [10, 10, 10, 16, 10, 10]);
        wizard.set_proficiency_bonus(u32::MAX);

        assert_eq!(rules.spell_save_dc(&wizard), i32::MAX);
        assert_eq!(rules.spell_attack_bonus(&wizard), i32::MAX);
        assert_eq!(wizard.spellcasting().spell_save_dc(), i32::MAX);
        assert_eq!(wizard.abilities().get(Ability::Intelligence).modifier(), 3);
    }

    #[test]
    fn huge_score_with_expertise_saturates() {
        let rules = Dnd5eRules::new();
        let mut rogue = character(CharacterClass::Rogue, [10, 14, 10, 10, 10, 10]);
        rogue.toggle_expertise(&["Stealth"]).unwrap();
        rogue.set_proficiency_bonus(1_000_000_000);
        assert_eq!(rogue.proficiencies().skill_bonus(Skill::Stealth), 2_000_000_002);

        rogue.set_ability_score(Ability::Dexterity, i32::MAX).unwrap();
        assert_eq!(rules.skill_bonus(&rogue, Skill::Stealth), i32::MAX);
        assert_eq!(rogue.proficiencies().skill_bonus(Skill::Stealth), i32::MAX);
    }

    #[test]
    fn modifier_of_extreme_scores_does_not_overflow() {
        let rules = Dnd5eRules::new();
        assert_eq!(rules.ability_modifier(i32::MAX), 1_073_741_818);
        assert_eq!(rules.ability_modifier(i32::MIN), i32::MIN / 2);
    }
}
