//! Calculation engine trait.
//!
//! Every derived value on a sheet comes out of a [`CalculationEngine`]. The
//! engine reads only raw inputs (scores, proficiency flags, proficiency bonus,
//! class) and never trusts a previously stored derived value.

use std::collections::BTreeMap;

use crate::aggregates::Character;
use crate::error::DomainError;
use crate::value_objects::{Ability, Skill};

/// Everything the engine derives from a character snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStats {
    /// Ability modifiers in Strength..Charisma order
    pub modifiers: [i32; 6],
    /// Saving-throw bonuses in Strength..Charisma order
    pub saving_throws: [i32; 6],
    /// Bonus for every skill in the table
    pub skill_bonuses: BTreeMap<Skill, i32>,
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
}

/// Calculation rules that vary per game system.
pub trait CalculationEngine: Send + Sync {
    /// Calculate ability modifier from score.
    fn ability_modifier(&self, score: i32) -> i32;

    /// Bonus for a skill check.
    fn skill_bonus(&self, character: &Character, skill: Skill) -> i32;

    /// Bonus for a saving throw.
    fn saving_throw_bonus(&self, character: &Character, ability: Ability) -> i32;

    /// Spell save DC, 0 for classes without spellcasting.
    fn spell_save_dc(&self, character: &Character) -> i32;

    /// Spell attack bonus, 0 for classes without spellcasting.
    fn spell_attack_bonus(&self, character: &Character) -> i32;

    /// Skill bonus looked up by display name.
    ///
    /// # Errors
    ///
    /// `DomainError::UnknownSkill` when no ability declares `name`.
    fn skill_bonus_by_name(&self, character: &Character, name: &str) -> Result<i32, DomainError> {
        let skill: Skill = name.parse()?;
        Ok(self.skill_bonus(character, skill))
    }

    /// Full recomputation of every derived value.
    fn derive(&self, character: &Character) -> DerivedStats {
        let mut modifiers = [0; 6];
        let mut saving_throws = [0; 6];
        for ability in Ability::ALL {
            modifiers[ability.index()] =
                self.ability_modifier(character.abilities().score(*ability));
            saving_throws[ability.index()] = self.saving_throw_bonus(character, *ability);
        }
        let skill_bonuses = Skill::ALL
            .iter()
            .map(|skill| (*skill, self.skill_bonus(character, *skill)))
            .collect();

        DerivedStats {
            modifiers,
            saving_throws,
            skill_bonuses,
            spell_save_dc: self.spell_save_dc(character),
            spell_attack_bonus: self.spell_attack_bonus(character),
        }
    }
}
