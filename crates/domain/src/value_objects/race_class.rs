//! Fixed race and class lists.

use crate::error::DomainError;
use crate::value_objects::Ability;

fn unknown_race(name: &str) -> DomainError {
    DomainError::validation("race", format!("'{}' is not a playable race", name))
}

fn unknown_class(name: &str) -> DomainError {
    DomainError::validation("class", format!("'{}' is not a playable class", name))
}

named_enum! {
    /// Playable race.
    Race, unknown_race, {
        Human => "Human",
        Elf => "Elf",
        Dwarf => "Dwarf",
        Halfling => "Halfling",
        HalfElf => "Half-Elf",
        HalfOrc => "Half-Orc",
        Tiefling => "Tiefling",
        Gnome => "Gnome",
        Dragonborn => "Dragonborn",
    }
}

named_enum! {
    /// Playable class.
    CharacterClass, unknown_class, {
        Barbarian => "Barbarian",
        Bard => "Bard",
        Cleric => "Cleric",
        Druid => "Druid",
        Fighter => "Fighter",
        Monk => "Monk",
        Paladin => "Paladin",
        Ranger => "Ranger",
        Rogue => "Rogue",
        Sorcerer => "Sorcerer",
        Warlock => "Warlock",
        Wizard => "Wizard",
    }
}

impl CharacterClass {
    /// The ability the class casts with, or `None` for non-casters.
    pub fn spellcasting_ability(&self) -> Option<Ability> {
        match self {
            CharacterClass::Bard
            | CharacterClass::Paladin
            | CharacterClass::Sorcerer
            | CharacterClass::Warlock => Some(Ability::Charisma),
            CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Ranger => {
                Some(Ability::Wisdom)
            }
            CharacterClass::Wizard => Some(Ability::Intelligence),
            CharacterClass::Barbarian
            | CharacterClass::Fighter
            | CharacterClass::Monk
            | CharacterClass::Rogue => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_lists() {
        assert_eq!(Race::ALL.len(), 9);
        assert_eq!(CharacterClass::ALL.len(), 12);
    }

    #[test]
    fn parse_race_and_class() {
        assert_eq!("half-elf".parse::<Race>().unwrap(), Race::HalfElf);
        assert_eq!("WIZARD".parse::<CharacterClass>().unwrap(), CharacterClass::Wizard);
    }

    #[test]
    fn unknown_race_is_validation_error_on_race() {
        let err = "Orc".parse::<Race>().unwrap_err();
        assert_eq!(err.field(), Some("race"));
        let err = "Necromancer".parse::<CharacterClass>().unwrap_err();
        assert_eq!(err.field(), Some("class"));
    }

    #[test]
    fn casters() {
        assert_eq!(
            CharacterClass::Wizard.spellcasting_ability(),
            Some(Ability::Intelligence)
        );
        assert_eq!(CharacterClass::Cleric.spellcasting_ability(), Some(Ability::Wisdom));
        assert_eq!(CharacterClass::Fighter.spellcasting_ability(), None);
    }
}
