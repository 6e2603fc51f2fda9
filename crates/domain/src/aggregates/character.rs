//! Character aggregate - the unit of persistence
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: every ledger is reachable only through methods
//! - **Valid by construction**: `create()` validates all creation inputs
//! - **Validate, then mutate, then recompute**: a failed operation leaves the
//!   aggregate untouched, a successful one always ends with a full
//!   recomputation of derived stats

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::{
    AbilityScores, Coins, EquipmentLedger, HitPoints, KnownSpell, ProficiencyChange,
    ProficiencyLedger, ProgressionParameters, SpellcastingRecord, Speed,
};
use crate::error::DomainError;
use crate::game_systems::{CalculationEngine, RULES};
use crate::ids::OwnerId;
use crate::value_objects::{
    Ability, CharacterClass, CharacterName, Description, EquipmentCategory, MoneyOperation, Race,
    Skill,
};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

/// Validate a character level.
///
/// # Errors
///
/// `DomainError::Validation` (field `level`) outside 1..=20.
pub fn validate_level(level: i64) -> Result<u8, DomainError> {
    u8::try_from(level)
        .ok()
        .filter(|l| (MIN_LEVEL..=MAX_LEVEL).contains(l))
        .ok_or_else(|| {
            DomainError::validation(
                "level",
                format!("level must be between {} and {}", MIN_LEVEL, MAX_LEVEL),
            )
        })
}

/// A character sheet owned by a single user.
///
/// # Invariants
///
/// - `name` is 2..=30 characters (enforced by `CharacterName`)
/// - `level` is within 1..=20
/// - every derived value equals what the calculation engine yields for the
///   current raw inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    // Identity
    owner: OwnerId,
    name: CharacterName,
    race: Race,
    class: CharacterClass,
    level: u8,

    // Sheet
    abilities: AbilityScores,
    progression: ProgressionParameters,
    proficiencies: ProficiencyLedger,
    equipment: EquipmentLedger,
    spellcasting: SpellcastingRecord,
    description: Option<Description>,

    is_active: bool,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a character from completed creation input.
    ///
    /// Progression starts at its defaults and derived stats are computed once
    /// over the supplied scores.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` naming `level` or `abilities`.
    pub fn create(
        owner: OwnerId,
        name: CharacterName,
        race: Race,
        class: CharacterClass,
        level: u8,
        scores: &[i32],
    ) -> Result<Self, DomainError> {
        let level = validate_level(i64::from(level))?;
        let abilities = AbilityScores::from_creation_scores(scores)?;
        let mut character = Self {
            owner,
            name,
            race,
            class,
            level,
            abilities,
            progression: ProgressionParameters::default(),
            proficiencies: ProficiencyLedger::new(),
            equipment: EquipmentLedger::new(),
            spellcasting: SpellcastingRecord::new(),
            description: None,
            is_active: false,
        };
        character.recompute();
        Ok(character)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn progression(&self) -> &ProgressionParameters {
        &self.progression
    }

    pub fn proficiencies(&self) -> &ProficiencyLedger {
        &self.proficiencies
    }

    pub fn equipment(&self) -> &EquipmentLedger {
        &self.equipment
    }

    pub fn spellcasting(&self) -> &SpellcastingRecord {
        &self.spellcasting
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    // =========================================================================
    // Proficiencies
    // =========================================================================

    /// Batch XOR of `names` against the proficient set. Toggled skills lose
    /// expertise.
    ///
    /// # Errors
    ///
    /// `DomainError::UnknownSkill` for the first unknown name; nothing changes.
    pub fn toggle_proficiencies(&mut self, names: &[&str]) -> Result<ProficiencyChange, DomainError> {
        let skills = Skill::parse_all(names.iter().copied())?;
        let change = self.proficiencies.toggle_proficiency(&skills);
        self.recompute();
        Ok(change)
    }

    /// Batch XOR of `names` against the expert set. Toggled skills lose plain
    /// proficiency.
    ///
    /// # Errors
    ///
    /// `DomainError::UnknownSkill` for the first unknown name; nothing changes.
    pub fn toggle_expertise(&mut self, names: &[&str]) -> Result<ProficiencyChange, DomainError> {
        let skills = Skill::parse_all(names.iter().copied())?;
        let change = self.proficiencies.toggle_expertise(&skills);
        self.recompute();
        Ok(change)
    }

    /// Replace-all: only the named abilities keep saving-throw proficiency.
    ///
    /// # Errors
    ///
    /// `DomainError::UnknownAbility` for the first unknown name; nothing changes.
    pub fn set_saving_throw_proficiencies(&mut self, names: &[&str]) -> Result<(), DomainError> {
        let abilities = names
            .iter()
            .map(|name| name.parse::<Ability>())
            .collect::<Result<Vec<_>, _>>()?;
        self.abilities.set_saving_throw_proficiencies(&abilities);
        self.recompute();
        Ok(())
    }

    // =========================================================================
    // Abilities and progression
    // =========================================================================

    pub fn set_ability_score(&mut self, ability: Ability, score: i32) -> Result<(), DomainError> {
        self.abilities.set_score(ability, score)?;
        self.recompute();
        Ok(())
    }

    pub fn set_proficiency_bonus(&mut self, bonus: u32) {
        self.progression.set_proficiency_bonus(bonus);
        self.recompute();
    }

    pub fn set_hit_points(&mut self, hit_points: HitPoints) {
        self.progression.set_hit_points(hit_points);
    }

    pub fn set_armor_class(&mut self, armor_class: u32) {
        self.progression.set_armor_class(armor_class);
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.progression.set_speed(speed);
    }

    pub fn set_level(&mut self, level: i64) -> Result<(), DomainError> {
        self.level = validate_level(level)?;
        Ok(())
    }

    // =========================================================================
    // Equipment and money
    // =========================================================================

    pub fn add_item(&mut self, category: EquipmentCategory, item: &str) -> Result<(), DomainError> {
        self.equipment.add_item(category, item)
    }

    pub fn remove_item(&mut self, category: EquipmentCategory, item: &str) -> Result<(), DomainError> {
        self.equipment.remove_item(category, item)
    }

    /// Credit or debit all four denominations, returning the new balance.
    ///
    /// # Errors
    ///
    /// `DomainError::InsufficientFunds` when any debited denomination would go
    /// negative; the balance is unchanged.
    pub fn adjust_money(
        &mut self,
        operation: MoneyOperation,
        amounts: Coins,
    ) -> Result<Coins, DomainError> {
        self.equipment.adjust_money(operation, amounts)
    }

    // =========================================================================
    // Spellcasting
    // =========================================================================

    pub fn set_spell_slots(&mut self, counts: &[u32]) -> Result<(), DomainError> {
        self.spellcasting.set_slots(counts)
    }

    /// Returns `false` when the cantrip was already known.
    pub fn add_cantrip(&mut self, name: &str) -> Result<bool, DomainError> {
        self.spellcasting.add_cantrip(name)
    }

    /// Returns `false` when the spell was already known.
    pub fn add_spell(&mut self, spell: KnownSpell) -> bool {
        self.spellcasting.add_spell(spell)
    }

    /// Returns `false` when the cantrip was not known.
    pub fn remove_cantrip(&mut self, name: &str) -> bool {
        self.spellcasting.remove_cantrip(name)
    }

    /// Returns `false` when the spell was not known.
    pub fn remove_spell(&mut self, spell: &KnownSpell) -> bool {
        self.spellcasting.remove_spell(spell)
    }

    // =========================================================================
    // Description
    // =========================================================================

    pub fn set_description(&mut self, description: Description) {
        self.description = Some(description);
    }

    pub fn clear_description(&mut self) {
        self.description = None;
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Recompute every derived value from raw inputs.
    fn recompute(&mut self) {
        let derived = RULES.derive(self);
        self.abilities
            .apply_derived(&derived.modifiers, &derived.saving_throws);
        self.proficiencies.set_skill_bonuses(derived.skill_bonuses);
        self.spellcasting
            .set_derived(derived.spell_save_dc, derived.spell_attack_bonus);
    }
}

// =============================================================================
// Serde
// =============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterWireFormat {
    name: CharacterName,
    race: Race,
    class: CharacterClass,
    level: i64,
    owner: OwnerId,
    abilities: AbilityScores,
    #[serde(default)]
    progression: ProgressionParameters,
    #[serde(default)]
    proficiency_ledger: ProficiencyLedger,
    #[serde(default)]
    equipment: EquipmentLedger,
    #[serde(default)]
    spellcasting: SpellcastingRecord,
    #[serde(default)]
    description: Option<Description>,
    #[serde(default)]
    is_active: bool,
}

impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CharacterWireFormat {
            name: self.name.clone(),
            race: self.race,
            class: self.class,
            level: i64::from(self.level),
            owner: self.owner.clone(),
            abilities: self.abilities.clone(),
            progression: self.progression,
            proficiency_ledger: self.proficiencies.clone(),
            equipment: self.equipment.clone(),
            spellcasting: self.spellcasting.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CharacterWireFormat::deserialize(deserializer)?;
        let level = validate_level(wire.level).map_err(serde::de::Error::custom)?;

        let mut character = Character {
            owner: wire.owner,
            name: wire.name,
            race: wire.race,
            class: wire.class,
            level,
            abilities: wire.abilities,
            progression: wire.progression,
            proficiencies: wire.proficiency_ledger,
            equipment: wire.equipment,
            spellcasting: wire.spellcasting,
            description: wire.description,
            is_active: wire.is_active,
        };
        // Stored derived values are never trusted
        character.recompute();
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProficiencyLevel;

    fn owner() -> OwnerId {
        OwnerId::new("user-1").unwrap()
    }

    fn create_test_character() -> Character {
        Character::create(
            owner(),
            CharacterName::new("Aria").unwrap(),
            Race::Elf,
            CharacterClass::Wizard,
            3,
            &[8, 14, 12, 16, 10, 11],
        )
        .unwrap()
    }

    mod constructor {
        use super::*;

        #[test]
        fn create_applies_defaults_and_derives() {
            let pc = create_test_character();
            assert_eq!(pc.name().as_str(), "Aria");
            assert_eq!(pc.level(), 3);
            assert!(!pc.is_active());
            assert!(pc.description().is_none());

            let progression = pc.progression();
            assert_eq!(progression.hit_points(), HitPoints::default());
            assert_eq!(progression.armor_class(), 10);
            assert_eq!(progression.proficiency_bonus(), 2);
            assert_eq!(progression.speed(), Speed::default());

            assert_eq!(pc.abilities().get(Ability::Strength).modifier(), -1);
            assert_eq!(pc.abilities().get(Ability::Intelligence).modifier(), 3);
            assert_eq!(pc.proficiencies().skill_bonus(Skill::Arcana), 3);
            assert_eq!(pc.spellcasting().spell_save_dc(), 13);
            assert_eq!(pc.spellcasting().spell_attack_bonus(), 5);
        }

        #[test]
        fn five_scores_are_rejected() {
            let err = Character::create(
                owner(),
                CharacterName::new("Aria").unwrap(),
                Race::Elf,
                CharacterClass::Wizard,
                1,
                &[10, 10, 10, 10, 10],
            )
            .unwrap_err();
            assert_eq!(err.field(), Some("abilities"));
        }

        #[test]
        fn out_of_range_score_is_rejected() {
            let err = Character::create(
                owner(),
                CharacterName::new("Aria").unwrap(),
                Race::Elf,
                CharacterClass::Wizard,
                1,
                &[10, 10, 10, 10, 10, 19],
            )
            .unwrap_err();
            assert_eq!(err.field(), Some("abilities"));
        }

        #[test]
        fn level_bounds() {
            assert!(validate_level(0).is_err());
            assert_eq!(validate_level(1).unwrap(), 1);
            assert_eq!(validate_level(20).unwrap(), 20);
            assert_eq!(validate_level(21).unwrap_err().field(), Some("level"));
            assert!(validate_level(-3).is_err());
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn toggling_twice_restores_original_state() {
            let mut pc = create_test_character();
            let before = pc.clone();
            pc.toggle_proficiencies(&["History"]).unwrap();
            assert_eq!(pc.proficiencies().level(Skill::History), ProficiencyLevel::Proficient);
            pc.toggle_proficiencies(&["History"]).unwrap();
            assert_eq!(pc, before);
        }

        #[test]
        fn expertise_evicts_proficiency() {
            let mut pc = create_test_character();
            pc.toggle_proficiencies(&["Stealth"]).unwrap();
            pc.toggle_expertise(&["Stealth"]).unwrap();
            assert!(!pc.proficiencies().proficient().contains(&Skill::Stealth));
            assert!(pc.proficiencies().expert().contains(&Skill::Stealth));
            // DEX 14 → +2, plus 2 × 2
            assert_eq!(pc.proficiencies().skill_bonus(Skill::Stealth), 6);
        }

        #[test]
        fn unknown_skill_leaves_state_untouched() {
            let mut pc = create_test_character();
            let before = pc.clone();
            let err = pc.toggle_proficiencies(&["Arcana", "Juggling"]).unwrap_err();
            assert!(matches!(err, DomainError::UnknownSkill(_)));
            assert_eq!(pc, before);
        }

        #[test]
        fn saving_throws_are_replaced() {
            let mut pc = create_test_character();
            pc.set_saving_throw_proficiencies(&["Intelligence", "Wisdom"]).unwrap();
            pc.set_saving_throw_proficiencies(&["constitution"]).unwrap();
            assert_eq!(
                pc.abilities().saving_throw_proficiencies(),
                vec![Ability::Constitution]
            );
            assert_eq!(pc.abilities().get(Ability::Constitution).saving_throw_bonus(), 3);
            assert_eq!(pc.abilities().get(Ability::Intelligence).saving_throw_bonus(), 3);
        }

        #[test]
        fn unknown_ability_is_rejected() {
            let mut pc = create_test_character();
            let err = pc.set_saving_throw_proficiencies(&["Luck"]).unwrap_err();
            assert!(matches!(err, DomainError::UnknownAbility(_)));
        }

        #[test]
        fn proficiency_bonus_change_recomputes_everything() {
            let mut pc = create_test_character();
            pc.toggle_proficiencies(&["Arcana"]).unwrap();
            pc.set_saving_throw_proficiencies(&["Intelligence"]).unwrap();
            pc.set_proficiency_bonus(4);
            assert_eq!(pc.proficiencies().skill_bonus(Skill::Arcana), 7);
            assert_eq!(pc.abilities().get(Ability::Intelligence).saving_throw_bonus(), 7);
            assert_eq!(pc.spellcasting().spell_save_dc(), 15);
        }

        #[test]
        fn ability_score_change_recomputes_skills() {
            let mut pc = create_test_character();
            pc.set_ability_score(Ability::Dexterity, 20).unwrap();
            assert_eq!(pc.abilities().get(Ability::Dexterity).modifier(), 5);
            assert_eq!(pc.proficiencies().skill_bonus(Skill::Acrobatics), 5);
            assert!(pc.set_ability_score(Ability::Dexterity, 0).is_err());
            assert_eq!(pc.abilities().score(Ability::Dexterity), 20);
        }

        #[test]
        fn failed_debit_changes_nothing() {
            let mut pc = create_test_character();
            pc.adjust_money(MoneyOperation::Credit, Coins::new(1, 5, 0, 7)).unwrap();
            let err = pc
                .adjust_money(MoneyOperation::Debit, Coins::new(1, 10, 0, 0))
                .unwrap_err();
            assert!(matches!(err, DomainError::InsufficientFunds { .. }));
            assert_eq!(pc.equipment().money(), Coins::new(1, 5, 0, 7));
        }

        #[test]
        fn description_set_and_clear() {
            let mut pc = create_test_character();
            pc.set_description(Description::new("  Quiet scholar  ").unwrap());
            assert_eq!(pc.description().unwrap().as_str(), "Quiet scholar");
            pc.clear_description();
            assert!(pc.description().is_none());
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serialize_produces_camel_case() {
            let pc = create_test_character();
            let json = serde_json::to_value(&pc).unwrap();
            let object = json.as_object().unwrap();
            for key in [
                "name",
                "race",
                "class",
                "level",
                "owner",
                "abilities",
                "progression",
                "proficiencyLedger",
                "equipment",
                "spellcasting",
                "description",
                "isActive",
            ] {
                assert!(object.contains_key(key), "missing {key}");
            }
            assert_eq!(object.len(), 12);
            assert_eq!(json["race"], "Elf");
            assert_eq!(json["class"], "Wizard");
        }

        #[test]
        fn roundtrip_recomputes_derived_values() {
            let mut pc = create_test_character();
            pc.toggle_expertise(&["Arcana"]).unwrap();
            pc.add_spell(KnownSpell::new("Fireball", 3).unwrap());

            let mut json = serde_json::to_value(&pc).unwrap();
            json["abilities"]["Intelligence"]["modifier"] = 99.into();
            json["spellcasting"]["spellSaveDC"] = 1.into();

            let restored: Character = serde_json::from_value(json).unwrap();
            assert_eq!(restored, pc);
        }

        #[test]
        fn invalid_level_fails_to_load() {
            let pc = create_test_character();
            let mut json = serde_json::to_value(&pc).unwrap();
            json["level"] = 42.into();
            assert!(serde_json::from_value::<Character>(json).is_err());
        }
    }
}
