//! Per-owner dialog state.

use charsheet_domain::{
    Ability, CharacterDraft, CharacterName, EquipmentCategory, MoneyOperation,
};

use super::command::Command;

/// Where an owner's conversation currently stands.
#[derive(Debug, Clone, Default)]
pub(super) enum Session {
    #[default]
    Idle,
    Creating(CharacterDraft),
    SelectingCharacter(Command),
    Collecting {
        target: CharacterName,
        step: Step,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SpellKind {
    Cantrip,
    Spell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatField {
    Ability(Ability),
    ProficiencyBonus,
    HitPoints,
    ArmorClass,
    Speed,
    Level,
}

/// Input awaited for a targeted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Step {
    ConfirmDelete,
    SkillList { expertise: bool },
    AbilityList,
    StatField,
    StatValue(StatField),
    MoneyOperation,
    MoneyAmounts(MoneyOperation),
    InventoryAction,
    InventoryCategory(ListAction),
    InventoryItem(ListAction, EquipmentCategory),
    SpellSlots,
    SpellKind(ListAction),
    SpellLevel,
    SpellName {
        action: ListAction,
        kind: SpellKind,
        level: Option<u8>,
    },
    DescriptionText,
}

impl ListAction {
    pub(super) const OPTIONS: [&'static str; 2] = ["add", "remove"];

    pub(super) fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

impl SpellKind {
    pub(super) const OPTIONS: [&'static str; 2] = ["cantrip", "spell"];

    pub(super) fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "cantrip" => Some(Self::Cantrip),
            "spell" => Some(Self::Spell),
            _ => None,
        }
    }
}

impl StatField {
    const OTHER: [(&'static str, StatField); 5] = [
        ("Proficiency bonus", StatField::ProficiencyBonus),
        ("Hit points", StatField::HitPoints),
        ("Armor class", StatField::ArmorClass),
        ("Speed", StatField::Speed),
        ("Level", StatField::Level),
    ];

    pub(super) fn options() -> Vec<String> {
        Ability::ALL
            .iter()
            .map(ToString::to_string)
            .chain(Self::OTHER.iter().map(|(label, _)| label.to_string()))
            .collect()
    }

    pub(super) fn parse(input: &str) -> Option<Self> {
        if let Ok(ability) = input.parse::<Ability>() {
            return Some(Self::Ability(ability));
        }
        let input = input.trim();
        Self::OTHER
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(input))
            .map(|(_, field)| *field)
    }
}
