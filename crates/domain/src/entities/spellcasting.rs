//! Spell slots, known spells and derived spellcasting statistics.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::DomainError;

/// Highest spell level
pub const MAX_SPELL_LEVEL: u8 = 9;

static SPELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) \(([1-9])\)$").expect("valid regex"));

/// A leveled spell the character knows, persisted as `"name (level)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KnownSpell {
    name: String,
    level: u8,
}

impl KnownSpell {
    pub fn new(name: impl Into<String>, level: u8) -> Result<Self, DomainError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("spell", "name cannot be empty"));
        }
        if !(1..=MAX_SPELL_LEVEL).contains(&level) {
            return Err(DomainError::validation(
                "spellLevel",
                format!("must be between 1 and {}", MAX_SPELL_LEVEL),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            level,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl fmt::Display for KnownSpell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.level)
    }
}

impl std::str::FromStr for KnownSpell {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SPELL_RE
            .captures(s.trim())
            .ok_or_else(|| DomainError::parse(format!("'{}' is not 'name (level)'", s)))?;
        let level = caps[2]
            .parse::<u8>()
            .map_err(|e| DomainError::parse(e.to_string()))?;
        Self::new(&caps[1], level)
    }
}

impl TryFrom<String> for KnownSpell {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KnownSpell> for String {
    fn from(spell: KnownSpell) -> String {
        spell.to_string()
    }
}

fn empty_slots() -> BTreeMap<u8, u32> {
    (1..=MAX_SPELL_LEVEL).map(|level| (level, 0)).collect()
}

/// Spell slots, cantrips, leveled spells and the spell DC / attack bonus.
///
/// # Invariants
///
/// - `spell_slots` has exactly the keys 1..=9
/// - `cantrips` and `spells` hold no duplicates
/// - `spells` is ordered by level ascending, insertion order within a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingRecord {
    spell_slots: BTreeMap<u8, u32>,
    cantrips: Vec<String>,
    spells: Vec<KnownSpell>,
    #[serde(rename = "spellSaveDC")]
    spell_save_dc: i32,
    spell_attack_bonus: i32,
}

impl Default for SpellcastingRecord {
    fn default() -> Self {
        Self {
            spell_slots: empty_slots(),
            cantrips: Vec::new(),
            spells: Vec::new(),
            spell_save_dc: 0,
            spell_attack_bonus: 0,
        }
    }
}

impl SpellcastingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &BTreeMap<u8, u32> {
        &self.spell_slots
    }

    pub fn slots_at(&self, level: u8) -> u32 {
        self.spell_slots.get(&level).copied().unwrap_or(0)
    }

    pub fn cantrips(&self) -> &[String] {
        &self.cantrips
    }

    pub fn spells(&self) -> &[KnownSpell] {
        &self.spells
    }

    pub fn spell_save_dc(&self) -> i32 {
        self.spell_save_dc
    }

    pub fn spell_attack_bonus(&self) -> i32 {
        self.spell_attack_bonus
    }

    /// Overwrite slot counts for levels 1..=counts.len(); higher levels keep their value.
    pub(crate) fn set_slots(&mut self, counts: &[u32]) -> Result<(), DomainError> {
        if counts.len() > usize::from(MAX_SPELL_LEVEL) {
            return Err(DomainError::validation(
                "spellSlots",
                format!("at most {} levels, got {}", MAX_SPELL_LEVEL, counts.len()),
            ));
        }
        for (level, count) in (1..=MAX_SPELL_LEVEL).zip(counts) {
            self.spell_slots.insert(level, *count);
        }
        Ok(())
    }

    /// Returns false when the cantrip was already known.
    pub(crate) fn add_cantrip(&mut self, name: &str) -> Result<bool, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("cantrip", "name cannot be empty"));
        }
        if self.cantrips.iter().any(|c| c == name) {
            return Ok(false);
        }
        self.cantrips.push(name.to_string());
        Ok(true)
    }

    /// Returns false when the same name at the same level was already known.
    pub(crate) fn add_spell(&mut self, spell: KnownSpell) -> bool {
        if self.spells.contains(&spell) {
            return false;
        }
        self.spells.push(spell);
        // stable: equal levels keep insertion order
        self.spells.sort_by_key(KnownSpell::level);
        true
    }

    pub(crate) fn remove_cantrip(&mut self, name: &str) -> bool {
        let before = self.cantrips.len();
        self.cantrips.retain(|c| c != name.trim());
        self.cantrips.len() != before
    }

    pub(crate) fn remove_spell(&mut self, spell: &KnownSpell) -> bool {
        let before = self.spells.len();
        self.spells.retain(|s| s != spell);
        self.spells.len() != before
    }

    pub(crate) fn set_derived(&mut self, spell_save_dc: i32, spell_attack_bonus: i32) {
        self.spell_save_dc = spell_save_dc;
        self.spell_attack_bonus = spell_attack_bonus;
    }
}

impl<'de> Deserialize<'de> for SpellcastingRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            #[serde(default)]
            spell_slots: BTreeMap<u8, u32>,
            #[serde(default)]
            cantrips: Vec<String>,
            #[serde(default)]
            spells: Vec<KnownSpell>,
        }
        let raw = Raw::deserialize(deserializer)?;

        let mut record = SpellcastingRecord::new();
        for (level, count) in raw.spell_slots {
            if !(1..=MAX_SPELL_LEVEL).contains(&level) {
                return Err(serde::de::Error::custom(format!(
                    "spell slot level {} out of range",
                    level
                )));
            }
            record.spell_slots.insert(level, count);
        }
        for cantrip in raw.cantrips {
            record.add_cantrip(&cantrip).map_err(serde::de::Error::custom)?;
        }
        for spell in raw.spells {
            record.add_spell(spell);
        }
        Ok(record)
    }
}
