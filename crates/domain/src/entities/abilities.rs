//! Ability scores with their derived modifier and saving-throw bonus.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::value_objects::{Ability, Skill};

/// Lowest score accepted at character creation.
pub const MIN_CREATION_SCORE: i32 = 3;

/// Highest score accepted at character creation.
pub const MAX_CREATION_SCORE: i32 = 18;

/// Raw score and derived values for a single ability.
///
/// `modifier` and `saving_throw_bonus` are written only by the calculation
/// engine; they are never read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityEntry {
    score: i32,
    modifier: i32,
    saving_throw_proficient: bool,
    saving_throw_bonus: i32,
}

impl AbilityEntry {
    fn with_score(score: i32) -> Self {
        Self {
            score,
            modifier: 0,
            saving_throw_proficient: false,
            saving_throw_bonus: 0,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn saving_throw_proficient(&self) -> bool {
        self.saving_throw_proficient
    }

    pub fn saving_throw_bonus(&self) -> i32 {
        self.saving_throw_bonus
    }
}

/// The six abilities of a character. Never grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityScores {
    entries: [AbilityEntry; 6],
}

impl AbilityScores {
    /// Build from creation input, in Strength..Charisma order.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` (field `abilities`) unless exactly six scores
    /// are supplied, each within 3..=18.
    pub fn from_creation_scores(scores: &[i32]) -> Result<Self, DomainError> {
        if scores.len() != Ability::ALL.len() {
            return Err(DomainError::validation(
                "abilities",
                format!("expected 6 scores, got {}", scores.len()),
            ));
        }
        if let Some(bad) = scores
            .iter()
            .find(|s| !(MIN_CREATION_SCORE..=MAX_CREATION_SCORE).contains(*s))
        {
            return Err(DomainError::validation(
                "abilities",
                format!(
                    "score {} is outside {}..={}",
                    bad, MIN_CREATION_SCORE, MAX_CREATION_SCORE
                ),
            ));
        }
        let mut entries = [AbilityEntry::with_score(10); 6];
        for (entry, score) in entries.iter_mut().zip(scores) {
            entry.score = *score;
        }
        Ok(Self { entries })
    }

    pub fn get(&self, ability: Ability) -> &AbilityEntry {
        &self.entries[ability.index()]
    }

    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).score
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, &AbilityEntry)> {
        Ability::ALL.iter().copied().zip(self.entries.iter())
    }

    /// Set a post-creation score. The creation range no longer applies.
    pub(crate) fn set_score(&mut self, ability: Ability, score: i32) -> Result<(), DomainError> {
        if score < 1 {
            return Err(DomainError::validation(
                "score",
                format!("{} score must be at least 1", ability),
            ));
        }
        self.entries[ability.index()].score = score;
        Ok(())
    }

    /// Replace-all: only the listed abilities end up proficient.
    pub(crate) fn set_saving_throw_proficiencies(&mut self, proficient: &[Ability]) {
        for (ability, entry) in Ability::ALL.iter().zip(self.entries.iter_mut()) {
            entry.saving_throw_proficient = proficient.contains(ability);
        }
    }

    pub(crate) fn apply_derived(&mut self, modifiers: &[i32; 6], saving_throws: &[i32; 6]) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.modifier = modifiers[i];
            entry.saving_throw_bonus = saving_throws[i];
        }
    }

    pub fn saving_throw_proficiencies(&self) -> Vec<Ability> {
        self.iter()
            .filter(|(_, e)| e.saving_throw_proficient)
            .map(|(a, _)| a)
            .collect()
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Persisted shape of one ability
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AbilityRecordOut {
    score: i32,
    modifier: i32,
    skills: &'static [Skill],
    saving_throw_proficient: bool,
    saving_throw_bonus: i32,
}

/// Only raw inputs are read back; derived fields are recomputed on load
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbilityRecordIn {
    score: i32,
    #[serde(default)]
    saving_throw_proficient: bool,
}

impl Serialize for AbilityScores {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ability, entry) in self.iter() {
            map.serialize_entry(
                &ability,
                &AbilityRecordOut {
                    score: entry.score,
                    modifier: entry.modifier,
                    skills: ability.skills(),
                    saving_throw_proficient: entry.saving_throw_proficient,
                    saving_throw_bonus: entry.saving_throw_bonus,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AbilityScores {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut records = BTreeMap::<Ability, AbilityRecordIn>::deserialize(deserializer)?;
        let mut entries = [AbilityEntry::with_score(10); 6];
        for (ability, entry) in Ability::ALL.iter().zip(entries.iter_mut()) {
            let record = records
                .remove(ability)
                .ok_or_else(|| D::Error::custom(format!("missing ability {}", ability)))?;
            entry.score = record.score;
            entry.saving_throw_proficient = record.saving_throw_proficient;
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> AbilityScores {
        AbilityScores::from_creation_scores(&[15, 14, 13, 12, 10, 8]).unwrap()
    }

    #[test]
    fn creation_scores_map_in_order() {
        let scores = standard();
        assert_eq!(scores.score(Ability::Strength), 15);
        assert_eq!(scores.score(Ability::Charisma), 8);
    }

    #[test]
    fn creation_requires_six_scores() {
        let err = AbilityScores::from_creation_scores(&[15, 14, 13, 12, 10]).unwrap_err();
        assert_eq!(err.field(), Some("abilities"));
        assert!(AbilityScores::from_creation_scores(&[10; 7]).is_err());
    }

    #[test]
    fn creation_range_is_three_to_eighteen() {
        assert!(AbilityScores::from_creation_scores(&[3, 18, 10, 10, 10, 10]).is_ok());
        assert!(AbilityScores::from_creation_scores(&[2, 10, 10, 10, 10, 10]).is_err());
        assert!(AbilityScores::from_creation_scores(&[19, 10, 10, 10, 10, 10]).is_err());
    }

    #[test]
    fn post_creation_scores_exceed_creation_range() {
        let mut scores = standard();
        scores.set_score(Ability::Strength, 24).unwrap();
        assert_eq!(scores.score(Ability::Strength), 24);
        assert!(scores.set_score(Ability::Strength, 0).is_err());
        assert_eq!(scores.score(Ability::Strength), 24);
    }

    #[test]
    fn saving_throws_replace_all() {
        let mut scores = standard();
        scores.set_saving_throw_proficiencies(&[Ability::Strength, Ability::Constitution]);
        scores.set_saving_throw_proficiencies(&[Ability::Wisdom]);
        assert_eq!(scores.saving_throw_proficiencies(), vec![Ability::Wisdom]);
    }

    #[test]
    fn serialized_shape_lists_skills() {
        let json = serde_json::to_value(standard()).unwrap();
        assert_eq!(json["Dexterity"]["score"], 14);
        assert_eq!(json["Dexterity"]["skills"][1], "Sleight of Hand");
        assert_eq!(json["Constitution"]["skills"].as_array().unwrap().len(), 0);
        assert_eq!(json["Wisdom"]["savingThrowProficient"], false);
    }

    #[test]
    fn deserialize_ignores_persisted_derived_values() {
        let mut json = serde_json::to_value(standard()).unwrap();
        json["Strength"]["modifier"] = serde_json::json!(99);
        let back: AbilityScores = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(Ability::Strength).modifier(), 0);
        assert_eq!(back.score(Ability::Strength), 15);
    }

    #[test]
    fn deserialize_requires_all_six() {
        let json = serde_json::json!({ "Strength": { "score": 10 } });
        assert!(serde_json::from_value::<AbilityScores>(json).is_err());
    }
}
