//! Skill proficiency and expertise sets.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::value_objects::Skill;

/// How strongly a character is trained in a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProficiencyLevel {
    /// Not proficient
    None,
    /// Standard proficiency
    Proficient,
    /// Expertise (double proficiency)
    Expert,
}

/// Net effect of a toggle on the targeted set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProficiencyChange {
    pub added: Vec<Skill>,
    pub removed: Vec<Skill>,
}

/// Proficient and expert skill sets plus the derived per-skill bonuses.
///
/// # Invariants
///
/// - A skill is never in both `proficient` and `expert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyLedger {
    proficient: BTreeSet<Skill>,
    expert: BTreeSet<Skill>,
    /// Written by the calculation engine only
    skill_bonuses: BTreeMap<Skill, i32>,
}

impl ProficiencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proficient(&self) -> &BTreeSet<Skill> {
        &self.proficient
    }

    pub fn expert(&self) -> &BTreeSet<Skill> {
        &self.expert
    }

    pub fn skill_bonuses(&self) -> &BTreeMap<Skill, i32> {
        &self.skill_bonuses
    }

    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        self.skill_bonuses.get(&skill).copied().unwrap_or(0)
    }

    pub fn level(&self, skill: Skill) -> ProficiencyLevel {
        if self.expert.contains(&skill) {
            ProficiencyLevel::Expert
        } else if self.proficient.contains(&skill) {
            ProficiencyLevel::Proficient
        } else {
            ProficiencyLevel::None
        }
    }

    /// Symmetric difference of `skills` against the proficient set.
    ///
    /// Every toggled skill is evicted from the expert set.
    pub(crate) fn toggle_proficiency(&mut self, skills: &[Skill]) -> ProficiencyChange {
        let change = Self::xor(&mut self.proficient, skills);
        for skill in skills {
            self.expert.remove(skill);
        }
        change
    }

    /// Symmetric difference of `skills` against the expert set.
    ///
    /// Every toggled skill is evicted from the proficient set.
    pub(crate) fn toggle_expertise(&mut self, skills: &[Skill]) -> ProficiencyChange {
        let change = Self::xor(&mut self.expert, skills);
        for skill in skills {
            self.proficient.remove(skill);
        }
        change
    }

    pub(crate) fn set_skill_bonuses(&mut self, bonuses: BTreeMap<Skill, i32>) {
        self.skill_bonuses = bonuses;
    }

    fn xor(set: &mut BTreeSet<Skill>, skills: &[Skill]) -> ProficiencyChange {
        // Duplicates in one submission count once
        let batch: BTreeSet<Skill> = skills.iter().copied().collect();
        let mut change = ProficiencyChange::default();
        for skill in batch {
            if set.remove(&skill) {
                change.removed.push(skill);
            } else {
                set.insert(skill);
                change.added.push(skill);
            }
        }
        change
    }
}

impl<'de> Deserialize<'de> for ProficiencyLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            proficient: BTreeSet<Skill>,
            #[serde(default)]
            expert: BTreeSet<Skill>,
        }
        let Raw {
            mut proficient,
            expert,
        } = Raw::deserialize(deserializer)?;
        // A record holding a skill in both sets keeps the expertise
        proficient.retain(|s| !expert.contains(s));
        Ok(Self {
            proficient,
            expert,
            skill_bonuses: BTreeMap::new(),
        })
    }
}
