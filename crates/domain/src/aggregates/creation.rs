//! Step-by-step character creation.
//!
//! A [`CharacterDraft`] accumulates creation input one step at a time. A
//! rejected input keeps the draft at the same step so the caller can
//! re-prompt; creation never aborts on bad input.

use crate::aggregates::character::{validate_level, Character};
use crate::error::DomainError;
use crate::ids::OwnerId;
use crate::value_objects::{CharacterClass, CharacterName, Race};

/// Input the draft is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStep {
    Name,
    Race,
    Class,
    Level,
    Abilities,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftProgress {
    /// Input accepted, waiting for the next step
    Next(CreationStep),
    /// All inputs accepted
    Complete(Box<Character>),
}

/// Character creation in progress.
#[derive(Debug, Clone)]
pub struct CharacterDraft {
    owner: OwnerId,
    taken: Vec<CharacterName>,
    step: CreationStep,
    name: Option<CharacterName>,
    race: Option<Race>,
    class: Option<CharacterClass>,
    level: Option<u8>,
}

impl CharacterDraft {
    /// Start a draft. `taken` holds the names the owner already uses.
    pub fn new(owner: OwnerId, taken: Vec<CharacterName>) -> Self {
        Self {
            owner,
            taken,
            step: CreationStep::Name,
            name: None,
            race: None,
            class: None,
            level: None,
        }
    }

    pub fn step(&self) -> CreationStep {
        self.step
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Submit raw text for the current step.
    ///
    /// # Errors
    ///
    /// The step's validation error; the draft stays at the same step.
    pub fn submit(&mut self, input: &str) -> Result<DraftProgress, DomainError> {
        match self.step {
            CreationStep::Name => self.submit_name(input),
            CreationStep::Race => self.submit_race(input.parse()?),
            CreationStep::Class => self.submit_class(input.parse()?),
            CreationStep::Level => {
                let level = input.trim().parse::<i64>().map_err(|_| {
                    DomainError::validation("level", format!("'{}' is not a number", input.trim()))
                })?;
                self.submit_level(level)
            }
            CreationStep::Abilities => self.submit_abilities(&parse_scores(input)?),
        }
    }

    /// # Errors
    ///
    /// `DomainError::Validation` for a malformed name, `DomainError::DuplicateName`
    /// when the owner already has a character called this.
    pub fn submit_name(&mut self, input: &str) -> Result<DraftProgress, DomainError> {
        self.expect_step(CreationStep::Name)?;
        let name = CharacterName::new(input)?;
        if self.taken.contains(&name) {
            return Err(DomainError::DuplicateName(name.to_string()));
        }
        self.name = Some(name);
        Ok(self.advance(CreationStep::Race))
    }

    pub fn submit_race(&mut self, race: Race) -> Result<DraftProgress, DomainError> {
        self.expect_step(CreationStep::Race)?;
        self.race = Some(race);
        Ok(self.advance(CreationStep::Class))
    }

    pub fn submit_class(&mut self, class: CharacterClass) -> Result<DraftProgress, DomainError> {
        self.expect_step(CreationStep::Class)?;
        self.class = Some(class);
        Ok(self.advance(CreationStep::Level))
    }

    pub fn submit_level(&mut self, level: i64) -> Result<DraftProgress, DomainError> {
        self.expect_step(CreationStep::Level)?;
        self.level = Some(validate_level(level)?);
        Ok(self.advance(CreationStep::Abilities))
    }

    /// Final step: builds the character.
    pub fn submit_abilities(&mut self, scores: &[i32]) -> Result<DraftProgress, DomainError> {
        self.expect_step(CreationStep::Abilities)?;
        let (Some(name), Some(race), Some(class), Some(level)) =
            (self.name.clone(), self.race, self.class, self.level)
        else {
            return Err(DomainError::validation("draft", "earlier steps are incomplete"));
        };
        let character = Character::create(self.owner.clone(), name, race, class, level, scores)?;
        Ok(DraftProgress::Complete(Box::new(character)))
    }

    fn expect_step(&self, step: CreationStep) -> Result<(), DomainError> {
        if self.step == step {
            Ok(())
        } else {
            Err(DomainError::validation(
                "draft",
                format!("expected {:?} input, draft is at {:?}", step, self.step),
            ))
        }
    }

    fn advance(&mut self, next: CreationStep) -> DraftProgress {
        self.step = next;
        DraftProgress::Next(next)
    }
}

/// Parse whitespace or comma separated ability scores.
///
/// # Errors
///
/// `DomainError::Validation` (field `abilities`) on a non-integer token.
pub fn parse_scores(input: &str) -> Result<Vec<i32>, DomainError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i32>().map_err(|_| {
                DomainError::validation("abilities", format!("'{}' is not a number", token))
            })
        })
        .collect()
}
