//! Validated name newtypes
//!
//! These newtypes ensure that names are valid by construction:
//! - Trimmed of leading/trailing whitespace
//! - Within length limits (measured in characters, not bytes)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Minimum length for a character name
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length for a character name
pub const MAX_NAME_LENGTH: usize = 30;

/// Maximum length for a free-text description
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (2..=30 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` (field `name`) if the trimmed name is
    /// shorter than 2 or longer than 30 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
            return Err(DomainError::validation(
                "name",
                format!(
                    "must be between {} and {} characters",
                    MIN_NAME_LENGTH, MAX_NAME_LENGTH
                ),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// Description
// ============================================================================

/// Free-text character description (non-empty, <=4000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("description", "cannot be empty"));
        }
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(
                "description",
                format!("cannot exceed {} characters", MAX_DESCRIPTION_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(d: Description) -> String {
        d.0
    }
}
