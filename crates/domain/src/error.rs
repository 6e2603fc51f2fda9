//! Unified error types for the domain layer
//!
//! Every sheet operation reports failures through [`DomainError`]. An operation
//! that returns an error leaves the aggregate exactly as it was.

use thiserror::Error;

use crate::value_objects::{Denomination, EquipmentCategory};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or out-of-range input for a named field
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Skill name that no ability declares
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// Ability name outside the six fixed abilities
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    /// Item already present in its equipment category
    #[error("'{item}' is already in {category}")]
    DuplicateItem {
        category: EquipmentCategory,
        item: String,
    },

    /// Item missing from its equipment category
    #[error("'{item}' not found in {category}")]
    ItemNotFound {
        category: EquipmentCategory,
        item: String,
    },

    /// A debit asked for more coins of one denomination than the purse holds
    #[error("Insufficient funds: {requested} {denomination} requested, {available} available")]
    InsufficientFunds {
        denomination: Denomination,
        available: u32,
        requested: u32,
    },

    /// The owner already has a character with this name
    #[error("Character '{0}' already exists")]
    DuplicateName(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error naming the offending field.
    ///
    /// # Example
    /// ```ignore
    /// if !(1..=20).contains(&level) {
    ///     return Err(DomainError::validation("level", "must be between 1 and 20"));
    /// }
    /// ```
    pub fn validation(field: &'static str, msg: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: msg.into(),
        }
    }

    /// Create an unknown skill error
    pub fn unknown_skill(name: impl Into<String>) -> Self {
        Self::UnknownSkill(name.into())
    }

    /// Create an unknown ability error
    pub fn unknown_ability(name: impl Into<String>) -> Self {
        Self::UnknownAbility(name.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The field a validation error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = DomainError::validation("level", "must be between 1 and 20");
        assert_eq!(err.field(), Some("level"));
        assert_eq!(err.to_string(), "Invalid level: must be between 1 and 20");
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = DomainError::InsufficientFunds {
            denomination: Denomination::Gold,
            available: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: 10 gold requested, 5 available"
        );
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_item_errors_mention_category() {
        let err = DomainError::DuplicateItem {
            category: EquipmentCategory::Weapons,
            item: "Longsword".into(),
        };
        assert!(err.to_string().contains("Weapons"));
        assert!(err.to_string().contains("Longsword"));
    }
}
