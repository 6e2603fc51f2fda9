//! Use cases - User story orchestration.
//!
//! Each module contains use cases for one area of the character sheet.

pub mod creation;
pub mod management;

pub use creation::CharacterCreation;
pub use management::{ManagementError, ManagementUseCases};
