//! Aggregates
//!
//! The character sheet aggregate together with its creation draft and the
//! roster rule that keeps at most one character active per owner.

pub mod character;
pub mod creation;
pub mod roster;

pub use character::{validate_level, Character, MAX_LEVEL, MIN_LEVEL};
pub use creation::{parse_scores, CharacterDraft, CreationStep, DraftProgress};
