//! Game system rules.
//!
//! The recomputation engine is a pure function of a character snapshot plus
//! the static ruleset tables in `value_objects`.

mod dnd5e;
mod traits;

pub use dnd5e::Dnd5eRules;
pub use traits::{CalculationEngine, DerivedStats};

/// Ruleset used by every character sheet.
pub static RULES: Dnd5eRules = Dnd5eRules::new();
