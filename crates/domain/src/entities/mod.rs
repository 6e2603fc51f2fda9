//! Domain entities - the parts a character sheet is made of

mod abilities;
mod equipment;
mod proficiency;
mod progression;
mod spellcasting;

pub use abilities::{AbilityEntry, AbilityScores, MAX_CREATION_SCORE, MIN_CREATION_SCORE};
pub use equipment::{Coins, EquipmentLedger};
pub use proficiency::{ProficiencyChange, ProficiencyLedger, ProficiencyLevel};
pub use progression::{
    HitPoints, ProgressionParameters, Speed, DEFAULT_ARMOR_CLASS, DEFAULT_PROFICIENCY_BONUS,
    DEFAULT_WALK_SPEED,
};
pub use spellcasting::{KnownSpell, SpellcastingRecord, MAX_SPELL_LEVEL};
