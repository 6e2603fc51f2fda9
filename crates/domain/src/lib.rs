//! Character sheet domain
//!
//! Pure, synchronous model of a tabletop character sheet: the fixed ruleset
//! tables, the per-character ledgers, the `Character` aggregate and the
//! calculation engine that keeps every derived stat consistent with its raw
//! inputs. No I/O happens here.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    parse_scores, roster, validate_level, Character, CharacterDraft, CreationStep, DraftProgress,
    MAX_LEVEL, MIN_LEVEL,
};
pub use entities::{
    AbilityEntry, AbilityScores, Coins, EquipmentLedger, HitPoints, KnownSpell, ProficiencyChange,
    ProficiencyLedger, ProficiencyLevel, ProgressionParameters, SpellcastingRecord, Speed,
    MAX_SPELL_LEVEL,
};
pub use error::DomainError;
pub use game_systems::{CalculationEngine, DerivedStats, Dnd5eRules, RULES};
pub use ids::OwnerId;
pub use value_objects::{
    Ability, CharacterClass, CharacterName, Denomination, Description, EquipmentCategory,
    MoneyOperation, Race, Skill,
};
