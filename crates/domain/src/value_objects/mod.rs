//! Value objects - Immutable objects defined by their attributes
//!
//! The fixed ruleset vocabulary (abilities, skills, races, classes) lives here
//! as static read-only tables. None of it is per-character state.

/// Declares a closed enum whose variants round-trip through a display name.
///
/// Parsing is case-insensitive and ignores surrounding whitespace; the
/// canonical display name is what gets persisted.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:path, {
            $($variant:ident => $display:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical display name.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.display_name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.display_name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $err(wanted))
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::error::DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.display_name().to_string()
            }
        }
    };
}

mod ability;
mod inventory;
mod names;
mod race_class;

pub use ability::{Ability, Skill};
pub use inventory::{Denomination, EquipmentCategory, MoneyOperation};
pub use names::{CharacterName, Description, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
pub use race_class::{CharacterClass, Race};
