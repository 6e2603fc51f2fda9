//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Record storage (JSON files or SQLite)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::CharacterRepo;
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::MockCharacterRepo;
#[cfg(test)]
pub use testing::MockClockPort;
