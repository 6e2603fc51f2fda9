//! Record store adapters.

mod json_file;
mod sqlite;

pub use json_file::JsonFileCharacterRepo;
pub use sqlite::SqliteCharacterRepo;
