//! Character sheet engine library.
//!
//! Everything around the pure domain crate: record stores, use cases and the
//! dialog front end.
//!
//! ## Structure
//!
//! - `use_cases/` - Load, apply, save orchestration over the domain
//! - `infrastructure/` - Record stores and other external dependencies (ports + adapters)
//! - `api/` - Dialog front end
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
