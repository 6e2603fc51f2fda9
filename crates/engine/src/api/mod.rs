//! API layer - front ends over the use cases.

pub mod dialog;

pub use dialog::{Command, DialogService, Reply};
