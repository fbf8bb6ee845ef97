//! CLI command implementations

pub mod config;
pub mod console;
pub mod oneshot;
