//! Interaction shell for the Axiom console.
//!
//! The shell owns one [`SessionState`] container and sequences the three
//! user-triggered actions against the remote synthesis client:
//!
//! - generate: cosmetic progress stages, then a structured protocol request
//! - chat: one conversational turn with the full transcript as context
//! - fast query: one single-shot lookup
//!
//! Each action kind has its own busy flag. A submission made while its kind
//! is in flight, while the console is locked, or with blank input is ignored
//! and never reaches the network.

#![deny(unsafe_code)]

pub mod config;
pub mod event;
pub mod log;
mod shell;
pub mod state;

pub use config::ShellConfig;
pub use event::ShellEvent;
pub use log::{LogBuffer, LogEntry, LogLevel};
pub use shell::{ActionOutcome, IgnoreReason, Shell, CHAT_FALLBACK, FAST_QUERY_FALLBACK};
pub use state::{ActionKind, AuthPhase, BusyFlags, Inputs, Progress, ProgressStage, SessionState};
