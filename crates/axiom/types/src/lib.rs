//! Data model for the Axiom protocol synthesis console.
//!
//! Everything here is session-scoped and lives in memory only:
//!
//! - [`SynthesisResult`]: one structured reply of the generate call, or the
//!   sentinel value substituted when that call fails
//! - [`History`]: most-recent-first sequence of results
//! - [`ChatMessage`] / [`ChatTranscript`]: conversational context resent on
//!   every chat turn

#![deny(unsafe_code)]

pub mod chat;
pub mod history;
pub mod result;

pub use chat::{ChatMessage, ChatRole, ChatTranscript};
pub use history::History;
pub use result::{
    fallback_signature, is_fallback_signature, Metrics, ProtocolPayload, SynthesisResult,
    SENTINEL_AXIOM, SENTINEL_SIGNATURE, SIGNATURE_PREFIX,
};

use serde::{Deserialize, Serialize};

/// Identifier of one console session, used to correlate log output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("session-{}", uuid::Uuid::new_v4()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_prefixed_and_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert!(a.to_string().starts_with("session-"));
        assert_ne!(a, b);
    }
}
