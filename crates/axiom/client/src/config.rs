//! Remote API configuration

use serde::{Deserialize, Serialize};

pub const AUTH_ENV_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PROTOCOL_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash-lite";

/// Endpoint and model selection for the three remote calls.
///
/// The API key is not part of this struct; it comes from the process
/// environment only, see [`api_key_from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for structured protocol synthesis
    #[serde(default = "default_protocol_model")]
    pub protocol_model: String,

    /// Model used for multi-turn chat
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Low-latency model used for fast queries
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Request timeout in seconds; unset leaves the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            protocol_model: default_protocol_model(),
            chat_model: default_chat_model(),
            fast_model: default_fast_model(),
            request_timeout_secs: None,
        }
    }
}

/// Read the API key. A missing variable yields an empty credential, so calls
/// fail when issued rather than at startup.
pub fn api_key_from_env() -> String {
    std::env::var(AUTH_ENV_VAR).unwrap_or_default()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_protocol_model() -> String {
    DEFAULT_PROTOCOL_MODEL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_fast_model() -> String {
    DEFAULT_FAST_MODEL.to_string()
}
