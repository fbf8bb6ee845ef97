//! Remote synthesis client for the Axiom console.
//!
//! Wraps three calls to the Gemini `generateContent` API:
//!
//! - `request_protocol`: structured JSON protocol, failures become the sentinel
//! - `send_chat_turn`: multi-turn chat with the whole transcript as context
//! - `fast_query`: single-shot call to a low-latency model
//!
//! The transport sits behind [`GeminiTransport`] so the client can be driven
//! without a network.

#![deny(unsafe_code)]

mod client;
pub mod config;
mod error;
pub mod prompts;
pub mod transport;

pub use client::SynthesisClient;
pub use config::{api_key_from_env, ClientConfig, AUTH_ENV_VAR};
pub use error::{ClientError, ClientResult};
pub use transport::{
    Content, GeminiTransport, GenerateContentRequest, GenerateContentResponse, HttpTransport,
};
