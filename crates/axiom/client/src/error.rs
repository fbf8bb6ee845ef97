//! Client error types

use thiserror::Error;

/// Errors raised by remote calls.
///
/// Only the chat and fast-query paths surface these; the generate path turns
/// every failure into the sentinel result.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// Response text was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model returned no candidate text
    #[error("empty response from model {0}")]
    EmptyResponse(String),

    /// Endpoint could not be turned into a request URL
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
