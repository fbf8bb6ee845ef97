//! The three remote calls behind the console.

use std::sync::Arc;

use axiom_types::{ChatMessage, ProtocolPayload, SynthesisResult};
use chrono::Utc;

use crate::config::{api_key_from_env, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::prompts::{CHAT_PERSONA, PROTOCOL_SYSTEM_INSTRUCTION};
use crate::transport::{Content, GeminiTransport, GenerateContentRequest, HttpTransport};

/// Remote synthesis client.
///
/// Error policy differs by call: [`SynthesisClient::request_protocol`] never
/// fails and substitutes the sentinel result, while chat and fast query
/// return [`ClientError`] to the caller.
#[derive(Clone)]
pub struct SynthesisClient {
    config: ClientConfig,
    transport: Arc<dyn GeminiTransport>,
}

impl std::fmt::Debug for SynthesisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisClient")
            .field("config", &self.config)
            .finish()
    }
}

impl SynthesisClient {
    pub fn new(config: ClientConfig, api_key: impl Into<String>) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config, api_key)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build an HTTP client using the key from the environment.
    pub fn from_env(config: ClientConfig) -> ClientResult<Self> {
        Self::new(config, api_key_from_env())
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn GeminiTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate a structured protocol for `prompt`.
    ///
    /// The timestamp is assigned once the call settles. Any failure yields
    /// [`SynthesisResult::sentinel`].
    pub async fn request_protocol(&self, prompt: &str) -> SynthesisResult {
        match self.try_request_protocol(prompt).await {
            Ok(payload) => {
                let result = payload.into_result(Utc::now());
                tracing::info!(
                    model = %self.config.protocol_model,
                    signature = %result.signature,
                    "protocol synthesized"
                );
                result
            }
            Err(err) => {
                tracing::warn!(
                    model = %self.config.protocol_model,
                    error = %err,
                    "protocol synthesis failed, substituting sentinel"
                );
                SynthesisResult::sentinel(Utc::now())
            }
        }
    }

    async fn try_request_protocol(&self, prompt: &str) -> ClientResult<ProtocolPayload> {
        let request = GenerateContentRequest::new(vec![Content::user(prompt)])
            .with_system_instruction(PROTOCOL_SYSTEM_INSTRUCTION)
            .with_json_response();
        let text = self.complete(&self.config.protocol_model, &request).await?;
        Ok(ProtocolPayload::from_json(&text)?)
    }

    /// Send one chat turn with the full prior transcript as context.
    pub async fn send_chat_turn(
        &self,
        message: &str,
        prior_turns: &[ChatMessage],
    ) -> ClientResult<String> {
        let mut contents: Vec<Content> = prior_turns.iter().map(Content::from).collect();
        contents.push(Content::user(message));
        tracing::debug!(
            model = %self.config.chat_model,
            turns = contents.len(),
            "sending chat turn"
        );

        let request =
            GenerateContentRequest::new(contents).with_system_instruction(CHAT_PERSONA);
        self.complete(&self.config.chat_model, &request).await
    }

    /// Single-shot query against the low-latency model.
    pub async fn fast_query(&self, prompt: &str) -> ClientResult<String> {
        let request = GenerateContentRequest::new(vec![Content::user(prompt)]);
        self.complete(&self.config.fast_model, &request).await
    }

    async fn complete(&self, model: &str, request: &GenerateContentRequest) -> ClientResult<String> {
        let response = self.transport.generate_content(model, request).await?;
        response
            .text()
            .ok_or_else(|| ClientError::EmptyResponse(model.to_string()))
    }
}
