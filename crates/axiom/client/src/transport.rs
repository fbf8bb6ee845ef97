//! Wire types and transport for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use axiom_types::ChatMessage;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const JSON_MIME_TYPE: &str = "application/json";
const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 320;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content, as used for system instructions.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: Some(message.role.as_str().to_string()),
            parts: vec![Part::text(message.text.clone())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: &str) -> Self {
        self.system_instruction = Some(Content::instruction(instruction));
        self
    }

    /// Ask the model for a JSON-typed reply.
    pub fn with_json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        });
        self
    }

    pub fn expects_json(&self) -> bool {
        self.generation_config
            .as_ref()
            .and_then(|config| config.response_mime_type.as_deref())
            == Some(JSON_MIME_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Build a single-candidate response carrying `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part::text(text)],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    /// Concatenated text parts of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let text = self
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })?;

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Provider transport abstraction.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ClientResult<GenerateContentResponse>;
}

/// HTTP transport over `reqwest`.
pub struct HttpTransport {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key_present", &!self.api_key.is_empty())
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, api_key: impl Into<String>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GeminiTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ClientResult<GenerateContentResponse> {
        let url = resolve_endpoint(&self.endpoint, model)?;
        tracing::debug!(model, url = %url.path(), "sending generateContent request");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                message: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        Ok(response.json().await?)
    }
}

/// Turn a base endpoint into the `generateContent` URL for `model`. A URL that
/// already names the method is used as given.
pub fn resolve_endpoint(endpoint: &str, model: &str) -> ClientResult<Url> {
    let target = if endpoint.contains(":generateContent") {
        endpoint.to_string()
    } else {
        format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        )
    };

    Url::parse(&target).map_err(|e| ClientError::InvalidEndpoint {
        endpoint: target.clone(),
        reason: e.to_string(),
    })
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
