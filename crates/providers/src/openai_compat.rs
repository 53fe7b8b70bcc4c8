//! OpenAI-compatible provider implementation.
//!
//! Works with DeepSeek, OpenAI, and any endpoint exposing
//! `POST /chat/completions` with the OpenAI request/response shape.
//!
//! Supports:
//! - Plain-text completions (short timeout)
//! - JSON-object completions via `response_format` (long timeout)

use async_trait::async_trait;
use reactloop_core::error::ProviderError;
use reactloop_core::message::Message;
use reactloop_core::provider::{Provider, ProviderRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Everything the client needs to reach an endpoint. Built by the caller;
/// the client never consults the environment.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Name used in logs.
    pub name: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Deadline for free-text requests.
    pub text_timeout: Duration,
    /// Deadline for JSON-mode requests.
    pub json_timeout: Duration,
}

impl ProviderSettings {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            text_timeout: Duration::from_secs(30),
            json_timeout: Duration::from_secs(120),
        }
    }

    /// Override both request deadlines.
    pub fn with_timeouts(mut self, text: Duration, json: Duration) -> Self {
        self.text_timeout = text;
        self.json_timeout = json;
        self
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("text_timeout", &self.text_timeout)
            .field("json_timeout", &self.json_timeout)
            .finish()
    }
}

/// An OpenAI-compatible completion client.
pub struct OpenAiCompatProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self { settings, client })
    }

    /// Create a DeepSeek provider (convenience constructor).
    pub fn deepseek(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(ProviderSettings::new(
            "deepseek",
            "https://api.deepseek.com/v1",
            api_key,
            "deepseek-chat",
        ))
    }

    /// Create an OpenAI provider (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(ProviderSettings::new(
            "openai",
            "https://api.openai.com/v1",
            api_key,
            "gpt-4o-mini",
        ))
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Convert our Message types to OpenAI API format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage<'_>> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: m.role().as_str(),
                content: m.content(),
            })
            .collect()
    }

    fn map_send_error(&self, err: reqwest::Error, timeout: Duration) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(timeout.as_secs())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.settings.name
    }

    async fn complete(&self, request: ProviderRequest) -> Result<String, ProviderError> {
        if request.messages.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "at least one message is required".into(),
            ));
        }

        let url = format!("{}/chat/completions", self.settings.base_url);
        let timeout = if request.json_mode {
            self.settings.json_timeout
        } else {
            self.settings.text_timeout
        };

        let body = ChatRequest {
            model: &self.settings.model,
            messages: Self::to_api_messages(&request.messages),
            stream: false,
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(
            provider = %self.settings.name,
            model = %self.settings.model,
            messages = request.messages.len(),
            json_mode = request.json_mode,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_body,
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e, timeout))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::EmptyBody);
        }
        trace!(body = %trimmed, "Completion response body");

        let api_response: ApiResponse = serde_json::from_str(trimmed)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::NoChoices)?;

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyContent);
        }

        Ok(content)
    }
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    stream: bool,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ApiReplyMessage {
    #[serde(default)]
    content: Option<String>,
}
