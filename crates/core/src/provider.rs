//! Provider trait: the abstraction over the completion endpoint.
//!
//! A Provider knows how to send a conversation to a language model and get
//! the text of its first reply back. The agent loop only ever sees this
//! trait; transport details (URL, auth, timeouts) belong to implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The conversation messages, system prompt first.
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 2.0 = very creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Ask the model for a JSON object instead of free text.
    #[serde(default)]
    pub json_mode: bool,
}

fn default_temperature() -> f32 {
    0.2
}

impl ProviderRequest {
    /// A free-text request.
    pub fn text(messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            messages,
            temperature,
            json_mode: false,
        }
    }

    /// A request for a JSON object reply.
    pub fn json(messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            messages,
            temperature,
            json_mode: true,
        }
    }
}

/// The completion client contract.
///
/// Implementations return the raw text content of the first reply choice
/// and report every failure as a distinct [`ProviderError`]; they never
/// retry on their own. Validating that the text is JSON is the caller's job.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "deepseek", "openai").
    fn name(&self) -> &str;

    /// Send a request and get the reply text.
    async fn complete(&self, request: ProviderRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_json_mode() {
        let text = ProviderRequest::text(vec![Message::user("hi")], 0.7);
        assert!(!text.json_mode);
        let json = ProviderRequest::json(vec![Message::user("hi")], 0.2);
        assert!(json.json_mode);
        assert!((json.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn request_defaults_when_deserialized() {
        let req: ProviderRequest = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert!((req.temperature - 0.2).abs() < f32::EPSILON);
        assert!(!req.json_mode);
    }
}
