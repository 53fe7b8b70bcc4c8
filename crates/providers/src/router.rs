//! Provider construction from configuration, plus the one-shot helper.

use std::sync::Arc;

use reactloop_config::AppConfig;
use reactloop_core::error::ProviderError;
use reactloop_core::message::Message;
use reactloop_core::provider::{Provider, ProviderRequest};

use crate::openai_compat::{OpenAiCompatProvider, ProviderSettings};

/// Build the configured provider.
///
/// Fails with `NotConfigured` when no API key is available; callers are
/// expected to have checked `AppConfig::require_api_key` already.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .require_api_key()
        .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;

    let settings = ProviderSettings::new(&config.provider, &config.base_url, api_key, &config.model)
        .with_timeouts(config.http.text_timeout(), config.http.json_timeout());

    Ok(Arc::new(OpenAiCompatProvider::new(settings)?))
}

/// Ask a single free-text question: one system message, one user message.
pub async fn oneshot(
    provider: &dyn Provider,
    system: &str,
    user: &str,
    temperature: f32,
) -> Result<String, ProviderError> {
    let request = ProviderRequest::text(
        vec![Message::system(system), Message::user(user)],
        temperature,
    );
    provider.complete(request).await
}
