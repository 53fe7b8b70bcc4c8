//! Configuration loading, validation, and management for reactloop.
//!
//! Loads configuration from `~/.reactloop/config.toml` with environment
//! variable overrides. Validates all settings at startup. Nothing in the
//! other crates reads the environment: this struct is built once and its
//! values are passed down explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use reactloop_core::DEFAULT_SYSTEM_PROMPT;

/// Environment variables checked for the API key, highest priority first.
pub const API_KEY_VARS: &[&str] = &[
    "REACTLOOP_API_KEY",
    "DEEPSEEK_API_KEY",
    "DEEPSEEKAPIKEY",
    "OPENAI_API_KEY",
];

/// The root configuration structure.
///
/// Maps directly to `~/.reactloop/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Provider name, used in logs
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Tool catalog settings
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_provider() -> String {
    "deepseek".into()
}
fn default_base_url() -> String {
    "https://api.deepseek.com/v1".into()
}
fn default_model() -> String {
    "deepseek-chat".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("agent", &self.agent)
            .field("http", &self.http)
            .field("tools", &self.tools)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base system prompt; the tool catalog and act format are appended to it
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Iterations allowed before a run fails without converging
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Completion attempts per iteration (transport and parse failures share it)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait after a failed completion call before retrying
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_iterations() -> usize {
    10
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_secs() -> u64 {
    30
}

impl AgentConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_iterations: default_max_iterations(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for free-text completions
    #[serde(default = "default_text_timeout")]
    pub text_timeout_secs: u64,

    /// Timeout for JSON-mode completions (structured generation is slower)
    #[serde(default = "default_json_timeout")]
    pub json_timeout_secs: u64,
}

fn default_text_timeout() -> u64 {
    30
}
fn default_json_timeout() -> u64 {
    120
}

impl HttpConfig {
    pub fn text_timeout(&self) -> Duration {
        Duration::from_secs(self.text_timeout_secs)
    }

    pub fn json_timeout(&self) -> Duration {
        Duration::from_secs(self.json_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            text_timeout_secs: default_text_timeout(),
            json_timeout_secs: default_json_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// JSON tool catalog shown to the model
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("tools.json")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.reactloop/config.toml),
    /// then apply environment overrides.
    ///
    /// API key variables, first match wins and only when the file has none:
    /// `REACTLOOP_API_KEY`, `DEEPSEEK_API_KEY`, `DEEPSEEKAPIKEY`,
    /// `OPENAI_API_KEY`. A non-blank `REACTLOOP_MODEL` or
    /// `REACTLOOP_BASE_URL` overrides the file.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.api_key = None;
        }
        if self.api_key.is_none() {
            self.api_key = API_KEY_VARS
                .iter()
                .filter_map(|key| lookup(*key))
                .find(|value| !value.trim().is_empty());
        }

        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = non_blank("REACTLOOP_MODEL") {
            self.model = model;
        }

        if let Some(base_url) = non_blank("REACTLOOP_BASE_URL") {
            self.base_url = base_url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".reactloop")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(ConfigError::ValidationError(
                "agent.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.agent.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_attempts must be at least 1".into(),
            ));
        }

        if self.http.text_timeout_secs == 0 || self.http.json_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http timeouts must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// The API key, or the fatal error that must stop startup.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            agent: AgentConfig::default(),
            http: HttpConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured (set REACTLOOP_API_KEY or DEEPSEEK_API_KEY, or api_key in config.toml)")]
    MissingApiKey,
}
