//! Error types for the reactloop domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; [`AgentError`] is the single
//! terminal error a failed run hands back to its caller.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single completion call. None of these are retried by the
/// client itself.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("No choices in response")]
    NoChoices,

    #[error("Empty content in response")]
    EmptyContent,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether the failure happened before a usable HTTP exchange completed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::ApiError { .. }
        )
    }
}

/// The model's reply could not be turned into an agent response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed structured output: {reason}")]
    Malformed { reason: String },

    #[error("invalid act format: {act}")]
    InvalidAct { act: String },
}

impl ParseError {
    /// A malformed envelope is worth asking the model again; a well-formed
    /// envelope carrying a broken act is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("{tool_name} failed: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

/// The tool catalog source could not be turned into prompt text.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read tool catalog at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse tool catalog at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// The last failure seen before an iteration ran out of attempts.
#[derive(Debug, Clone, Error)]
pub enum RetryCause {
    #[error("completion failed: {0}")]
    Completion(ProviderError),

    #[error("{0}")]
    Parse(ParseError),
}

/// Terminal outcome of a failed agent run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("iteration {iteration}: could not load tools: {source}")]
    Catalog {
        iteration: usize,
        #[source]
        source: CatalogError,
    },

    #[error("iteration {iteration}: failed after {attempts} attempts: {cause}")]
    MaxRetriesExceeded {
        iteration: usize,
        attempts: u32,
        cause: RetryCause,
    },

    #[error("iteration {iteration}: invalid act format: {act}")]
    InvalidActFormat { iteration: usize, act: String },

    #[error("no convergence: max iterations ({max_iterations}) reached without a finish act")]
    MaxIterationsExceeded { max_iterations: usize },

    #[error("iteration {iteration}: run canceled")]
    Canceled { iteration: usize },
}

impl AgentError {
    /// The iteration (1-based) in which the run failed, when one applies.
    pub fn iteration(&self) -> Option<usize> {
        match self {
            Self::Catalog { iteration, .. }
            | Self::MaxRetriesExceeded { iteration, .. }
            | Self::InvalidActFormat { iteration, .. }
            | Self::Canceled { iteration } => Some(*iteration),
            Self::MaxIterationsExceeded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn provider_error_categories() {
        assert!(ProviderError::Network("reset".into()).is_transport());
        assert!(ProviderError::Timeout(30).is_transport());
        assert!(!ProviderError::NoChoices.is_transport());
        assert!(!ProviderError::EmptyBody.is_transport());
    }

    #[test]
    fn tool_not_found_display_matches_observation() {
        let err = ToolError::NotFound("teleport".into());
        assert_eq!(err.to_string(), "Tool not found: teleport");
    }

    #[test]
    fn only_malformed_output_is_retryable() {
        let malformed = ParseError::Malformed {
            reason: "expected value".into(),
        };
        let bad_act = ParseError::InvalidAct {
            act: "calculator".into(),
        };
        assert!(malformed.is_retryable());
        assert!(!bad_act.is_retryable());
    }

    #[test]
    fn agent_error_reports_iteration_and_cause() {
        let err = AgentError::MaxRetriesExceeded {
            iteration: 4,
            attempts: 3,
            cause: RetryCause::Completion(ProviderError::EmptyContent),
        };
        assert_eq!(err.iteration(), Some(4));
        let text = err.to_string();
        assert!(text.contains("iteration 4"));
        assert!(text.contains("Empty content"));

        let err = AgentError::MaxIterationsExceeded { max_iterations: 10 };
        assert_eq!(err.iteration(), None);
        assert!(err.to_string().contains("no convergence"));
    }
}
