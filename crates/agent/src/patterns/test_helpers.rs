//! Shared test helpers for pattern tests.

use async_trait::async_trait;
use reactloop_core::catalog::ToolCatalog;
use reactloop_core::error::{CatalogError, ProviderError, ToolError};
use reactloop_core::provider::{Provider, ProviderRequest};
use reactloop_core::tool::Tool;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted replies.
///
/// Each call to `complete` records the request and returns the next reply
/// in the queue. Panics if more calls are made than replies provided.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<String, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no reply scripted for call #{call}"))
    }
}

/// A provider whose completion never resolves.
pub struct StalledProvider;

#[async_trait]
impl Provider for StalledProvider {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}

/// A well-formed model reply.
pub fn reply(reasoning: &str, act: &str) -> Result<String, ProviderError> {
    Ok(serde_json::json!({
        "reasoning": reasoning,
        "act": act,
        "observation": "",
    })
    .to_string())
}

pub fn network_error() -> Result<String, ProviderError> {
    Err(ProviderError::Network("connection reset".into()))
}

/// A catalog that can never be read.
pub struct BrokenCatalog;

impl ToolCatalog for BrokenCatalog {
    fn describe_tools(&self) -> Result<String, CatalogError> {
        Err(CatalogError::Read {
            path: PathBuf::from("tools.json"),
            reason: "No such file or directory".into(),
        })
    }
}

/// A tool that always fails.
pub struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "flaky"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn execute(&self, _args: &str) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "flaky".into(),
            reason: "upstream unavailable".into(),
        })
    }
}
