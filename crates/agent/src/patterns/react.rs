//! ReAct pattern: Reasoning → Act → Observation loop.
//!
//! Every iteration the model sees the system prompt (base prompt, tool
//! catalog, response contract) followed by the whole transcript, and answers
//! with one JSON object naming its next act.
//!
//! # Iteration
//!
//! - `finish|<answer>` ends the run; nothing is appended to the transcript.
//! - `<tool>|<args>` is dispatched to the registry. The result (or
//!   `Tool not found: <tool>`, or `Error: <message>`) is fed back as
//!   `Observation: ...` and the loop continues.
//! - An act without a `|` ends the run with an error. It is not retried
//!   and not fed back.
//!
//! Completion errors and malformed replies share a per-iteration retry
//! budget. Only completion errors wait before the next attempt.

use reactloop_core::DEFAULT_SYSTEM_PROMPT;
use reactloop_core::catalog::ToolCatalog;
use reactloop_core::error::{AgentError, ParseError, ProviderError, RetryCause, ToolError};
use reactloop_core::message::Message;
use reactloop_core::provider::{Provider, ProviderRequest};
use reactloop_core::tool::ToolRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::act::Act;
use crate::parser::{self, AgentResponse};
use crate::prompt::build_system_prompt;
use crate::retry::RetryPolicy;
use crate::state::{AgentState, Phase};

/// A reusable ReAct agent. Each run owns its own [`AgentState`].
pub struct ReactAgent {
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Tool listing shown to the model.
    catalog: Arc<dyn ToolCatalog>,
    /// Tools acts are dispatched to.
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    temperature: f32,
    max_iterations: usize,
    retry: RetryPolicy,
    cancel: Option<CancellationToken>,
}

impl ReactAgent {
    /// Create a new ReAct agent.
    pub fn new(
        provider: Arc<dyn Provider>,
        catalog: Arc<dyn ToolCatalog>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            catalog,
            tools,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.2,
            max_iterations: 10,
            retry: RetryPolicy::default(),
            cancel: None,
        }
    }

    /// Replace the base system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max iterations.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Abort the run when this token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run the loop from a fresh transcript and return the finishing reply,
    /// whose `observation` holds the final answer.
    ///
    /// A state that was used before is reset to its initial user prompt.
    pub async fn run(&self, state: &mut AgentState) -> Result<AgentResponse, AgentError> {
        state.reset();
        info!(
            provider = %self.provider.name(),
            max_iter = self.max_iterations,
            "ReAct loop starting"
        );

        match self.iterate(state).await {
            Ok((response, iterations)) => {
                state.set_phase(Phase::Finished { iterations });
                info!(iterations, "ReAct loop finished");
                Ok(response)
            }
            Err(e) => {
                let iteration = e.iteration().unwrap_or(self.max_iterations);
                state.set_phase(Phase::Failed { iteration });
                warn!(error = %e, "ReAct loop failed");
                Err(e)
            }
        }
    }

    /// Run a fresh state for `user_prompt` and return only the answer.
    pub async fn answer(&self, user_prompt: &str) -> Result<String, AgentError> {
        let mut state = AgentState::new(user_prompt);
        let response = self.run(&mut state).await?;
        Ok(response.observation)
    }

    async fn iterate(&self, state: &mut AgentState) -> Result<(AgentResponse, usize), AgentError> {
        for iteration in 1..=self.max_iterations {
            state.set_phase(Phase::Iterating { iteration });
            debug!(iteration, transcript_len = state.transcript().len(), "ReAct iteration");

            let tools_text = self
                .catalog
                .describe_tools()
                .map_err(|source| AgentError::Catalog { iteration, source })?;
            let system = build_system_prompt(&self.system_prompt, &tools_text);

            let mut messages = Vec::with_capacity(state.transcript().len() + 1);
            messages.push(Message::system(system));
            messages.extend(state.transcript().messages().iter().cloned());

            let mut response = self.ask(iteration, messages).await?;
            info!(iteration, reasoning = %response.reasoning, act = %response.act, "ReAct step");

            let observation = match &response.act {
                Act::Finish { answer } => {
                    response.observation = answer.clone();
                    return Ok((response, iteration));
                }
                Act::Invoke { tool, args } => self.observe(tool, args).await,
            };
            debug!(iteration, observation = %observation, "Observation");

            let assistant = format!("Reasoning: {}\nAct: {}", response.reasoning, response.act);
            state.record_step(assistant, &observation);
        }

        warn!("ReAct: max iterations reached ({})", self.max_iterations);
        Err(AgentError::MaxIterationsExceeded {
            max_iterations: self.max_iterations,
        })
    }

    /// Ask the model until it gives a decodable reply or the retry budget
    /// for this iteration runs out.
    async fn ask(&self, iteration: usize, messages: Vec<Message>) -> Result<AgentResponse, AgentError> {
        let max_attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = ProviderRequest::json(messages.clone(), self.temperature);

            let cause = match self.complete(iteration, request).await? {
                Ok(raw) => {
                    debug!(iteration, attempt, raw = %raw, "Raw model reply");
                    match parser::parse(&raw) {
                        Ok(response) => return Ok(response),
                        Err(ParseError::InvalidAct { act }) => {
                            return Err(AgentError::InvalidActFormat { iteration, act });
                        }
                        Err(e) => RetryCause::Parse(e),
                    }
                }
                Err(e) => RetryCause::Completion(e),
            };

            if attempt >= max_attempts {
                return Err(AgentError::MaxRetriesExceeded {
                    iteration,
                    attempts: attempt,
                    cause,
                });
            }

            warn!(
                iteration,
                attempt,
                max_attempts,
                cause = %cause,
                "Retrying model call"
            );

            if let RetryCause::Completion(_) = cause {
                self.backoff(iteration, self.retry.delay(attempt)).await?;
            }
        }
    }

    /// One completion call, abandoned if the run is cancelled first.
    async fn complete(
        &self,
        iteration: usize,
        request: ProviderRequest,
    ) -> Result<Result<String, ProviderError>, AgentError> {
        let Some(token) = &self.cancel else {
            return Ok(self.provider.complete(request).await);
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(AgentError::Canceled { iteration }),
            result = self.provider.complete(request) => Ok(result),
        }
    }

    async fn backoff(&self, iteration: usize, delay: Duration) -> Result<(), AgentError> {
        let Some(token) = &self.cancel else {
            tokio::time::sleep(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(AgentError::Canceled { iteration }),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    /// Execute a tool act and turn the outcome into observation text.
    async fn observe(&self, tool: &str, args: &str) -> String {
        match self.tools.execute(tool, args).await {
            Ok(output) => output,
            Err(e @ ToolError::NotFound(_)) => {
                warn!(tool, "Model asked for an unknown tool");
                e.to_string()
            }
            Err(e) => {
                warn!(tool, error = %e, "Tool execution failed");
                format!("Error: {e}")
            }
        }
    }
}
