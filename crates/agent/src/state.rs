//! Per-run agent state.

use reactloop_core::message::{Message, Transcript};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Iterating { iteration: usize },
    Finished { iterations: usize },
    Failed { iteration: usize },
}

/// The mutable side of one run: the user's prompt and the transcript
/// replayed to the model every iteration.
///
/// `memory[0]` is always the user prompt. Each non-final iteration adds an
/// assistant message and an observation, so after `k` of them the
/// transcript holds `1 + 2k` messages.
#[derive(Debug, Clone)]
pub struct AgentState {
    user_prompt: String,
    memory: Transcript,
    phase: Phase,
}

impl AgentState {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        let user_prompt = user_prompt.into();
        let mut memory = Transcript::new();
        memory.push(Message::user(&user_prompt));
        Self {
            user_prompt,
            memory,
            phase: Phase::Init,
        }
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn transcript(&self) -> &Transcript {
        &self.memory
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Render the transcript for diagnostics.
    pub fn render_transcript(&self) -> String {
        self.memory.render()
    }

    /// Back to a single user message, ready for a fresh run.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.user_prompt));
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Record one completed tool step.
    pub(crate) fn record_step(&mut self, assistant: String, observation: &str) {
        self.memory.push(Message::assistant(assistant));
        self.memory.push(Message::user(format!("Observation: {observation}")));
    }
}
