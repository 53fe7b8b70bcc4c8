//! The reason-act-observe agent loop.
//!
//! Each iteration:
//!
//! 1. **Describe** the available tools (re-read from the catalog)
//! 2. **Ask** the model, sending the system prompt and the full transcript
//! 3. **Parse** the JSON reply into an [`AgentResponse`] with an [`Act`]
//! 4. **Finish** on `finish|<answer>`, or **dispatch** `<tool>|<args>` and
//!    append the observation to the transcript
//!
//! The loop ends on a finish act, a fatal error, or the iteration limit.

pub mod act;
pub mod parser;
pub mod patterns;
pub mod prompt;
pub mod retry;
pub mod state;

pub use act::Act;
pub use parser::{AgentResponse, parse};
pub use patterns::ReactAgent;
pub use prompt::build_system_prompt;
pub use reactloop_core::DEFAULT_SYSTEM_PROMPT;
pub use retry::RetryPolicy;
pub use state::{AgentState, Phase};
