//! Agent patterns.
//!
//! - **ReAct**: reason, act through a tool, observe, repeat until the model
//!   issues a finish act.

pub mod react;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use react::ReactAgent;
