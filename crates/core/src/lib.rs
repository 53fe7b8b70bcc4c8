//! # reactloop Core
//!
//! Domain types, traits, and error definitions for the reactloop
//! reason-act-observe agent. This crate has **no HTTP or runtime
//! dependencies**: it defines the model that the provider, tool and agent
//! crates implement against.
//!
//! ## Seams
//!
//! - [`Provider`] is the completion client the agent loop talks to.
//! - [`Tool`] and [`ToolRegistry`] are what the loop dispatches acts to.
//! - [`ToolCatalog`] renders the tool listing placed in the system prompt.
//!
//! Each seam is a trait so the loop can be driven by scripted stand-ins in
//! tests.

pub mod catalog;
pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use catalog::{ParameterDescriptor, ToolCatalog, ToolDescriptor, render_tools};
pub use error::{AgentError, CatalogError, ParseError, ProviderError, RetryCause, ToolError};
pub use message::{Message, Role, Transcript};
pub use provider::{Provider, ProviderRequest};
pub use tool::{Tool, ToolRegistry, unadvertised_tools};

/// Base instructions for the agent when none are configured.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a ReAct agent that solves problems through reasoning and tool use.";
