//! Completion client implementations for reactloop.
//!
//! All providers implement the `reactloop_core::Provider` trait.
//! [`build_from_config`] turns an `AppConfig` into a ready provider.

pub mod openai_compat;
pub mod router;

pub use openai_compat::{OpenAiCompatProvider, ProviderSettings};
pub use router::{build_from_config, oneshot};
