//! Oracle integration for the crisis simulation.
//!
//! The oracle is an external reasoning service treated as an opaque, fallible
//! collaborator. This crate owns the contract around it: the [`Oracle`] trait,
//! an HTTP client for the Anthropic Messages API, prompt construction, the
//! order interpreter (free text to [`OrderSet`](crisis_core::types::OrderSet))
//! and the narrator for prose-only calls.

pub mod client;
pub mod error;
pub mod interpreter;
pub mod narrator;
pub mod prompts;

pub use client::{AnthropicOracle, Channel, OfflineOracle, Oracle, OracleConfig, OracleRequest};
pub use crisis_core as core;
pub use error::{InterpretError, OracleError};
pub use interpreter::OrderInterpreter;
pub use narrator::{Narration, Narrator};
pub use prompts::ScenarioBrief;

#[cfg(test)]
mod tests;
