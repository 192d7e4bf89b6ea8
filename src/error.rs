//! Error types for replybot operations.
//!
//! Defines error types for the major subsystems:
//! - Environment configuration
//! - LLM API interactions
//! - The per-cycle reply engine
//!
//! Errors for the social API client live in [`crate::social::SocialError`],
//! next to the wire types they describe.

use thiserror::Error;

use crate::social::SocialError;

/// Errors that can occur while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),
}

/// Errors that can abort a reply-engine cycle.
///
/// Only the read side (resolving the self id, listing mentions, fetching a
/// conversation root) and the generation call surface here; posting failures
/// are handled per mention inside the engine and never abort a cycle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Social API error: {0}")]
    Social(#[from] SocialError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Journal IO error: {0}")]
    Io(#[from] std::io::Error),
}
