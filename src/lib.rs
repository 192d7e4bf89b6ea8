//! replybot: automated mention-reply bot for Twitter.
//!
//! Polls the Twitter API v2 for mentions of the authenticated account on a
//! fixed schedule, generates a short reply per conversation through an
//! OpenAI-compatible chat-completions endpoint (Groq), posts the reply back,
//! and appends one audit line per event to a flat-file journal.

// Core modules
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod journal;
pub mod llm;
pub mod scheduler;
pub mod social;

// Re-export commonly used error types
pub use error::{ConfigError, EngineError, LlmError};
pub use social::SocialError;
