//! LLM generation client for reply text.
//!
//! Wraps a single OpenAI-compatible chat-completions endpoint (Groq) behind
//! the [`LlmProvider`] trait, plus the [`ReplyComposer`] that carries the
//! bot's fixed persona prompt.

mod client;

pub use client::{
    Choice, ChoiceMessage, GenerationRequest, GenerationResponse, GroqClient, LlmProvider,
    Message, ReplyComposer,
};
