//! Client for OpenAI-compatible chat-completions APIs (Groq).
//!
//! One synchronous-in-spirit POST per generation: no retry, no streaming, no
//! local backoff. The response is deserialized tolerantly so a body missing
//! the expected fields degrades to an empty reply string instead of an error;
//! that mirrors how the bot has always behaved when the API misfires.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::LlmError;

/// System prompt fixing the bot's persona for every generation.
const PERSONA_PROMPT: &str = "You are an incredibly wise and smart tech mad scientist from \
     Silicon Valley. Your goal is to give a concise prediction in response to a piece of text \
     from the user. Your response should be serious with a hint of wit and sarcasm, in two or \
     fewer sentences.";

/// A message in a conversation with an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (e.g., "system", "user", "assistant").
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request for text generation from an LLM.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Model identifier to use for generation.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<Message>,
}

impl GenerationRequest {
    /// Create a new generation request.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

/// Response from an LLM generation request.
///
/// Every field defaults when absent: an error payload or an unexpected shape
/// deserializes to an empty choice list rather than failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationResponse {
    /// Generated choices/completions.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl GenerationResponse {
    /// Get the content of the first choice, if available.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single generated choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// Generated message.
    #[serde(default)]
    pub message: ChoiceMessage,
}

/// Message body of a generated choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Trait for LLM providers that can generate text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a response for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}

/// Client for the Groq chat-completions API.
pub struct GroqClient {
    /// Full endpoint URL, POSTed to verbatim.
    endpoint: String,
    /// API key sent as a bearer header.
    api_key: String,
    /// HTTP client for making API requests.
    http_client: Client,
}

impl GroqClient {
    /// Create a new client for the given endpoint URL and API key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http_client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let http_response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        // The status line is deliberately not inspected: error payloads are
        // JSON without a `choices` field and deserialize to an empty
        // response, which the composer turns into an empty reply string.
        http_response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to parse API response: {}", e)))
    }
}

/// Composes reply text for a conversation tweet using a fixed persona.
pub struct ReplyComposer {
    /// The LLM provider to use for generation.
    client: Box<dyn LlmProvider>,
    /// Model identifier passed on every request.
    model: String,
}

impl ReplyComposer {
    /// Create a new composer over the given provider and model.
    pub fn new(client: Box<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Generate a reply for the given source text.
    ///
    /// Returns the first choice's content, or an empty string when the
    /// response carries no usable choice.
    ///
    /// # Errors
    ///
    /// Propagates transport and JSON-decode failures from the provider.
    pub async fn compose(&self, source_text: &str) -> Result<String, LlmError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            vec![Message::system(PERSONA_PROMPT), Message::user(source_text)],
        );

        let response = self.client.generate(request).await?;
        Ok(response.first_content().unwrap_or_default().to_string())
    }
}
