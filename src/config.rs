//! Environment configuration for the bot.
//!
//! All credentials and endpoints come from the process environment, with
//! presence-only validation. Nothing is persisted and there are no config
//! files; this mirrors how the bot is deployed (a handful of exported
//! variables next to the binary).

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Default model requested from the generation endpoint.
const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Credentials and endpoints loaded from the environment.
///
/// The OAuth 1.0a consumer/access credentials are part of the deployment
/// contract and are validated for presence, but request auth goes through
/// the bearer token (OAuth 2.0 user context) on every call.
#[derive(Clone)]
pub struct BotConfig {
    pub twitter_api_key: String,
    pub twitter_api_secret: String,
    pub twitter_access_token: String,
    pub twitter_access_token_secret: String,
    pub twitter_bearer_token: String,
    pub groq_api_key: String,
    pub groq_api_endpoint: String,
    pub groq_model: String,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `TWITTER_API_KEY`, `TWITTER_API_SECRET`,
    /// `TWITTER_ACCESS_TOKEN`, `TWITTER_ACCESS_TOKEN_SECRET`,
    /// `TWITTER_BEARER_TOKEN`, `GROQ_API_KEY`, `GROQ_API_ENDPOINT`.
    ///
    /// Optional: `GROQ_MODEL` (defaults to `llama3-8b-8192`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` naming the first absent variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            twitter_api_key: require("TWITTER_API_KEY")?,
            twitter_api_secret: require("TWITTER_API_SECRET")?,
            twitter_access_token: require("TWITTER_ACCESS_TOKEN")?,
            twitter_access_token_secret: require("TWITTER_ACCESS_TOKEN_SECRET")?,
            twitter_bearer_token: require("TWITTER_BEARER_TOKEN")?,
            groq_api_key: require("GROQ_API_KEY")?,
            groq_api_endpoint: require("GROQ_API_ENDPOINT")?,
            groq_model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("twitter_api_key", &redact(&self.twitter_api_key))
            .field("twitter_api_secret", &redact(&self.twitter_api_secret))
            .field("twitter_access_token", &redact(&self.twitter_access_token))
            .field(
                "twitter_access_token_secret",
                &redact(&self.twitter_access_token_secret),
            )
            .field("twitter_bearer_token", &redact(&self.twitter_bearer_token))
            .field("groq_api_key", &redact(&self.groq_api_key))
            .field("groq_api_endpoint", &self.groq_api_endpoint)
            .field("groq_model", &self.groq_model)
            .finish()
    }
}

/// Redact a secret down to its length so logs never carry credentials.
fn redact(secret: &str) -> String {
    format!("<{} chars>", secret.len())
}
