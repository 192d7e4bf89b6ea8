//! reqwest-based client for the Twitter API v2.

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::warn;

use super::types::{
    Mention, MentionsEnvelope, PostedTweetEnvelope, SocialError, SocialResult, Tweet,
    TweetEnvelope, UserEnvelope,
};

/// Twitter API v2 base URL.
const TWITTER_API_BASE: &str = "https://api.twitter.com/2";

/// Fallback wait when a 429 carries no usable reset header.
const DEFAULT_RATE_LIMIT_WAIT_SECS: u64 = 60;

/// Client for the Twitter API v2 read/write surface the bot uses.
///
/// Authentication uses the bearer token on every request. Rate limiting is
/// waited out transparently: a 429 response puts the client to sleep until
/// the window resets, then the same request is re-issued.
pub struct TwitterClient {
    /// HTTP client for API requests.
    http_client: Client,
    /// Bearer token (OAuth 2.0 user context).
    bearer_token: String,
    /// API base URL, overridable for tests.
    base_url: String,
}

impl TwitterClient {
    /// Create a new client authenticating with the given bearer token.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            bearer_token: bearer_token.into(),
            base_url: TWITTER_API_BASE.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve the authenticated account's id (`GET /users/me`).
    pub async fn me(&self) -> SocialResult<String> {
        let url = format!("{}/users/me", self.base_url);
        let response = self.execute(self.http_client.get(&url)).await?;
        let envelope: UserEnvelope = decode(response).await?;
        envelope
            .data
            .map(|user| user.id)
            .ok_or_else(|| SocialError::InvalidResponse("no user data returned".to_string()))
    }

    /// List mentions of `user_id` from the trailing window
    /// (`GET /users/:id/mentions`).
    ///
    /// Results come back in API order; no local sorting or deduplication is
    /// applied. An absent `data` field means zero mentions.
    pub async fn recent_mentions(
        &self,
        user_id: &str,
        window_minutes: i64,
        limit: usize,
    ) -> SocialResult<Vec<Mention>> {
        let start_time = (Utc::now() - ChronoDuration::minutes(window_minutes))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        // The mentions endpoint accepts max_results in 5..=100.
        let max_results = limit.clamp(5, 100);

        let url = format!(
            "{}/users/{}/mentions?start_time={}&max_results={}&expansions={}&tweet.fields={}",
            self.base_url,
            user_id,
            urlencoding::encode(&start_time),
            max_results,
            urlencoding::encode("referenced_tweets.id"),
            urlencoding::encode("created_at,conversation_id"),
        );

        let response = self.execute(self.http_client.get(&url)).await?;
        let envelope: MentionsEnvelope = decode(response).await?;
        Ok(envelope.data)
    }

    /// Fetch the root tweet of a conversation (`GET /tweets/:id`).
    ///
    /// Returns `None` when the API reports no data for the id (deleted or
    /// protected tweets).
    pub async fn conversation_root(&self, conversation_id: &str) -> SocialResult<Option<Tweet>> {
        let url = format!(
            "{}/tweets/{}?tweet.fields={}",
            self.base_url,
            conversation_id,
            urlencoding::encode("conversation_id"),
        );

        let response = self.execute(self.http_client.get(&url)).await?;
        let envelope: TweetEnvelope = decode(response).await?;
        Ok(envelope.data)
    }

    /// Create a reply tweet (`POST /tweets`), returning the new tweet's id.
    pub async fn post_reply(&self, text: &str, in_reply_to: &str) -> SocialResult<String> {
        let url = format!("{}/tweets", self.base_url);
        let body = serde_json::json!({
            "text": text,
            "reply": { "in_reply_to_tweet_id": in_reply_to },
        });

        let response = self.execute(self.http_client.post(&url).json(&body)).await?;
        let envelope: PostedTweetEnvelope = decode(response).await?;
        envelope
            .data
            .map(|tweet| tweet.id)
            .ok_or_else(|| SocialError::InvalidResponse("no tweet data returned".to_string()))
    }

    /// Send a request, waiting out rate-limit windows.
    ///
    /// On 429 the client sleeps until the `x-rate-limit-reset` epoch (falling
    /// back to `retry-after`, then a fixed wait) and re-issues the request.
    /// Any other non-success status becomes `SocialError::Api`.
    async fn execute(&self, request: RequestBuilder) -> SocialResult<Response> {
        let mut request = request.header("Authorization", format!("Bearer {}", self.bearer_token));

        loop {
            let retry = request
                .try_clone()
                .ok_or_else(|| SocialError::Http("request is not retryable".to_string()))?;

            let response = request
                .send()
                .await
                .map_err(|e| SocialError::Http(e.to_string()))?;

            let status = response.status();
            if status.as_u16() == 429 {
                let wait = rate_limit_wait(response.headers());
                warn!(wait_secs = wait.as_secs(), "rate limited, waiting for window reset");
                tokio::time::sleep(wait).await;
                request = retry;
                continue;
            }

            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response".to_string());
                return Err(SocialError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response);
        }
    }
}

/// Compute how long to sleep before retrying a rate-limited request.
fn rate_limit_wait(headers: &reqwest::header::HeaderMap) -> Duration {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
    };

    if let Some(reset_epoch) = header("x-rate-limit-reset") {
        let remaining = reset_epoch - Utc::now().timestamp();
        if remaining > 0 {
            return Duration::from_secs(remaining as u64);
        }
    }
    if let Some(retry_after) = header("retry-after") {
        if retry_after > 0 {
            return Duration::from_secs(retry_after as u64);
        }
    }
    Duration::from_secs(DEFAULT_RATE_LIMIT_WAIT_SECS)
}

/// Decode a success response body into the expected envelope.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> SocialResult<T> {
    response
        .json()
        .await
        .map_err(|e| SocialError::ParseError(e.to_string()))
}
