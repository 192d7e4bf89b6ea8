//! Wire types and errors for the Twitter API v2 surface the bot uses.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during social API operations.
#[derive(Debug, Error)]
pub enum SocialError {
    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse a response payload.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Non-success status from the API.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API returned a success status but no usable data.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for social API operations.
pub type SocialResult<T> = Result<T, SocialError>;

/// An inbound mention of the bot's account.
#[derive(Debug, Clone, Deserialize)]
pub struct Mention {
    /// Tweet id of the mention itself.
    pub id: String,
    /// Text of the mentioning tweet.
    pub text: String,
    /// Conversation the mention belongs to. Absent on some payloads.
    pub conversation_id: Option<String>,
    /// Creation timestamp as reported by the API.
    pub created_at: Option<String>,
}

/// A tweet fetched by id (used for conversation roots).
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub conversation_id: Option<String>,
}

/// Envelope for `GET /2/users/me`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub id: String,
}

/// Envelope for `GET /2/users/:id/mentions`.
///
/// `data` is omitted entirely when there are no results.
#[derive(Debug, Deserialize)]
pub(crate) struct MentionsEnvelope {
    #[serde(default)]
    pub data: Vec<Mention>,
}

/// Envelope for `GET /2/tweets/:id`.
#[derive(Debug, Deserialize)]
pub(crate) struct TweetEnvelope {
    pub data: Option<Tweet>,
}

/// Envelope for `POST /2/tweets`.
#[derive(Debug, Deserialize)]
pub(crate) struct PostedTweetEnvelope {
    pub data: Option<PostedTweet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostedTweet {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_envelope_defaults_to_empty_on_missing_data() {
        let envelope: MentionsEnvelope =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).expect("valid body");
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn mention_deserializes_with_conversation_id() {
        let envelope: MentionsEnvelope = serde_json::from_str(
            r#"{"data":[{"id":"10","text":"@bot thoughts?","conversation_id":"5","created_at":"2024-06-01T10:00:00.000Z"}]}"#,
        )
        .expect("valid body");
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].id, "10");
        assert_eq!(envelope.data[0].conversation_id.as_deref(), Some("5"));
    }

    #[test]
    fn mention_tolerates_absent_conversation_id() {
        let envelope: MentionsEnvelope =
            serde_json::from_str(r#"{"data":[{"id":"10","text":"@bot hi"}]}"#)
                .expect("valid body");
        assert!(envelope.data[0].conversation_id.is_none());
        assert!(envelope.data[0].created_at.is_none());
    }

    #[test]
    fn tweet_envelope_yields_none_without_data() {
        let envelope: TweetEnvelope =
            serde_json::from_str(r#"{"errors":[{"title":"Not Found Error"}]}"#)
                .expect("valid body");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn social_error_display() {
        let err = SocialError::Api {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "API error (403): Forbidden");

        let err = SocialError::Http("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }
}
