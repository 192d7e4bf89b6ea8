//! Per-cycle reply engine.
//!
//! One invocation per scheduler fire: fetch recent mentions, resolve each
//! mention's conversation root, decide whether to respond, generate the reply
//! text, post it, and journal the outcome. Counters live on the engine
//! instance and a fresh engine is built for every cycle, so nothing
//! accumulates across fires.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::journal::ResponseJournal;
use crate::llm::ReplyComposer;
use crate::social::{Mention, SocialResult, Tweet, TwitterClient};

/// How many mentions to respond to each time the engine wakes up.
pub const DEFAULT_RESPONSE_LIMIT: usize = 35;

/// Trailing window, in minutes, used to fetch recent mentions.
pub const DEFAULT_WINDOW_MINUTES: i64 = 20;

/// The social API surface the engine depends on.
///
/// [`TwitterClient`] is the production implementation; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Resolve the authenticated account's id.
    async fn me(&self) -> SocialResult<String>;

    /// List mentions of `user_id` from the trailing window, in API order.
    async fn recent_mentions(
        &self,
        user_id: &str,
        window_minutes: i64,
        limit: usize,
    ) -> SocialResult<Vec<Mention>>;

    /// Fetch the root tweet of a conversation, if it still exists.
    async fn conversation_root(&self, conversation_id: &str) -> SocialResult<Option<Tweet>>;

    /// Create a reply tweet, returning the new tweet's id.
    async fn post_reply(&self, text: &str, in_reply_to: &str) -> SocialResult<String>;
}

#[async_trait]
impl SocialApi for TwitterClient {
    async fn me(&self) -> SocialResult<String> {
        TwitterClient::me(self).await
    }

    async fn recent_mentions(
        &self,
        user_id: &str,
        window_minutes: i64,
        limit: usize,
    ) -> SocialResult<Vec<Mention>> {
        TwitterClient::recent_mentions(self, user_id, window_minutes, limit).await
    }

    async fn conversation_root(&self, conversation_id: &str) -> SocialResult<Option<Tweet>> {
        TwitterClient::conversation_root(self, conversation_id).await
    }

    async fn post_reply(&self, text: &str, in_reply_to: &str) -> SocialResult<String> {
        TwitterClient::post_reply(self, text, in_reply_to).await
    }
}

/// Counters for one engine invocation. Never persisted; reported through the
/// journal's job-finish line and the return value of
/// [`ReplyEngine::run_cycle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Mentions returned by the API this cycle.
    pub found: usize,
    /// Replies posted successfully.
    pub replied: usize,
    /// Reply attempts that failed.
    pub errors: usize,
}

/// Orchestrates one wake-up cycle of the bot.
pub struct ReplyEngine {
    social: Arc<dyn SocialApi>,
    composer: ReplyComposer,
    journal: ResponseJournal,
    response_limit: usize,
    window_minutes: i64,
    /// Conversation ids answered by this engine instance.
    answered: HashSet<String>,
}

impl ReplyEngine {
    /// Create an engine with the default response cap and mention window.
    pub fn new(
        social: Arc<dyn SocialApi>,
        composer: ReplyComposer,
        journal: ResponseJournal,
    ) -> Self {
        Self {
            social,
            composer,
            journal,
            response_limit: DEFAULT_RESPONSE_LIMIT,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            answered: HashSet::new(),
        }
    }

    /// Set the per-cycle response cap.
    pub fn with_response_limit(mut self, limit: usize) -> Self {
        self.response_limit = limit;
        self
    }

    /// Set the trailing mention window in minutes.
    pub fn with_window_minutes(mut self, minutes: i64) -> Self {
        self.window_minutes = minutes;
        self
    }

    /// Run one cycle: journal the start, process mentions, journal the finish.
    ///
    /// # Errors
    ///
    /// Read-side social errors, generation errors, and journal IO abort the
    /// cycle; no finish line is written in that case. Posting failures are
    /// absorbed per mention and only show up in the error counter.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, EngineError> {
        self.journal.job_start()?;
        let report = self.respond_to_mentions().await?;
        self.journal
            .job_finish(report.found, report.replied, report.errors)?;
        Ok(report)
    }

    async fn respond_to_mentions(&mut self) -> Result<CycleReport, EngineError> {
        let mut report = CycleReport::default();

        let me = self.social.me().await?;
        let mentions = self
            .social
            .recent_mentions(&me, self.window_minutes, self.response_limit)
            .await?;

        if mentions.is_empty() {
            info!("no mentions found");
            return Ok(report);
        }

        report.found = mentions.len();
        info!(found = report.found, "processing mentions");

        for mention in mentions.iter().take(self.response_limit) {
            // A mention without a conversation id has no thread to resolve.
            let Some(conversation_id) = mention.conversation_id.as_deref() else {
                continue;
            };
            let Some(root) = self.social.conversation_root(conversation_id).await? else {
                continue;
            };

            // Mentions that start their own thread are skipped.
            if root.id == mention.id {
                continue;
            }
            if self.answered.contains(&root.id) {
                continue;
            }

            self.respond_to_mention(mention, &root, &mut report).await?;
        }

        Ok(report)
    }

    /// Generate and post one reply. Generation failures propagate; posting
    /// failures are journaled and counted, then the cycle moves on.
    async fn respond_to_mention(
        &mut self,
        mention: &Mention,
        root: &Tweet,
        report: &mut CycleReport,
    ) -> Result<(), EngineError> {
        let text = self.composer.compose(&root.text).await?;

        match self.social.post_reply(&text, &mention.id).await {
            Ok(reply_id) => {
                report.replied += 1;
                self.answered.insert(root.id.clone());
                self.journal.replied(&mention.id, &text)?;
                info!(mention_id = %mention.id, reply_id = %reply_id, "posted reply");
            }
            Err(e) => {
                report.errors += 1;
                self.journal.reply_error(&mention.id, &e)?;
                warn!(mention_id = %mention.id, error = %e, "reply failed");
            }
        }

        Ok(())
    }
}
