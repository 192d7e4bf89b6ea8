//! Twitter API v2 client.
//!
//! A thin wrapper over the four read/write calls the bot needs: resolve the
//! authenticated account, list recent mentions, fetch a conversation root,
//! and create a reply. Rate-limit waiting is handled transparently inside
//! the client; no other semantics are added on top of the API.

mod client;
mod types;

pub use client::TwitterClient;
pub use types::{Mention, SocialError, SocialResult, Tweet};
