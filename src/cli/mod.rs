//! Command-line interface for replybot.
//!
//! Provides the forever-running reply loop plus a single-cycle command for
//! operational checks.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli};
