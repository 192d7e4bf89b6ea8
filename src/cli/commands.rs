//! CLI command definitions for replybot.

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::BotConfig;
use crate::engine::{ReplyEngine, DEFAULT_RESPONSE_LIMIT, DEFAULT_WINDOW_MINUTES};
use crate::journal::{ResponseJournal, DEFAULT_JOURNAL_FILE};
use crate::llm::{GroqClient, ReplyComposer};
use crate::scheduler::{Scheduler, DEFAULT_INTERVAL_MINUTES};
use crate::social::TwitterClient;

/// Mention-reply bot for Twitter.
#[derive(Parser)]
#[command(name = "replybot")]
#[command(about = "Reply to Twitter mentions with LLM-generated tech predictions")]
#[command(version)]
#[command(
    long_about = "replybot polls the Twitter API for recent mentions of the authenticated \
account, generates a short prediction for each conversation via the configured Groq \
endpoint, and posts it back as a reply.\n\nCredentials come from the environment: \
TWITTER_API_KEY, TWITTER_API_SECRET, TWITTER_ACCESS_TOKEN, TWITTER_ACCESS_TOKEN_SECRET, \
TWITTER_BEARER_TOKEN, GROQ_API_KEY, GROQ_API_ENDPOINT."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the reply loop forever.
    Run(RunArgs),

    /// Execute a single reply cycle and exit.
    ///
    /// Exits non-zero when the cycle aborts, which makes this the command to
    /// reach for when checking credentials or API reachability.
    Once(CycleArgs),
}

/// Arguments for `replybot run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Minutes between cycle fires.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MINUTES)]
    pub interval_minutes: u64,

    #[command(flatten)]
    pub cycle: CycleArgs,
}

/// Arguments shared by every cycle.
#[derive(Parser, Debug, Clone)]
pub struct CycleArgs {
    /// Journal file receiving one audit line per event.
    #[arg(long, default_value = DEFAULT_JOURNAL_FILE)]
    pub log_file: String,

    /// Maximum mentions answered per cycle.
    #[arg(long, default_value_t = DEFAULT_RESPONSE_LIMIT)]
    pub response_limit: usize,

    /// Trailing mention window in minutes.
    #[arg(long, default_value_t = DEFAULT_WINDOW_MINUTES)]
    pub window_minutes: i64,
}

/// Parse command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the selected command with pre-parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_loop(args).await,
        Commands::Once(args) => run_once(args).await,
    }
}

/// Build a fresh engine for one cycle from config and arguments.
fn build_engine(config: &BotConfig, args: &CycleArgs) -> ReplyEngine {
    let social = Arc::new(TwitterClient::new(config.twitter_bearer_token.clone()));
    let provider = GroqClient::new(config.groq_api_endpoint.clone(), config.groq_api_key.clone());
    let composer = ReplyComposer::new(Box::new(provider), config.groq_model.clone());
    let journal = ResponseJournal::new(&args.log_file);

    ReplyEngine::new(social, composer, journal)
        .with_response_limit(args.response_limit)
        .with_window_minutes(args.window_minutes)
}

async fn run_once(args: CycleArgs) -> anyhow::Result<()> {
    let config = BotConfig::from_env()?;
    let mut engine = build_engine(&config, &args);

    let report = engine.run_cycle().await?;
    info!(
        found = report.found,
        replied = report.replied,
        errors = report.errors,
        "cycle complete"
    );
    Ok(())
}

/// Interval between fires. Saturates so an absurd `--interval-minutes` value
/// cannot overflow the seconds conversion.
fn interval_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

async fn run_loop(args: RunArgs) -> anyhow::Result<()> {
    let config = BotConfig::from_env()?;
    let scheduler = Scheduler::new(interval_duration(args.interval_minutes));
    let cycle_args = args.cycle;

    info!(
        interval_minutes = args.interval_minutes,
        log_file = %cycle_args.log_file,
        "starting reply loop"
    );

    scheduler
        .run(move || {
            // A fresh engine per fire: counters and the answered set never
            // survive across cycles.
            let config = config.clone();
            let cycle_args = cycle_args.clone();
            async move {
                info!("job executed");
                let mut engine = build_engine(&config, &cycle_args);
                match engine.run_cycle().await {
                    Ok(report) => info!(
                        found = report.found,
                        replied = report.replied,
                        errors = report.errors,
                        "cycle complete"
                    ),
                    Err(e) => error!(error = %e, "cycle aborted"),
                }
            }
        })
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_duration_converts_minutes_to_seconds() {
        assert_eq!(interval_duration(6), Duration::from_secs(360));
    }

    #[test]
    fn interval_duration_saturates_on_huge_values() {
        assert_eq!(interval_duration(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn run_parses_interval_and_cycle_arguments() {
        let cli = Cli::try_parse_from([
            "replybot",
            "run",
            "--interval-minutes",
            "10",
            "--response-limit",
            "20",
        ])
        .expect("valid arguments");

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.interval_minutes, 10);
                assert_eq!(args.cycle.response_limit, 20);
                assert_eq!(args.cycle.log_file, DEFAULT_JOURNAL_FILE);
            }
            _ => panic!("expected the run subcommand"),
        }
    }
}
