//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::Priority;

/// Price threshold watcher
///
/// Polls a price feed and sends a one-shot Pushover alert when the price
/// reaches the configured threshold.
#[derive(Parser, Debug)]
#[command(name = "pricewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PRICEWATCH_CONFIG")]
    pub config: Option<String>,

    /// Trading pair to track (e.g. ETHBTC)
    #[arg(short, long, global = true, env = "PRICEWATCH_SYMBOL")]
    pub symbol: Option<String>,

    /// Pushover application token
    #[arg(long, global = true, env = "PUSHOVER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Pushover user key
    #[arg(long, global = true, env = "PUSHOVER_USER_KEY", hide_env_values = true)]
    pub user_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the price and alert when it reaches the threshold
    Watch(WatchArgs),

    /// Fetch and print the current price once
    Price(PriceArgs),

    /// Send a test notification
    NotifyTest(NotifyTestArgs),

    /// Show the effective configuration (secrets masked)
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the watch command
#[derive(Parser, Debug, Default)]
pub struct WatchArgs {
    /// Alert when the price is at or above this level
    #[arg(short, long, env = "PRICEWATCH_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Poll interval in seconds
    #[arg(short, long, env = "PRICEWATCH_INTERVAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Wait after a rate-limit response, in seconds
    #[arg(long, env = "PRICEWATCH_BACKOFF", value_parser = clap::value_parser!(u64).range(1..))]
    pub backoff: Option<u64>,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
}

/// Arguments for the price command
#[derive(Parser, Debug, Default)]
pub struct PriceArgs {
    /// Also report whether this level is breached
    #[arg(short, long, env = "PRICEWATCH_THRESHOLD")]
    pub threshold: Option<f64>,
}

/// Arguments for the notify-test command
#[derive(Parser, Debug)]
pub struct NotifyTestArgs {
    /// Notification title
    #[arg(long, default_value = "pricewatch test")]
    pub title: String,

    /// Notification message
    #[arg(long, default_value = "Test notification from pricewatch")]
    pub message: String,

    /// Priority: lowest, low, normal, high, emergency or -2..2
    #[arg(long, default_value = "normal", allow_hyphen_values = true)]
    pub priority: Priority,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
