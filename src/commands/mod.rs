//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod config;
pub mod notify;
pub mod price;
pub mod watch;

pub use config::run_config;
pub use notify::run_notify_test;
pub use price::run_price;
pub use watch::run_watch;

use crate::cli::args::{Cli, Commands};
use crate::config::{Config, ConfigBuilder};
use crate::error::Result;

/// Merge defaults, config file and CLI/environment overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut builder = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_symbol(cli.symbol.clone())
        .with_api_token(cli.api_token.clone())
        .with_user_key(cli.user_key.clone());

    builder = match &cli.command {
        Commands::Watch(args) => builder
            .with_threshold(args.threshold)
            .with_interval(args.interval)
            .with_backoff(args.backoff),
        Commands::Price(args) => builder.with_threshold(args.threshold),
        _ => builder,
    };

    Ok(builder.build())
}
