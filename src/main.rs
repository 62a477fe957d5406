//! pricewatch - price threshold watcher
//!
//! A command-line tool that polls a price feed and sends a Pushover alert
//! once per threshold breach.

use clap::Parser;
use pricewatch::cli::args::{generate_completions, Cli, Commands};
use pricewatch::commands::{load_config, run_config, run_notify_test, run_price, run_watch};
use pricewatch::error::{AppError, ConfigError, NotifyError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still takes precedence
    let default_filter = if cli.verbose {
        "pricewatch=debug,info"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli)?;

    match &cli.command {
        Commands::Watch(args) => run_watch(args, &config, cli.verbose),

        Commands::Price(_) => run_price(&config, cli.format),

        Commands::NotifyTest(args) => run_notify_test(args, &config, cli.format),

        Commands::Config => run_config(&config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::MissingField(field)) if field == "watch.threshold" => {
            eprintln!();
            eprintln!("Hint: Set a target level with --threshold, PRICEWATCH_THRESHOLD,");
            eprintln!("      or 'threshold' in the [watch] section of the config file.");
        }
        AppError::Notify(NotifyError::Unconfigured) => {
            eprintln!();
            eprintln!("Hint: Set PUSHOVER_API_TOKEN and PUSHOVER_USER_KEY,");
            eprintln!("      or the [pushover] section of the config file.");
        }
        _ => {}
    }
}
