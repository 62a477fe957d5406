//! Watch command implementation
//!
//! Runs the price watch loop until interrupted.

use crate::alerts::PushoverNotifier;
use crate::cli::args::WatchArgs;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::feed::BinanceTicker;
use crate::services::{Monitor, MonitorConfig, ThreadSleeper};

/// Execute the watch command
pub fn run_watch(args: &WatchArgs, config: &Config, verbose: bool) -> Result<()> {
    config.validate()?;
    let monitor_config = config.to_monitor_config()?.with_single_use(args.once);

    let ticker = BinanceTicker::new(
        &config.feed.ticker_url,
        monitor_config.symbol.clone(),
        config.fetch_timeout()?,
    )?;

    let (retry, expire) = config.emergency_schedule()?;
    let notifier = PushoverNotifier::new(
        &config.pushover.url,
        config.pushover.credentials(),
        config.notify_timeout()?,
    )?
    .with_emergency(retry, expire);

    if !notifier.is_configured() {
        log::warn!("Pushover credentials not set; breach alerts will only be logged");
    }

    if verbose {
        log_settings(&monitor_config, config);
    }

    install_interrupt_handler()?;

    let mut monitor = Monitor::new(monitor_config, ticker, notifier);
    monitor.run(ThreadSleeper);

    Ok(())
}

/// Exit cleanly on Ctrl+C; the loop itself never returns
fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        log::info!("Exiting.");
        std::process::exit(0);
    })
    .map_err(|e| AppError::Signal(e.to_string()))
}

fn log_settings(monitor_config: &MonitorConfig, config: &Config) {
    log::info!("Watch settings");
    log::info!("  Symbol: {}", monitor_config.symbol);
    log::info!("  Threshold: {}", monitor_config.threshold);
    log::info!("  Interval: {:?}", monitor_config.interval);
    log::info!("  Backoff: {:?}", monitor_config.backoff);
    log::info!("  Single use: {}", monitor_config.single_use);
    log::info!("  Ticker: {}", config.feed.ticker_url);
    log::info!("  Notifier: {}", config.pushover.url);
}
