//! Price watch loop
//!
//! Polls the price source, gates breach alerts on the alert state, and picks
//! the wait before the next poll.

use crate::alerts::{pause_message, AlertState, Notification, Notifier};
use crate::domain::{Price, Symbol, Threshold};
use crate::error::FetchError;
use crate::feed::PriceSource;
use crate::services::clock::Sleeper;

use std::ops::ControlFlow;
use std::time::Duration;

/// Default interval between polls
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default wait after the feed rate-limits us
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1800);

/// Configuration for the monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Tracked symbol, used in alert text
    pub symbol: Symbol,
    /// Breach level (inclusive)
    pub threshold: Threshold,
    /// Interval between polls
    pub interval: Duration,
    /// Interval after a rate-limit response
    pub backoff: Duration,
    /// Whether to exit after one poll
    pub single_use: bool,
}

impl MonitorConfig {
    /// Create a config with the default intervals
    pub fn new(symbol: Symbol, threshold: Threshold) -> Self {
        Self {
            symbol,
            threshold,
            interval: DEFAULT_INTERVAL,
            backoff: DEFAULT_BACKOFF,
            single_use: false,
        }
    }

    /// Builder: set poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Builder: set rate-limit backoff
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Builder: stop after one poll
    pub fn with_single_use(mut self, single_use: bool) -> Self {
        self.single_use = single_use;
        self
    }
}

/// What happened during one poll
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Feed failed with a non rate-limit error
    FetchFailed(FetchError),
    /// Feed rate-limited us; polling backs off
    RateLimited {
        /// HTTP status returned by the feed
        status: u16,
        /// Whether the pause notice was delivered
        notice_sent: bool,
    },
    /// Threshold reached and the alert was delivered
    AlertSent(Price),
    /// Threshold reached but delivery failed; retried on the next poll
    AlertFailed(Price),
    /// Threshold still reached; alert already delivered this episode
    AlertSuppressed(Price),
    /// Price dropped below the threshold and the alert was re-armed
    Reset(Price),
    /// Price below the threshold with no alert outstanding
    BelowThreshold(Price),
}

impl PollOutcome {
    /// Price read during the poll, if any
    pub fn price(&self) -> Option<Price> {
        match self {
            Self::AlertSent(p)
            | Self::AlertFailed(p)
            | Self::AlertSuppressed(p)
            | Self::Reset(p)
            | Self::BelowThreshold(p) => Some(*p),
            Self::FetchFailed(_) | Self::RateLimited { .. } => None,
        }
    }
}

/// Result of one poll plus the wait it scheduled
#[derive(Debug, Clone, PartialEq)]
pub struct Poll {
    /// What happened
    pub outcome: PollOutcome,
    /// Wait before the next poll
    pub next_wait: Duration,
}

/// Threshold watch loop
///
/// Owns the alert state: at most one alert is delivered per breach episode,
/// and the state only leaves `Normal` after a delivery is acknowledged.
pub struct Monitor<P, N> {
    config: MonitorConfig,
    source: P,
    notifier: N,
    state: AlertState,
}

impl<P: PriceSource, N: Notifier> Monitor<P, N> {
    /// Create a new monitor in the `Normal` state
    pub fn new(config: MonitorConfig, source: P, notifier: N) -> Self {
        Self {
            config,
            source,
            notifier,
            state: AlertState::Normal,
        }
    }

    /// Execute a single poll and decide the next wait
    pub fn poll_once(&mut self) -> Poll {
        let price = match self.source.fetch() {
            Ok(price) => price,
            Err(FetchError::RateLimited { status }) => return self.on_rate_limited(status),
            Err(e) => {
                log::warn!("{}", e);
                log::warn!(
                    "Price retrieval failed. Retrying in {} seconds...",
                    self.config.interval.as_secs()
                );
                return Poll {
                    outcome: PollOutcome::FetchFailed(e),
                    next_wait: self.config.interval,
                };
            }
        };

        log::info!("Current Price ({}): {}", self.config.symbol, price);

        Poll {
            outcome: self.evaluate(price),
            next_wait: self.config.interval,
        }
    }

    /// Apply a price reading to the alert state
    fn evaluate(&mut self, price: Price) -> PollOutcome {
        let breached = self.config.threshold.is_breached_by(price);

        match (breached, self.state) {
            (true, AlertState::Normal) => {
                let alert =
                    Notification::breach(&self.config.symbol, price, self.config.threshold);
                if self.notifier.notify(&alert) {
                    self.state = AlertState::Breached;
                    PollOutcome::AlertSent(price)
                } else {
                    log::warn!("Breach alert not delivered; retrying on next poll");
                    PollOutcome::AlertFailed(price)
                }
            }
            (true, AlertState::Breached) => {
                log::debug!("Alert already sent for this episode. Waiting");
                PollOutcome::AlertSuppressed(price)
            }
            (false, AlertState::Breached) => {
                log::info!("Price below target. Resetting");
                self.state = AlertState::Normal;
                PollOutcome::Reset(price)
            }
            (false, AlertState::Normal) => {
                log::debug!("Waiting");
                PollOutcome::BelowThreshold(price)
            }
        }
    }

    fn on_rate_limited(&self, status: u16) -> Poll {
        let backoff = self.config.backoff;
        log::error!("{}", pause_message(self.source.name(), status, backoff));

        let notice = Notification::paused(self.source.name(), status, backoff);
        let notice_sent = self.notifier.notify(&notice);

        log::warn!(
            "Price retrieval failed. Retrying in {} seconds...",
            backoff.as_secs()
        );

        Poll {
            outcome: PollOutcome::RateLimited {
                status,
                notice_sent,
            },
            next_wait: backoff,
        }
    }

    /// Run the watch loop
    ///
    /// Returns only when `single_use` is set or the sleeper breaks.
    pub fn run<S: Sleeper>(&mut self, mut sleeper: S) {
        log::info!("--- Starting {} Price Monitor ---", self.config.symbol);
        log::info!("Target Level: {}", self.config.threshold);

        loop {
            let poll = self.poll_once();

            if self.config.single_use {
                log::info!("Single-use mode: exiting after one poll");
                break;
            }

            if let ControlFlow::Break(()) = sleeper.sleep(poll.next_wait) {
                break;
            }
        }
    }

    /// Current alert state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{PushoverCredentials, PushoverNotifier};
    use crate::domain::Priority;
    use crate::mock::{MockNotifier, MockPriceSource, RecordingSleeper};

    const T: f64 = 0.05;

    fn config() -> MonitorConfig {
        MonitorConfig::new(Symbol::new("ETHBTC").unwrap(), Threshold::new(T).unwrap())
            .with_interval(Duration::from_secs(5))
            .with_backoff(Duration::from_secs(1800))
    }

    fn price(value: f64) -> Price {
        Price::new(value).unwrap()
    }

    #[test]
    fn test_monitor_config_defaults() {
        let config = MonitorConfig::new(Symbol::new("ETHBTC").unwrap(), Threshold::new(T).unwrap());
        assert_eq!(config.interval, DEFAULT_INTERVAL);
        assert_eq!(config.backoff, DEFAULT_BACKOFF);
        assert!(!config.single_use);
    }

    #[test]
    fn test_monitor_starts_normal() {
        let monitor = Monitor::new(config(), MockPriceSource::new(), MockNotifier::new());
        assert_eq!(monitor.state(), AlertState::Normal);
    }

    #[test]
    fn test_equal_price_is_breach() {
        let source = MockPriceSource::with_prices(&[T]);
        let notifier = MockNotifier::new();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        let poll = monitor.poll_once();
        assert_eq!(poll.outcome, PollOutcome::AlertSent(price(T)));
        assert_eq!(poll.next_wait, Duration::from_secs(5));
        assert_eq!(monitor.state(), AlertState::Breached);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "ETHBTC LEVEL BREACHED!");
        assert_eq!(sent[0].priority, Priority::Emergency);
    }

    #[test]
    fn test_one_alert_per_episode() {
        let source = MockPriceSource::with_prices(&[T - 0.01, T, T - 0.01, T]);
        let notifier = MockNotifier::new();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        let outcomes: Vec<_> = (0..4).map(|_| monitor.poll_once().outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                PollOutcome::BelowThreshold(price(T - 0.01)),
                PollOutcome::AlertSent(price(T)),
                PollOutcome::Reset(price(T - 0.01)),
                PollOutcome::AlertSent(price(T)),
            ]
        );
        assert_eq!(notifier.sent().len(), 2);
    }

    #[test]
    fn test_duplicate_alert_suppressed() {
        let source = MockPriceSource::with_prices(&[0.06, 0.07, 0.05]);
        let notifier = MockNotifier::new();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        monitor.poll_once();
        assert_eq!(
            monitor.poll_once().outcome,
            PollOutcome::AlertSuppressed(price(0.07))
        );
        assert_eq!(
            monitor.poll_once().outcome,
            PollOutcome::AlertSuppressed(price(0.05))
        );
        assert_eq!(notifier.sent().len(), 1);
    }

    #[test]
    fn test_failed_alert_is_retried() {
        let source = MockPriceSource::with_prices(&[0.06, 0.06, 0.06]);
        let notifier = MockNotifier::failing();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        for _ in 0..3 {
            let poll = monitor.poll_once();
            assert_eq!(poll.outcome, PollOutcome::AlertFailed(price(0.06)));
            assert_eq!(poll.next_wait, Duration::from_secs(5));
            assert_eq!(monitor.state(), AlertState::Normal);
        }
        assert_eq!(notifier.attempts(), 3);
    }

    #[test]
    fn test_rate_limit_backs_off_without_state_change() {
        let source = MockPriceSource::new();
        source.push_price(0.06);
        source.push_error(FetchError::RateLimited { status: 451 });
        let notifier = MockNotifier::new();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        monitor.poll_once();
        assert_eq!(monitor.state(), AlertState::Breached);

        let poll = monitor.poll_once();
        assert_eq!(
            poll.outcome,
            PollOutcome::RateLimited {
                status: 451,
                notice_sent: true
            }
        );
        assert_eq!(poll.next_wait, Duration::from_secs(1800));
        assert_eq!(monitor.state(), AlertState::Breached);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].title, "Monitor Paused (Mock 451)");
        assert_eq!(sent[1].priority, Priority::Low);
    }

    #[test]
    fn test_rate_limit_notice_failure_ignored() {
        let source = MockPriceSource::new();
        source.push_error(FetchError::RateLimited { status: 429 });
        let notifier = MockNotifier::failing();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        let poll = monitor.poll_once();
        assert_eq!(
            poll.outcome,
            PollOutcome::RateLimited {
                status: 429,
                notice_sent: false
            }
        );
        assert_eq!(poll.next_wait, Duration::from_secs(1800));
        assert_eq!(monitor.state(), AlertState::Normal);
    }

    #[test]
    fn test_transient_failure_uses_normal_interval() {
        let source = MockPriceSource::new();
        source.push_error(FetchError::Transient("connection reset".to_string()));
        let notifier = MockNotifier::new();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        let poll = monitor.poll_once();
        assert!(matches!(poll.outcome, PollOutcome::FetchFailed(_)));
        assert_eq!(poll.outcome.price(), None);
        assert_eq!(poll.next_wait, Duration::from_secs(5));
        assert_eq!(notifier.attempts(), 0);
    }

    #[test]
    fn test_unconfigured_notifier_keeps_loop_alive() {
        let source = MockPriceSource::with_prices(&[0.06, 0.06]);
        let notifier = PushoverNotifier::new(
            "http://127.0.0.1:9/1/messages.json",
            PushoverCredentials::default(),
            Duration::from_millis(200),
        )
        .unwrap();
        let mut monitor = Monitor::new(config(), &source, &notifier);

        assert_eq!(
            monitor.poll_once().outcome,
            PollOutcome::AlertFailed(price(0.06))
        );
        assert_eq!(
            monitor.poll_once().outcome,
            PollOutcome::AlertFailed(price(0.06))
        );
        assert_eq!(monitor.state(), AlertState::Normal);
    }

    #[test]
    fn test_run_single_use_does_not_sleep() {
        let source = MockPriceSource::with_prices(&[0.06]);
        let notifier = MockNotifier::new();
        let mut sleeper = RecordingSleeper::new();
        let mut monitor = Monitor::new(config().with_single_use(true), &source, &notifier);

        monitor.run(&mut sleeper);

        assert_eq!(source.calls(), 1);
        assert!(sleeper.waits().is_empty());
        assert_eq!(monitor.state(), AlertState::Breached);
    }

    #[test]
    fn test_run_sleeps_for_each_polls_next_wait() {
        let source = MockPriceSource::with_prices(&[0.04]);
        source.push_error(FetchError::RateLimited { status: 451 });
        source.push_error(FetchError::Transient("connection reset".to_string()));
        let notifier = MockNotifier::new();
        let mut sleeper = RecordingSleeper::stopping_after(3);
        let mut monitor = Monitor::new(config(), &source, &notifier);

        monitor.run(&mut sleeper);

        assert_eq!(source.calls(), 3);
        assert_eq!(
            sleeper.waits(),
            &[
                Duration::from_secs(5),
                Duration::from_secs(1800),
                Duration::from_secs(5)
            ]
        );
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.sent()[0].priority, Priority::PAUSE);
        assert_eq!(monitor.state(), AlertState::Normal);
    }

    #[test]
    fn test_run_uses_configured_backoff() {
        let source = MockPriceSource::new();
        source.push_error(FetchError::RateLimited { status: 429 });
        source.push_price(0.06);
        let notifier = MockNotifier::new();
        let mut sleeper = RecordingSleeper::stopping_after(2);
        let mut monitor = Monitor::new(
            config()
                .with_interval(Duration::from_secs(2))
                .with_backoff(Duration::from_secs(90)),
            &source,
            &notifier,
        );

        monitor.run(&mut sleeper);

        assert_eq!(
            sleeper.waits(),
            &[Duration::from_secs(90), Duration::from_secs(2)]
        );
        assert_eq!(monitor.state(), AlertState::Breached);
    }
}
