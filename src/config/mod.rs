//! Configuration system
//!
//! Handles TOML config file parsing and CLI/environment argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::{
    PushoverCredentials, DEFAULT_EMERGENCY_EXPIRE, DEFAULT_EMERGENCY_RETRY,
    DEFAULT_NOTIFY_TIMEOUT, DEFAULT_PUSHOVER_URL, MAX_EMERGENCY_EXPIRE, MIN_EMERGENCY_RETRY,
};
use crate::domain::{Symbol, Threshold};
use crate::error::{AppError, ConfigError};
use crate::feed::binance::{DEFAULT_FETCH_TIMEOUT, DEFAULT_TICKER_URL};
use crate::services::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Price feed settings
    pub feed: FeedConfig,
    /// Pushover notification settings
    pub pushover: PushoverConfig,
    /// Watch loop settings
    pub watch: WatchConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Ticker endpoint URL
    pub ticker_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ticker_url: DEFAULT_TICKER_URL.to_string(),
            timeout_seconds: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

/// Pushover configuration
///
/// Empty credentials leave alerting in log-only mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PushoverConfig {
    /// Application API token
    pub api_token: String,
    /// User key
    pub user_key: String,
    /// Messages endpoint URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Re-delivery interval for emergency alerts, in seconds
    pub retry_seconds: u64,
    /// Stop re-delivering an unacknowledged emergency alert after this many seconds
    pub expire_seconds: u64,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            user_key: String::new(),
            url: DEFAULT_PUSHOVER_URL.to_string(),
            timeout_seconds: DEFAULT_NOTIFY_TIMEOUT.as_secs(),
            retry_seconds: DEFAULT_EMERGENCY_RETRY.as_secs(),
            expire_seconds: DEFAULT_EMERGENCY_EXPIRE.as_secs(),
        }
    }
}

impl PushoverConfig {
    /// Credentials for the notifier
    pub fn credentials(&self) -> PushoverCredentials {
        PushoverCredentials::new(self.api_token.clone(), self.user_key.clone())
    }

    /// Copy with secrets replaced for display
    pub fn masked(&self) -> Self {
        Self {
            api_token: mask(&self.api_token),
            user_key: mask(&self.user_key),
            ..self.clone()
        }
    }
}

/// Watch loop configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Trading pair to track
    pub symbol: String,
    /// Alert level; required to run the watcher
    pub threshold: Option<f64>,
    /// Poll interval in seconds
    pub interval_seconds: u64,
    /// Wait after a rate-limit response, in seconds
    pub backoff_seconds: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            symbol: "ETHBTC".to_string(),
            threshold: None,
            interval_seconds: 5,
            backoff_seconds: 1800,
        }
    }
}

impl Config {
    /// Validated symbol
    pub fn symbol(&self) -> Result<Symbol, AppError> {
        Ok(Symbol::new(self.watch.symbol.clone())?)
    }

    /// Feed request timeout
    pub fn fetch_timeout(&self) -> Result<Duration, ConfigError> {
        positive_seconds("feed.timeout_seconds", self.feed.timeout_seconds)
    }

    /// Notifier request timeout
    pub fn notify_timeout(&self) -> Result<Duration, ConfigError> {
        positive_seconds("pushover.timeout_seconds", self.pushover.timeout_seconds)
    }

    /// Emergency re-delivery schedule as `(retry, expire)`
    pub fn emergency_schedule(&self) -> Result<(Duration, Duration), ConfigError> {
        let retry = Duration::from_secs(self.pushover.retry_seconds);
        if retry < MIN_EMERGENCY_RETRY {
            return Err(ConfigError::InvalidValue {
                key: "pushover.retry_seconds".to_string(),
                message: format!("must be at least {}", MIN_EMERGENCY_RETRY.as_secs()),
            });
        }

        let expire = positive_seconds("pushover.expire_seconds", self.pushover.expire_seconds)?;
        if expire > MAX_EMERGENCY_EXPIRE {
            return Err(ConfigError::InvalidValue {
                key: "pushover.expire_seconds".to_string(),
                message: format!("must be at most {}", MAX_EMERGENCY_EXPIRE.as_secs()),
            });
        }

        Ok((retry, expire))
    }

    /// Convert to a MonitorConfig, validating every field the loop needs
    pub fn to_monitor_config(&self) -> Result<MonitorConfig, AppError> {
        let symbol = self.symbol()?;
        let threshold = self
            .watch
            .threshold
            .ok_or_else(|| ConfigError::MissingField("watch.threshold".to_string()))?;
        let threshold = Threshold::new(threshold)?;
        let interval = positive_seconds("watch.interval_seconds", self.watch.interval_seconds)?;
        let backoff = positive_seconds("watch.backoff_seconds", self.watch.backoff_seconds)?;

        Ok(MonitorConfig::new(symbol, threshold)
            .with_interval(interval)
            .with_backoff(backoff))
    }

    /// Check the whole configuration
    pub fn validate(&self) -> Result<(), AppError> {
        self.to_monitor_config()?;
        self.fetch_timeout()?;
        self.notify_timeout()?;
        self.emergency_schedule()?;
        Ok(())
    }

    /// Copy with secrets replaced for display
    pub fn masked(&self) -> Self {
        Self {
            pushover: self.pushover.masked(),
            ..self.clone()
        }
    }
}

fn positive_seconds(key: &str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        let visible: String = secret.chars().take(4).collect();
        format!("{}****", visible)
    }
}
