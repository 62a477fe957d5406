//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist; without one the default locations are
    /// searched and defaults are kept if none is found.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI/env symbol
    pub fn with_symbol(mut self, symbol: Option<String>) -> Self {
        if let Some(s) = symbol {
            self.config.watch.symbol = s;
        }
        self
    }

    /// Override with CLI/env threshold
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(t) = threshold {
            self.config.watch.threshold = Some(t);
        }
        self
    }

    /// Override with CLI/env poll interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.watch.interval_seconds = i;
        }
        self
    }

    /// Override with CLI/env rate-limit backoff
    pub fn with_backoff(mut self, backoff: Option<u64>) -> Self {
        if let Some(b) = backoff {
            self.config.watch.backoff_seconds = b;
        }
        self
    }

    /// Override with env Pushover token
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = token {
            self.config.pushover.api_token = t;
        }
        self
    }

    /// Override with env Pushover user key
    pub fn with_user_key(mut self, user_key: Option<String>) -> Self {
        if let Some(u) = user_key {
            self.config.pushover.user_key = u;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_symbol(Some("BTCUSDT".to_string()))
            .with_threshold(Some(70000.0))
            .with_interval(Some(10))
            .with_backoff(Some(600))
            .with_api_token(Some("token".to_string()))
            .with_user_key(Some("user".to_string()))
            .build();

        assert_eq!(config.watch.symbol, "BTCUSDT");
        assert_eq!(config.watch.threshold, Some(70000.0));
        assert_eq!(config.watch.interval_seconds, 10);
        assert_eq!(config.watch.backoff_seconds, 600);
        assert!(config.pushover.credentials().is_configured());
    }

    #[test]
    fn test_none_keeps_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[watch]\nthreshold = 0.05\ninterval_seconds = 30").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = ConfigBuilder::new()
            .with_file(Some(&path))
            .unwrap()
            .with_interval(None)
            .with_threshold(Some(0.06))
            .build();

        assert_eq!(config.watch.interval_seconds, 30);
        assert_eq!(config.watch.threshold, Some(0.06));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = ConfigBuilder::new().with_file(Some("/nonexistent/pricewatch.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
