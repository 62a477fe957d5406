//! Unified error types for pricewatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
///
/// Only errors that cannot be handled inside the watch loop end up here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Price feed error surfaced by a one-shot command
    #[error("Price feed error: {0}")]
    Fetch(#[from] FetchError),

    /// Notification error surfaced by a one-shot command
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    /// Signal handler could not be installed
    #[error("Failed to install signal handler: {0}")]
    Signal(String),

    /// IO error (file operations, stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the price feed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or unexpected HTTP status
    #[error("{0}")]
    Transient(String),

    /// Feed refused the request with a rate-limit/ban status
    #[error("rate limited by feed (HTTP {status})")]
    RateLimited { status: u16 },

    /// Response arrived but the price could not be extracted
    #[error("Error parsing price data: {reason}. API response was: {body}")]
    Parse { reason: String, body: String },
}

impl FetchError {
    /// Whether this failure should trigger the critical backoff
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Errors from the notification channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Token or user key is empty
    #[error("API not configured")]
    Unconfigured,

    /// Transport failure or non-success HTTP status
    #[error("HTTP Request Error when sending notification: {0}")]
    HttpFailure(String),

    /// Service answered but did not acknowledge delivery
    #[error("Notification API Error: {0}")]
    AckFailure(String),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Price is NaN or infinite
    #[error("Invalid price: {0} (must be finite)")]
    InvalidPrice(f64),

    /// Threshold is NaN or infinite
    #[error("Invalid threshold: {0} (must be finite)")]
    InvalidThreshold(f64),

    /// Priority outside the -2..=2 range
    #[error("Invalid priority: {0} (must be -2..=2)")]
    InvalidPriority(i8),

    /// Unknown priority name
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    /// Symbol is empty or contains non-alphanumeric characters
    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_classification() {
        assert!(FetchError::RateLimited { status: 451 }.is_rate_limited());
        assert!(!FetchError::Transient("timeout".to_string()).is_rate_limited());
        assert!(!FetchError::Parse {
            reason: "missing field".to_string(),
            body: "{}".to_string()
        }
        .is_rate_limited());
    }

    #[test]
    fn test_parse_error_display_includes_body() {
        let err = FetchError::Parse {
            reason: "missing field `price`".to_string(),
            body: r#"{"code":-1121}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("missing field"));
        assert!(text.contains("-1121"));
    }

    #[test]
    fn test_notify_error_display() {
        assert_eq!(NotifyError::Unconfigured.to_string(), "API not configured");
        assert!(NotifyError::AckFailure(r#"{"status":0}"#.to_string())
            .to_string()
            .contains("status"));
    }

    #[test]
    fn test_error_conversion() {
        let domain_err = DomainError::InvalidThreshold(f64::NAN);
        let app_err: AppError = domain_err.into();
        assert!(matches!(app_err, AppError::Domain(_)));

        let fetch_err = FetchError::RateLimited { status: 429 };
        let app_err: AppError = fetch_err.into();
        assert!(matches!(app_err, AppError::Fetch(_)));
    }
}
