//! Alert system domain types
//!
//! Defines the breach state machine states and the notification payload.

use crate::domain::{Price, Priority, Symbol, Threshold};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Alert state for the current breach episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlertState {
    /// No alert delivered for the current episode; armed
    #[default]
    Normal,
    /// An alert was delivered and the price has not dropped back yet
    Breached,
}

impl AlertState {
    /// Whether an alert has been delivered for the current episode
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Breached)
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Breached => write!(f, "BREACHED"),
        }
    }
}

/// A message to deliver through a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// Delivery priority
    pub priority: Priority,
}

impl Notification {
    /// Create a new notification
    pub fn new(title: impl Into<String>, message: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            priority,
        }
    }

    /// Alert sent when the price reaches the threshold
    pub fn breach(symbol: &Symbol, price: Price, threshold: Threshold) -> Self {
        Self::new(
            format!("{} LEVEL BREACHED!", symbol),
            format!("{} ratio is now {} (>= {}).", symbol, price, threshold),
            Priority::BREACH,
        )
    }

    /// Notice sent when the feed rate-limits us and polling backs off
    pub fn paused(feed: &str, status: u16, backoff: Duration) -> Self {
        Self::new(
            format!("Monitor Paused ({} {})", feed, status),
            pause_message(feed, status, backoff),
            Priority::PAUSE,
        )
    }
}

/// Text logged and sent when a rate-limit status pauses polling
pub fn pause_message(feed: &str, status: u16, backoff: Duration) -> String {
    format!(
        "CRITICAL ERROR: {} returned {} (Rate Limit Ban). Backing off for {} seconds.",
        feed,
        status,
        backoff.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_state_default() {
        let state = AlertState::default();
        assert_eq!(state, AlertState::Normal);
        assert!(!state.is_active());
        assert!(AlertState::Breached.is_active());
    }

    #[test]
    fn test_breach_notification() {
        let symbol = Symbol::new("ETHBTC").unwrap();
        let notification = Notification::breach(
            &symbol,
            Price::new(0.0525).unwrap(),
            Threshold::new(0.05).unwrap(),
        );
        assert_eq!(notification.title, "ETHBTC LEVEL BREACHED!");
        assert_eq!(notification.message, "ETHBTC ratio is now 0.052500 (>= 0.05).");
        assert_eq!(notification.priority, Priority::Emergency);
    }

    #[test]
    fn test_paused_notification() {
        let notification = Notification::paused("Binance", 451, Duration::from_secs(1800));
        assert_eq!(notification.title, "Monitor Paused (Binance 451)");
        assert!(notification.message.contains("Backing off for 1800 seconds"));
        assert_eq!(notification.priority, Priority::Low);
    }
}
