//! Alert and notification system
//!
//! Provides breach alert state, notification payloads and notification channels.

mod notifier;
mod types;

pub use notifier::{
    check_ack, Notifier, PushoverCredentials, PushoverNotifier, DEFAULT_EMERGENCY_EXPIRE,
    DEFAULT_EMERGENCY_RETRY, DEFAULT_NOTIFY_TIMEOUT, DEFAULT_PUSHOVER_URL, MAX_EMERGENCY_EXPIRE,
    MIN_EMERGENCY_RETRY,
};
pub use types::{pause_message, AlertState, Notification};
