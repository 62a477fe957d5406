//! Alert notification channels
//!
//! Provides the notifier abstraction and the Pushover implementation.

use super::types::Notification;
use crate::domain::Priority;
use crate::error::{AppError, NotifyError};

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default Pushover messages endpoint
pub const DEFAULT_PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

/// Default per-request timeout
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between re-deliveries of an emergency notification
pub const DEFAULT_EMERGENCY_RETRY: Duration = Duration::from_secs(60);

/// Default time after which an unacknowledged emergency stops repeating
pub const DEFAULT_EMERGENCY_EXPIRE: Duration = Duration::from_secs(3600);

/// Shortest retry interval Pushover accepts
pub const MIN_EMERGENCY_RETRY: Duration = Duration::from_secs(30);

/// Longest expiry Pushover accepts
pub const MAX_EMERGENCY_EXPIRE: Duration = Duration::from_secs(10800);

/// Notification channel trait
pub trait Notifier {
    /// Deliver a notification, reporting why it failed
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;

    /// Deliver a notification, logging any failure
    ///
    /// Returns `true` only when the channel acknowledged delivery. Failures
    /// are never escalated.
    fn notify(&self, notification: &Notification) -> bool {
        match self.send(notification) {
            Ok(()) => {
                log::info!(
                    "{} notification sent. Title: {}",
                    self.name(),
                    notification.title
                );
                true
            }
            Err(NotifyError::Unconfigured) => {
                log::warn!("{}: {}", self.name(), NotifyError::Unconfigured);
                false
            }
            Err(e) => {
                log::error!("{}: {}", self.name(), e);
                false
            }
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        (**self).send(notification)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Pushover application token and user key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushoverCredentials {
    /// Application API token
    pub token: String,
    /// User or group key
    pub user_key: String,
}

impl PushoverCredentials {
    /// Create credentials from token and user key
    pub fn new(token: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_key: user_key.into(),
        }
    }

    /// Both token and user key are set
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty() && !self.user_key.trim().is_empty()
    }
}

/// Pushover API acknowledgment
#[derive(Debug, Deserialize)]
struct PushoverAck {
    status: i64,
}

/// Pushover notifier
///
/// With empty credentials every send fails with `NotifyError::Unconfigured`
/// before any network I/O, which leaves the watcher running in log-only mode.
///
/// Emergency-priority messages carry `retry`/`expire`, which the API
/// requires for priority 2.
pub struct PushoverNotifier {
    client: Client,
    url: String,
    credentials: PushoverCredentials,
    retry: Duration,
    expire: Duration,
}

impl PushoverNotifier {
    /// Create a notifier posting to `url`
    pub fn new(
        url: impl Into<String>,
        credentials: PushoverCredentials,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            credentials,
            retry: DEFAULT_EMERGENCY_RETRY,
            expire: DEFAULT_EMERGENCY_EXPIRE,
        })
    }

    /// Builder: set the emergency re-delivery schedule
    pub fn with_emergency(mut self, retry: Duration, expire: Duration) -> Self {
        self.retry = retry;
        self.expire = expire;
        self
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Form fields posted for `notification`
    pub fn form_fields(&self, notification: &Notification) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("token", self.credentials.token.clone()),
            ("user", self.credentials.user_key.clone()),
            ("title", notification.title.clone()),
            ("message", notification.message.clone()),
            ("priority", notification.priority.as_i8().to_string()),
        ];

        if notification.priority == Priority::Emergency {
            form.push(("retry", self.retry.as_secs().to_string()));
            form.push(("expire", self.expire.as_secs().to_string()));
        }

        form
    }
}

impl Notifier for PushoverNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.is_configured() {
            return Err(NotifyError::Unconfigured);
        }

        let form = self.form_fields(notification);

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .map_err(|e| NotifyError::HttpFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| NotifyError::HttpFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(NotifyError::HttpFailure(format!("HTTP {}: {}", status, body)));
        }

        check_ack(&body)
    }

    fn name(&self) -> &str {
        "Pushover"
    }
}

/// Verify the service acknowledged delivery (`"status": 1`)
pub fn check_ack(body: &str) -> Result<(), NotifyError> {
    match serde_json::from_str::<PushoverAck>(body) {
        Ok(ack) if ack.status == 1 => Ok(()),
        _ => Err(NotifyError::AckFailure(body.to_string())),
    }
}
