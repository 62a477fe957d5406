//! Mock implementations for testing
//!
//! Provides a scripted price source, a recording notifier and a recording
//! sleeper for unit testing without network access or real delays.

use crate::alerts::{Notification, Notifier};
use crate::domain::Price;
use crate::error::{FetchError, NotifyError};
use crate::feed::PriceSource;
use crate::services::Sleeper;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::Duration;

/// Mock price source replaying a scripted sequence of results
///
/// Once the script is exhausted every fetch fails with a transient error.
#[derive(Debug, Default)]
pub struct MockPriceSource {
    script: RefCell<VecDeque<Result<Price, FetchError>>>,
    calls: Cell<usize>,
}

impl MockPriceSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source replaying `prices`
    pub fn with_prices(prices: &[f64]) -> Self {
        let source = Self::new();
        for &value in prices {
            source.push_price(value);
        }
        source
    }

    /// Queue a successful reading
    pub fn push_price(&self, value: f64) {
        let price = Price::new(value).expect("mock price must be finite");
        self.script.borrow_mut().push_back(Ok(price));
    }

    /// Queue a failure
    pub fn push_error(&self, error: FetchError) {
        self.script.borrow_mut().push_back(Err(error));
    }

    /// Number of fetches performed
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PriceSource for MockPriceSource {
    fn fetch(&self) -> Result<Price, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transient("mock script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Mock notifier recording every delivered notification
#[derive(Debug, Default)]
pub struct MockNotifier {
    failure: Option<NotifyError>,
    sent: RefCell<Vec<Notification>>,
    attempts: Cell<usize>,
}

impl MockNotifier {
    /// Create a notifier that acknowledges every send
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that rejects every send
    pub fn failing() -> Self {
        Self::failing_with(NotifyError::AckFailure(r#"{"status":0}"#.to_string()))
    }

    /// Create a notifier that rejects every send with `error`
    pub fn failing_with(error: NotifyError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Notifications acknowledged so far
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }

    /// Number of send attempts, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl Notifier for MockNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.attempts.set(self.attempts.get() + 1);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent.borrow_mut().push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Sleeper that records waits instead of blocking
///
/// Optionally stops the watch loop once a given number of waits is recorded.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    waits: Vec<Duration>,
    limit: Option<usize>,
}

impl RecordingSleeper {
    /// Create a sleeper that never stops the loop
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sleeper that breaks the loop on its `limit`-th wait
    pub fn stopping_after(limit: usize) -> Self {
        Self {
            waits: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Waits requested so far
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) -> ControlFlow<()> {
        self.waits.push(duration);
        match self.limit {
            Some(limit) if self.waits.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}
