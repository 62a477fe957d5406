//! Service layer for price watching
//!
//! Services encapsulate the polling loop and its scheduling.

pub mod clock;
pub mod monitor;

pub use clock::{Sleeper, ThreadSleeper};
pub use monitor::{Monitor, MonitorConfig, Poll, PollOutcome};
