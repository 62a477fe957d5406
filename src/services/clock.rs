//! Sleep abstraction for the watch loop
//!
//! Lets the loop's scheduling be tested without real delays.

use std::ops::ControlFlow;
use std::time::Duration;

/// Suspends the watch loop between polls
pub trait Sleeper {
    /// Block for `duration`
    ///
    /// Returning `Break` ends the watch loop.
    fn sleep(&mut self, duration: Duration) -> ControlFlow<()>;
}

/// Sleeper backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) -> ControlFlow<()> {
        std::thread::sleep(duration);
        ControlFlow::Continue(())
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) -> ControlFlow<()> {
        (**self).sleep(duration)
    }
}
