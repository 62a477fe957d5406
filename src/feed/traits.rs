//! Trait definitions for price feeds
//!
//! These traits abstract over the remote ticker to enable testing with mocks.

use crate::domain::Price;
use crate::error::FetchError;

/// Source of the tracked price
///
/// Implementations are stateless per call: endpoint and symbol are fixed at
/// construction, and every failure is returned as a classified `FetchError`
/// rather than panicking, so the caller can pick the retry interval.
pub trait PriceSource {
    /// Read the current price
    fn fetch(&self) -> Result<Price, FetchError>;

    /// Human-readable feed name used in log lines and pause notices
    fn name(&self) -> &str;
}

impl<P: PriceSource + ?Sized> PriceSource for &P {
    fn fetch(&self) -> Result<Price, FetchError> {
        (**self).fetch()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
