//! Price feed layer
//!
//! Provides a trait-based abstraction over the remote ticker for testability.

pub mod binance;
pub mod traits;

pub use binance::BinanceTicker;
pub use traits::PriceSource;
