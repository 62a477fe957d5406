//! Domain models for pricewatch
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod price;
pub mod priority;

pub use price::{Price, Symbol, Threshold};
pub use priority::Priority;
