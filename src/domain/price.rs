//! Price domain types
//!
//! Provides validated types for price readings, the alert threshold and the
//! tracked trading symbol.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price reading from the feed
///
/// Validated on construction to ensure the value is finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Create a new Price with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if value is NaN or infinite
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidPrice(value));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Level the tracked price is compared against
///
/// Comparison is inclusive: a price equal to the threshold is a breach.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Create a new Threshold with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidThreshold` if value is NaN or infinite
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidThreshold(value));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Whether a price is at or above this threshold
    #[inline]
    pub fn is_breached_by(&self, price: Price) -> bool {
        price.value() >= self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// Exchange trading pair identifier (e.g. `ETHBTC`)
///
/// Stored upper-case; only ASCII alphanumerics are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSymbol` if empty or not alphanumeric
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidSymbol(value));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Get the symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}
