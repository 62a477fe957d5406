//! pricewatch - price threshold watcher library
//!
//! This library provides the polling loop that watches a price feed and
//! sends a single alert per threshold breach, backing off when the feed
//! rate-limits requests.
//!
//! # Modules
//!
//! - [`alerts`]: Alert state, notifications and notifier channels
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`feed`]: Price feed abstraction layer
//! - [`services`]: Watch loop and scheduling

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
