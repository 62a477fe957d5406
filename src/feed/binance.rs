//! Binance ticker price source
//!
//! Reads the latest price for a single symbol from the public
//! `/api/v3/ticker/price` endpoint.

use crate::domain::{Price, Symbol};
use crate::error::{AppError, FetchError};
use crate::feed::traits::PriceSource;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Default ticker endpoint
pub const DEFAULT_TICKER_URL: &str = "https://api.binance.com/api/v3/ticker/price";

/// Default per-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Statuses the feed uses to signal rate limiting or an IP ban
///
/// 451 is returned for restricted/banned clients, 429 when the request weight
/// is exceeded, and 418 once a client keeps going after a 429.
pub const RATE_LIMIT_STATUSES: [u16; 3] = [418, 429, 451];

/// Ticker response body
#[derive(Debug, Deserialize)]
struct TickerResponse {
    price: PriceField,
}

/// The feed encodes prices as strings, but accept plain numbers too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(f64),
}

/// Binance ticker client
pub struct BinanceTicker {
    client: Client,
    ticker_url: String,
    symbol: Symbol,
}

impl BinanceTicker {
    /// Create a ticker client for `symbol` against `ticker_url`
    pub fn new(
        ticker_url: impl Into<String>,
        symbol: Symbol,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            ticker_url: ticker_url.into(),
            symbol,
        })
    }

    /// Symbol this client tracks
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

impl PriceSource for BinanceTicker {
    fn fetch(&self) -> Result<Price, FetchError> {
        let response = self
            .client
            .get(&self.ticker_url)
            .query(&[("symbol", self.symbol.as_str())])
            .send()
            .map_err(|e| {
                FetchError::Transient(format!("Error fetching price from Binance API: {}", e))
            })?;

        check_status(response.status())?;

        let body = response.text().map_err(|e| {
            FetchError::Transient(format!("Error reading Binance API response: {}", e))
        })?;

        parse_ticker_body(&body)
    }

    fn name(&self) -> &str {
        "Binance"
    }
}

/// Classify a response status before the body is read
pub fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if RATE_LIMIT_STATUSES.contains(&status.as_u16()) {
        return Err(FetchError::RateLimited {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        return Err(FetchError::Transient(format!(
            "Error fetching price from Binance API: HTTP {}",
            status
        )));
    }

    Ok(())
}

/// Extract a finite price from a ticker response body
pub fn parse_ticker_body(body: &str) -> Result<Price, FetchError> {
    let parse_error = |reason: String| FetchError::Parse {
        reason,
        body: body.to_string(),
    };

    let ticker: TickerResponse =
        serde_json::from_str(body).map_err(|e| parse_error(e.to_string()))?;

    let value = match ticker.price {
        PriceField::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| parse_error(format!("price '{}' is not a number: {}", text, e)))?,
        PriceField::Number(value) => value,
    };

    Price::new(value).map_err(|e| parse_error(e.to_string()))
}
