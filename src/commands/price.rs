//! Price command implementation
//!
//! Fetches the current price once and prints it.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, PriceReport};
use crate::config::Config;
use crate::domain::{Price, Threshold};
use crate::error::Result;
use crate::feed::{BinanceTicker, PriceSource};

/// Execute the price command
pub fn run_price(config: &Config, format: OutputFormat) -> Result<()> {
    let ticker = BinanceTicker::new(
        &config.feed.ticker_url,
        config.symbol()?,
        config.fetch_timeout()?,
    )?;

    let threshold = config.watch.threshold.map(Threshold::new).transpose()?;
    let report = price_report(&ticker, ticker.symbol().as_str(), threshold)?;

    print_output(&report, format)?;
    Ok(())
}

fn price_report<P: PriceSource>(
    source: &P,
    symbol: &str,
    threshold: Option<Threshold>,
) -> Result<PriceReport> {
    let price: Price = source.fetch()?;

    Ok(PriceReport {
        symbol: symbol.to_string(),
        price: price.value(),
        source: source.name().to_string(),
        threshold: threshold.map(|t| t.value()),
        breached: threshold.map(|t| t.is_breached_by(price)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, FetchError};
    use crate::mock::MockPriceSource;

    #[test]
    fn test_price_report_with_threshold() {
        let source = MockPriceSource::with_prices(&[0.05]);
        let report =
            price_report(&source, "ETHBTC", Some(Threshold::new(0.05).unwrap())).unwrap();
        assert_eq!(report.price, 0.05);
        assert_eq!(report.breached, Some(true));
        assert_eq!(report.source, "Mock");
    }

    #[test]
    fn test_price_report_without_threshold() {
        let source = MockPriceSource::with_prices(&[0.04]);
        let report = price_report(&source, "ETHBTC", None).unwrap();
        assert_eq!(report.breached, None);
    }

    #[test]
    fn test_price_report_propagates_fetch_error() {
        let source = MockPriceSource::new();
        source.push_error(FetchError::RateLimited { status: 451 });
        let result = price_report(&source, "ETHBTC", None);
        assert!(matches!(
            result,
            Err(AppError::Fetch(FetchError::RateLimited { status: 451 }))
        ));
    }
}
