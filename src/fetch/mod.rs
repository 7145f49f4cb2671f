//! Data fetching module
//!
//! Pulls the funding/reference rate pair from FRED and the dollar index
//! close from Yahoo Finance. The macro pair is mandatory; the dollar index
//! is best-effort and degrades to `0.0`.

mod fred;
mod types;
mod yahoo;

pub use fred::{FredClient, FRED_API_URL};
pub use types::{MacroRates, Readings};
pub use yahoo::{YahooClient, YAHOO_API_URL};

use crate::config::FredConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};

/// Trait for macro series providers
#[async_trait]
pub trait MacroSource: Send + Sync {
    /// Latest non-missing value of a series observed on or after `since`
    async fn latest_value(&self, series_id: &str, since: NaiveDate) -> Result<f64, FetchError>;
}

/// Trait for market price providers
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Most recent daily close for a ticker
    async fn latest_close(&self, ticker: &str) -> Result<f64, FetchError>;
}

/// Fetch both macro series over the configured lookback window
///
/// Any failure on either series aborts with that error.
pub async fn fetch_macro_rates(
    source: &dyn MacroSource,
    config: &FredConfig,
    today: NaiveDate,
) -> Result<MacroRates, FetchError> {
    let since = today
        .checked_sub_days(Days::new(u64::from(config.lookback_days)))
        .ok_or(FetchError::WindowOutOfRange(config.lookback_days))?;

    let funding_rate = source.latest_value(&config.funding_series, since).await?;
    let reference_rate = source.latest_value(&config.reference_series, since).await?;

    tracing::info!(
        funding_series = %config.funding_series,
        funding_rate,
        reference_series = %config.reference_series,
        reference_rate,
        "Fetched macro rates"
    );

    Ok(MacroRates {
        funding_rate,
        reference_rate,
    })
}

/// Fetch the dollar index close, substituting `0.0` on any failure
pub async fn fetch_dxy(source: &dyn PriceSource, ticker: &str) -> f64 {
    match source.latest_close(ticker).await {
        Ok(close) => {
            tracing::info!(ticker, close, "Fetched dollar index");
            close
        }
        Err(e) => {
            tracing::warn!(ticker, error = %e, "Dollar index unavailable, using 0");
            0.0
        }
    }
}
