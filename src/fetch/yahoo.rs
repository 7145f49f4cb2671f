//! Yahoo Finance chart client for daily closes

use super::PriceSource;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Yahoo Finance base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; liquidity-monitor)";

/// Client for the v8 chart endpoint
pub struct YahooClient {
    base_url: String,
    range: String,
    client: Client,
}

impl YahooClient {
    /// Create a client against the public chart API
    pub fn new(range: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base_url(YAHOO_API_URL, range)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        range: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            range: range.into(),
            client,
        })
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn latest_close(&self, ticker: &str) -> Result<f64, FetchError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        tracing::debug!(ticker, range = %self.range, "Fetching daily closes");

        let response = self
            .client
            .get(&url)
            .query(&[("range", self.range.as_str()), ("interval", "1d")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                provider: "Yahoo",
                status,
                body,
            });
        }

        let payload: ChartResponse = response.json().await?;

        last_close(&payload).ok_or_else(|| FetchError::NoObservations(ticker.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

/// OHLC columns; holidays and the in-progress session may hold nulls
#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Most recent non-null close of the first result
fn last_close(payload: &ChartResponse) -> Option<f64> {
    payload
        .chart
        .result
        .as_ref()?
        .first()?
        .indicators
        .quote
        .first()?
        .close
        .iter()
        .rev()
        .find_map(|c| *c)
}
