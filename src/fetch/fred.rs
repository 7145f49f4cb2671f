//! FRED client for macro series observations
//!
//! Queries `series/observations` with an `observation_start` bound. FRED
//! reports missing observations as the string `"."`, which are skipped.

use super::MacroSource;
use crate::error::FetchError;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

/// FRED API base URL
pub const FRED_API_URL: &str = "https://api.stlouisfed.org/fred";

/// Client for the FRED observations endpoint
pub struct FredClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl FredClient {
    /// Create a client against the public FRED API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, FRED_API_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MacroSource for FredClient {
    async fn latest_value(&self, series_id: &str, since: NaiveDate) -> Result<f64, FetchError> {
        let url = format!("{}/series/observations", self.base_url);
        let start = since.format("%Y-%m-%d").to_string();

        tracing::debug!(series = series_id, observation_start = %start, "Fetching FRED series");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                provider: "FRED",
                status,
                body,
            });
        }

        let payload: ObservationsResponse = response.json().await?;

        tracing::debug!(
            series = series_id,
            observations = payload.observations.len(),
            "Received FRED observations"
        );

        latest_observation(&payload.observations)
            .ok_or_else(|| FetchError::NoObservations(series_id.to_string()))
    }
}

/// Body of a `series/observations` response
#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

/// A single dated observation; `value` is a decimal string or `"."`
#[derive(Debug, Deserialize)]
struct Observation {
    #[allow(dead_code)]
    date: String,
    value: String,
}

/// Most recent observation with a numeric value
///
/// FRED returns observations in ascending date order.
fn latest_observation(observations: &[Observation]) -> Option<f64> {
    observations
        .iter()
        .rev()
        .find_map(|o| o.value.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
}
