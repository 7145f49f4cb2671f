//! Run metrics
//!
//! Published through the `metrics` facade. Without an installed recorder
//! these calls are no-ops.

use crate::fetch::Readings;
use crate::rules::AlertLevel;

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// SOFR minus IORB, percent
    Spread,
    /// Dollar index close
    DollarIndex,
}

impl GaugeMetric {
    pub fn name(&self) -> &'static str {
        match self {
            GaugeMetric::Spread => "liquidity_sofr_iorb_spread_pct",
            GaugeMetric::DollarIndex => "liquidity_dxy_close",
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Notified,
    FetchFailed,
    MissingConfig,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Notified => "notified",
            RunStatus::FetchFailed => "fetch_failed",
            RunStatus::MissingConfig => "missing_config",
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    ::metrics::gauge!(metric.name()).set(value);
    tracing::debug!(metric = metric.name(), value, "Setting gauge");
}

/// Publish the fetched readings
pub fn record_readings(readings: &Readings) {
    set_gauge(GaugeMetric::Spread, readings.spread);
    set_gauge(GaugeMetric::DollarIndex, readings.dxy);
}

/// Count an emitted alert
pub fn record_alert(level: AlertLevel) {
    ::metrics::counter!("liquidity_alerts_total", "level" => level.as_str()).increment(1);
}

/// Count a finished run
pub fn record_run(status: RunStatus) {
    ::metrics::counter!("liquidity_runs_total", "status" => status.as_str()).increment(1);
}
