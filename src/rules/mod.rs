//! Threshold rules
//!
//! Classifies the SOFR-IORB spread and the dollar index into an alert.
//! Rules are checked in order and the first match wins.

mod types;

pub use types::{Alert, AlertLevel};

/// Spread above which onshore liquidity counts as exhausted (5 bp)
pub const SPREAD_DANGER: f64 = 0.05;

/// Spread above which the repo rate is inverted
pub const SPREAD_WARNING: f64 = 0.0;

/// Dollar index level considered extremely strong
pub const DXY_WARNING: f64 = 106.0;

pub const TITLE_LIQUIDITY_EXHAUSTED: &str = "🔴 Severe alert: onshore liquidity exhausted";
pub const TITLE_REPO_INVERSION: &str = "🟡 Advisory: repo rate inversion";
pub const TITLE_STRONG_DOLLAR: &str = "🟡 Advisory: currency index extremely strong";
pub const TITLE_NORMAL: &str = "🟢 Macro liquidity normal";

/// Classify the readings
///
/// All comparisons are strict, so a zero spread never alerts on its own and
/// a dollar index of `0.0` (fetch failure) never trips the DXY rule.
pub fn evaluate(spread: f64, dxy: f64) -> Alert {
    if spread > SPREAD_DANGER {
        Alert::new(AlertLevel::Danger, TITLE_LIQUIDITY_EXHAUSTED)
    } else if spread > SPREAD_WARNING {
        Alert::new(AlertLevel::Warning, TITLE_REPO_INVERSION)
    } else if dxy > DXY_WARNING {
        Alert::new(AlertLevel::Warning, TITLE_STRONG_DOLLAR)
    } else {
        Alert::new(AlertLevel::Info, TITLE_NORMAL)
    }
}
