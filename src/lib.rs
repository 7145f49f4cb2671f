//! liquidity-monitor: daily funding-market stress monitor
//!
//! This library provides the components for:
//! - Fetching SOFR and IORB from FRED and the dollar index from Yahoo Finance
//! - Classifying the SOFR-IORB spread and dollar index into an alert
//! - Rendering and delivering a Feishu interactive card
//! - Configuration, logging and run metrics

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod notify;
pub mod pipeline;
pub mod rules;
pub mod telemetry;

#[cfg(test)]
mod testing;
