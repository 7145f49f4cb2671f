//! Configuration types for liquidity-monitor
//!
//! Tunables live in a TOML file; secrets only ever come from the environment.

use crate::error::ConfigError;
use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};

/// Environment variable holding the FRED API key
pub const FRED_API_KEY_VAR: &str = "FRED_API_KEY";

/// Environment variable holding the Feishu webhook URL
pub const FEISHU_WEBHOOK_VAR: &str = "FEISHU_WEBHOOK";

/// Longest accepted lookback window (days)
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fred: FredConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Macro data provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FredConfig {
    #[serde(default = "default_fred_url")]
    pub base_url: String,

    /// Short-term funding rate series
    #[serde(default = "default_funding_series")]
    pub funding_series: String,

    /// Administered reference rate series
    #[serde(default = "default_reference_series")]
    pub reference_series: String,

    /// Trailing window searched for the latest observation (days)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_fred_url() -> String {
    "https://api.stlouisfed.org/fred".to_string()
}
fn default_funding_series() -> String {
    "SOFR".to_string()
}
fn default_reference_series() -> String {
    "IORB".to_string()
}
fn default_lookback_days() -> u32 {
    30
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            base_url: default_fred_url(),
            funding_series: default_funding_series(),
            reference_series: default_reference_series(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Market data provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    #[serde(default = "default_yahoo_url")]
    pub base_url: String,

    /// Dollar index ticker
    #[serde(default = "default_ticker")]
    pub ticker: String,

    /// Chart range requested from the provider
    #[serde(default = "default_range")]
    pub range: String,
}

fn default_yahoo_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_ticker() -> String {
    "DX-Y.NYB".to_string()
}
fn default_range() -> String {
    "5d".to_string()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_yahoo_url(),
            ticker: default_ticker(),
            range: default_range(),
        }
    }
}

/// Webhook card configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// Trigger keyword configured on the chat bot
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Label appended to every card title
    #[serde(default = "default_title_suffix")]
    pub title_suffix: String,
}

fn default_keyword() -> String {
    "monitor".to_string()
}
fn default_title_suffix() -> String {
    "daily monitor".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            title_suffix: default_title_suffix(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.notify.title_suffix.contains(&self.notify.keyword) {
            return Err(ConfigError::KeywordNotInTitle {
                keyword: self.notify.keyword.clone(),
                suffix: self.notify.title_suffix.clone(),
            });
        }
        if self.fred.lookback_days == 0 {
            return Err(ConfigError::EmptyLookback);
        }
        if self.fred.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::LookbackTooLong(self.fred.lookback_days));
        }
        Ok(())
    }
}

/// Secrets required for a full run
#[derive(Clone)]
pub struct Credentials {
    pub fred_api_key: String,
    pub webhook_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("fred_api_key", &"<redacted>")
            .field("webhook_url", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials through an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            fred_api_key: require(&lookup, FRED_API_KEY_VAR)?,
            webhook_url: require(&lookup, FEISHU_WEBHOOK_VAR)?,
        })
    }
}

/// Process environment lookup
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Fetch a variable, treating blank values as unset
pub fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingEnv(name))
}
