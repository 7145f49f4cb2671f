//! Error types shared across the pipeline

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
    /// The webhook trigger keyword does not appear in the title suffix
    #[error("Title suffix {suffix:?} does not contain trigger keyword {keyword:?}")]
    KeywordNotInTitle { keyword: String, suffix: String },
    /// Lookback window must cover at least one day
    #[error("Lookback window must be at least one day")]
    EmptyLookback,
    /// Lookback window longer than the accepted maximum
    #[error("Lookback window of {0} days is too long")]
    LookbackTooLong(u32),
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Data provider errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or decode failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
    /// Provider answered with a non-success status
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    /// Window contained no usable observation
    #[error("No observations for {0}")]
    NoObservations(String),
    /// Lookback window reaches before the earliest representable date
    #[error("Lookback of {0} days is out of range")]
    WindowOutOfRange(u32),
}

// Request URLs carry the FRED key and the webhook token.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.without_url())
    }
}

/// Webhook delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
    /// Webhook answered with a non-success status
    #[error("Webhook returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Webhook accepted the request but rejected the message
    #[error("Webhook rejected message (code {code}): {msg}")]
    Rejected { code: i64, msg: String },
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Http(e.without_url())
    }
}
