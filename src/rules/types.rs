//! Alert types

use serde::{Deserialize, Serialize};

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Liquidity normal
    Info,
    /// Early stress signal
    Warning,
    /// Funding market stress
    Danger,
}

impl AlertLevel {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }

    /// Card header template color
    pub fn color(&self) -> &'static str {
        match self {
            AlertLevel::Info => "green",
            AlertLevel::Warning => "yellow",
            AlertLevel::Danger => "red",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule evaluation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    /// Emoji-prefixed headline
    pub title: String,
}

impl Alert {
    pub fn new(level: AlertLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}
