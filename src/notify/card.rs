//! Feishu interactive card payload

use crate::fetch::Readings;
use crate::rules::Alert;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Top-level webhook message
#[derive(Debug, Clone, Serialize)]
pub struct CardMessage {
    pub msg_type: &'static str,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub config: CardConfig,
    pub header: Header,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardConfig {
    pub wide_screen_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    /// Header color template
    pub template: &'static str,
    pub title: Text,
}

/// Text node; `tag` is `plain_text` or `lark_md`
#[derive(Debug, Clone, Serialize)]
pub struct Text {
    pub tag: &'static str,
    pub content: String,
}

impl Text {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            tag: "plain_text",
            content: content.into(),
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            tag: "lark_md",
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub is_short: bool,
    pub text: Text,
}

/// Card body element
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Element {
    /// Field section
    Div { fields: Vec<Field> },
    /// Horizontal rule
    Hr,
    /// Footnote
    Note { elements: Vec<Text> },
}

impl CardMessage {
    /// Rendered header title
    pub fn title(&self) -> &str {
        &self.card.header.title.content
    }
}

/// Render the daily card
pub fn build_card(
    alert: &Alert,
    readings: &Readings,
    rendered_at: DateTime<Utc>,
    title_suffix: &str,
) -> CardMessage {
    let fields = vec![
        Field {
            is_short: true,
            text: Text::markdown(format!(
                "**SOFR-IORB spread:**\n{}",
                format_spread(readings.spread)
            )),
        },
        Field {
            is_short: true,
            text: Text::markdown(format!(
                "**Dollar index (DXY):**\n{}",
                format_dxy(readings.dxy)
            )),
        },
    ];

    CardMessage {
        msg_type: "interactive",
        card: Card {
            config: CardConfig {
                wide_screen_mode: true,
            },
            header: Header {
                template: alert.level.color(),
                title: Text::plain(format!("{} | {}", alert.title, title_suffix)),
            },
            elements: vec![
                Element::Div { fields },
                Element::Hr,
                Element::Note {
                    elements: vec![Text::plain(format!(
                        "Updated: {} (UTC)",
                        rendered_at.format("%Y-%m-%d %H:%M")
                    ))],
                },
            ],
        },
    }
}

/// Spread in percent, four decimals
pub fn format_spread(spread: f64) -> String {
    format!("{:.4}%", spread)
}

/// Dollar index, two decimals
pub fn format_dxy(dxy: f64) -> String {
    format!("{:.2}", dxy)
}
