//! Feishu custom bot webhook

use super::{CardMessage, Notifier};
use crate::error::NotifyError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

/// Posts cards to a Feishu bot webhook URL
pub struct FeishuNotifier {
    webhook_url: String,
    client: Client,
}

impl FeishuNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for FeishuNotifier {
    async fn send(&self, card: &CardMessage) -> Result<String, NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .json(card)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::info!(status = status.as_u16(), response = %body, "Feishu response");

        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        check_reply(&body)?;
        Ok(body)
    }
}

/// Webhook reply body
///
/// Newer deployments answer with `code`/`msg`, older ones with
/// `StatusCode`/`StatusMessage`, and some with both.
#[derive(Debug, Deserialize)]
struct WebhookReply {
    code: Option<i64>,
    msg: Option<String>,
    #[serde(rename = "StatusCode")]
    status_code: Option<i64>,
    #[serde(rename = "StatusMessage")]
    status_message: Option<String>,
}

/// Fail on a non-zero reply code; bodies that are not JSON pass through
fn check_reply(body: &str) -> Result<(), NotifyError> {
    let Ok(reply) = serde_json::from_str::<WebhookReply>(body) else {
        return Ok(());
    };

    match reply.code.or(reply.status_code) {
        Some(code) if code != 0 => Err(NotifyError::Rejected {
            code,
            msg: reply.msg.or(reply.status_message).unwrap_or_default(),
        }),
        _ => Ok(()),
    }
}
