//! Notification module
//!
//! Renders alerts as Feishu interactive cards and delivers them.

mod card;
mod feishu;

pub use card::{
    build_card, format_dxy, format_spread, Card, CardConfig, CardMessage, Element, Field, Header,
    Text,
};
pub use feishu::FeishuNotifier;

use crate::error::NotifyError;
use async_trait::async_trait;

/// Trait for card delivery channels
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a card, returning the raw response body
    async fn send(&self, card: &CardMessage) -> Result<String, NotifyError>;
}
