//! Live announcements posted to a Discord webhook.
pub mod cooldown;
pub mod error;
pub mod webhook;

pub use cooldown::Cooldown;
pub use error::NotifyError;
pub use webhook::{WebhookMessage, WebhookNotifier};

use crate::twitch::StreamInfo;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announces that `stream` went live. `now` is the announcement's timestamp.
    async fn notify(&self, stream: &StreamInfo, now: DateTime<Utc>) -> Result<(), NotifyError>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    async fn notify(&self, stream: &StreamInfo, now: DateTime<Utc>) -> Result<(), NotifyError> {
        (**self).notify(stream, now).await
    }
}
