use super::error::NotifyError;
use super::Notifier;
use crate::options::ThumbnailSize;
use crate::twitch::StreamInfo;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::info;

const TWITCH_PURPLE: u32 = 0x6441A4;
const TWITCH_ICON: &str = "https://static.twitchcdn.net/assets/favicon-32-d6025c14e900565d6177.png";

/// The JSON body of a webhook execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub content: String,
    pub embeds: Vec<WebhookEmbed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEmbed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: u32,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub author: EmbedAuthor,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

impl WebhookMessage {
    /// The announcement for `stream` going live.
    #[must_use]
    pub fn live(
        stream: &StreamInfo,
        now: DateTime<Utc>,
        mention: &str,
        thumbnail: ThumbnailSize,
    ) -> Self {
        let name = &stream.user_name;
        let url = stream.channel_url();
        let image = Some(stream.thumbnail(thumbnail.width, thumbnail.height))
            .filter(|url| !url.is_empty())
            .map(|url| EmbedImage { url });

        let embed = WebhookEmbed {
            title: stream.title.clone().unwrap_or_default(),
            description: format!(
                "{name} is now streaming {}!\nCurrent viewers: {}",
                stream.game_name.as_deref().unwrap_or_default(),
                stream.viewer_count.unwrap_or(0)
            ),
            url: url.clone(),
            color: TWITCH_PURPLE,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            image,
            author: EmbedAuthor {
                name: format!("{name} is LIVE!"),
                url,
                icon_url: String::from(TWITCH_ICON),
            },
            footer: EmbedFooter {
                text: String::from("Twitch Stream Notification"),
                icon_url: String::from(TWITCH_ICON),
            },
        };

        Self {
            content: format!("🔴 **{name}** is now live on Twitch! {mention}")
                .trim_end()
                .to_owned(),
            embeds: vec![embed],
        }
    }
}

/// [Notifier] that executes a Discord webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: Client,
    url: String,
    mention: String,
    thumbnail: ThumbnailSize,
}

impl WebhookNotifier {
    #[must_use]
    pub fn new<S: Into<String>>(url: S, mention: S, thumbnail: ThumbnailSize) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            mention: mention.into(),
            thumbnail,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, stream: &StreamInfo, now: DateTime<Utc>) -> Result<(), NotifyError> {
        let message = WebhookMessage::live(stream, now, &self.mention, self.thumbnail);
        let response = self.http.post(&self.url).json(&message).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Sent live notification for {}", stream.user_login);
        Ok(())
    }
}
