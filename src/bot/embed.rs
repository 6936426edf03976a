use super::error::BotError;
use crate::status::StatusSummary;
use chrono::{DateTime, Utc};
use twilight_model::channel::message::Embed;
use twilight_model::util::Timestamp;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, ImageSource};

const LIVE_COLOR: u32 = 0x9146FF;
const OFFLINE_COLOR: u32 = 0xCCCCCC;

/// The `/status` reply.
pub fn status_embed(summary: &StatusSummary, now: DateTime<Utc>) -> Result<Embed, BotError> {
    let timestamp =
        Timestamp::from_secs(now.timestamp()).map_err(|err| BotError::Embed(err.to_string()))?;

    let builder = match summary {
        StatusSummary::Live {
            channel,
            title,
            url,
            viewer_count,
            game,
            thumbnail_url,
        } => {
            let builder = EmbedBuilder::new()
                .title(format!("🔴 {channel} is Live!"))
                .description(title)
                .url(url)
                .color(LIVE_COLOR)
                .timestamp(timestamp)
                .field(EmbedFieldBuilder::new("Viewer Count", viewer_count.to_string()).inline())
                .field(EmbedFieldBuilder::new("Game", game).inline());

            if thumbnail_url.is_empty() {
                builder
            } else {
                let thumbnail = ImageSource::url(thumbnail_url)
                    .map_err(|err| BotError::Embed(err.to_string()))?;
                builder.thumbnail(thumbnail)
            }
        }
        StatusSummary::Offline { channel } => EmbedBuilder::new()
            .title(format!("{channel} is Offline"))
            .description("The stream is currently offline.")
            .color(OFFLINE_COLOR)
            .timestamp(timestamp),
    };

    Ok(builder
        .validate()
        .map_err(|err| BotError::Embed(err.to_string()))?
        .build())
}
