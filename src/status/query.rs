use super::StreamStatus;
use crate::options::ThumbnailSize;

/// What `/status` reports about the watched channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSummary {
    Live {
        channel: String,
        title: String,
        url: String,
        viewer_count: u64,
        game: String,
        thumbnail_url: String,
    },
    Offline {
        channel: String,
    },
}

impl StatusSummary {
    #[must_use]
    pub fn of(status: &StreamStatus, channel: &str, thumbnail: ThumbnailSize) -> Self {
        let Some(info) = status.get(channel) else {
            return StatusSummary::Offline {
                channel: String::from(channel),
            };
        };

        StatusSummary::Live {
            channel: String::from(channel),
            title: info
                .title
                .clone()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| String::from("No Title Provided")),
            url: info.channel_url(),
            viewer_count: info.viewer_count.unwrap_or(0),
            game: info
                .game_name
                .clone()
                .filter(|game| !game.trim().is_empty())
                .unwrap_or_else(|| String::from("Unknown Game")),
            thumbnail_url: info.thumbnail(thumbnail.width, thumbnail.height),
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, StatusSummary::Live { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twitch::StreamInfo;

    const SIZE: ThumbnailSize = ThumbnailSize {
        width: 1280,
        height: 720,
    };

    #[test]
    fn absent_channel_is_offline() {
        let summary = StatusSummary::of(&StreamStatus::default(), "pattybuilds", SIZE);
        assert_eq!(
            summary,
            StatusSummary::Offline {
                channel: String::from("pattybuilds")
            }
        );
        assert!(!summary.is_live());
    }

    #[test]
    fn present_channel_reports_stored_fields() {
        let info: StreamInfo = serde_json::from_value(serde_json::json!({
            "user_login": "pattybuilds",
            "user_name": "PattyBuilds",
            "title": "building a bot",
            "game_name": "Software and Game Development",
            "viewer_count": 42,
            "thumbnail_url": "https://cdn.example/live-{width}x{height}.jpg",
        }))
        .unwrap();
        let mut status = StreamStatus::default();
        status.insert("pattybuilds", info);

        assert_eq!(
            StatusSummary::of(&status, "pattybuilds", SIZE),
            StatusSummary::Live {
                channel: String::from("pattybuilds"),
                title: String::from("building a bot"),
                url: String::from("https://twitch.tv/pattybuilds"),
                viewer_count: 42,
                game: String::from("Software and Game Development"),
                thumbnail_url: String::from("https://cdn.example/live-1280x720.jpg"),
            }
        );
    }

    #[test]
    fn sparse_entry_uses_fallbacks() {
        let mut status = StreamStatus::default();
        status.insert(
            "pattybuilds",
            serde_json::from_str(r#"{"user_login": "pattybuilds", "game_name": ""}"#).unwrap(),
        );

        let StatusSummary::Live { title, viewer_count, game, thumbnail_url, .. } =
            StatusSummary::of(&status, "pattybuilds", SIZE)
        else {
            panic!("expected a live summary");
        };
        assert_eq!(title, "No Title Provided");
        assert_eq!(viewer_count, 0);
        assert_eq!(game, "Unknown Game");
        assert_eq!(thumbnail_url, "");
    }
}
