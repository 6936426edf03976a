use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the Helix "Get Streams" response.
///
/// Only the fields the bot reads are typed. Everything else Twitch sends is
/// kept in `extra` so the object can be written back to disk unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub user_login: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StreamsResponse {
    pub data: Vec<StreamInfo>,
}

/// The body of a successful client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Seconds until expiry, as reported by Twitch.
    #[serde(default)]
    pub expires_in: u64,
}

impl StreamInfo {
    #[must_use]
    pub fn channel_url(&self) -> String {
        format!("https://twitch.tv/{}", self.user_login)
    }

    /// The thumbnail URL with its `{width}` and `{height}` placeholders filled in.
    #[must_use]
    pub fn thumbnail(&self, width: u32, height: u32) -> String {
        self.thumbnail_url
            .as_deref()
            .map(|template| {
                template
                    .replace("{width}", &width.to_string())
                    .replace("{height}", &height.to_string())
            })
            .unwrap_or_default()
    }
}
