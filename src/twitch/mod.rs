//! Helix, Twitch's REST API: app access tokens and stream lookups.
pub mod client;
pub mod data;
pub mod error;

pub use client::{Helix, HelixAuth, HelixClient};
pub use data::{StreamInfo, TokenGrant};
pub use error::{HelixError, TwitchError};

pub const TWITCH_ID_URL: &str = "https://id.twitch.tv";
pub const TWITCH_API_URL: &str = "https://api.twitch.tv";
