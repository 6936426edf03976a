use crate::cli::Cli;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables read from the optional TOML options file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Options {
    pub notify: Notify,
    pub thumbnail: ThumbnailSize,
    pub auth: Auth,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Notify {
    /// Minimum time between two webhook notifications.
    pub cooldown_minutes: u64,
    /// Appended to the notification text, e.g. a role ping.
    pub mention: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Auth {
    /// Upper bound on how long an app access token is trusted.
    pub token_lifetime_hours: u64,
}

impl Options {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| ConfigError::OptionsIO(path.into(), err))?;
        toml::from_str(&contents).map_err(|err| ConfigError::OptionsParse(path.into(), err))
    }

    #[must_use]
    pub fn cooldown(&self) -> chrono::Duration {
        i64::try_from(self.notify.cooldown_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or(chrono::Duration::MAX)
    }

    #[must_use]
    pub fn token_lifetime(&self) -> chrono::Duration {
        i64::try_from(self.auth.token_lifetime_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            notify: Notify::default(),
            thumbnail: ThumbnailSize::default(),
            auth: Auth::default(),
        }
    }
}
impl Default for Notify {
    fn default() -> Self {
        Self {
            cooldown_minutes: 180,
            mention: String::from("@everyone"),
        }
    }
}
impl Default for ThumbnailSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
impl Default for Auth {
    fn default() -> Self {
        Self {
            token_lifetime_hours: 24,
        }
    }
}

/// Everything the process needs to start, validated.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub webhook_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Twitch login of the watched channel, lowercased.
    pub channel: String,
    pub check_interval: Duration,
    pub status_file: PathBuf,
    pub options: Options,
}

#[derive(Debug)]
pub enum ConfigError {
    /// Names of the required settings that were absent or empty.
    Missing(Vec<&'static str>),
    ZeroInterval,
    OptionsIO(PathBuf, std::io::Error),
    OptionsParse(PathBuf, toml::de::Error),
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
            match value.map(|value| value.trim().to_owned()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        let mut missing = Vec::new();
        let discord_token = required(cli.discord_token, "DISCORD_TOKEN", &mut missing);
        let channel = required(cli.channel, "TWITCH_CHANNEL", &mut missing);
        let client_id = required(cli.client_id, "TWITCH_CLIENT_ID", &mut missing);
        let client_secret = required(cli.client_secret, "TWITCH_CLIENT_SECRET", &mut missing);
        let webhook_url = required(cli.webhook_url, "DISCORD_WEBHOOK_URL", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        if cli.check_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let options = match &cli.options_file {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };

        Ok(Self {
            discord_token,
            webhook_url,
            client_id,
            client_secret,
            channel: channel.to_lowercase(),
            check_interval: Duration::from_secs(cli.check_interval),
            status_file: cli.status_file,
            options,
        })
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(names) => f.write_fmt(format_args!(
                "Missing required environment variables: {}. Required: DISCORD_TOKEN, TWITCH_CHANNEL, TWITCH_CLIENT_ID, TWITCH_CLIENT_SECRET, DISCORD_WEBHOOK_URL. Optional: CHECK_INTERVAL (seconds)",
                names.join(", ")
            )),
            ConfigError::ZeroInterval => f.write_str("CHECK_INTERVAL must be at least 1 second"),
            ConfigError::OptionsIO(path, err) => f.write_fmt(format_args!(
                "Error reading the options file {}: {err}",
                path.display()
            )),
            ConfigError::OptionsParse(path, err) => f.write_fmt(format_args!(
                "Error parsing the options file {}: {err}",
                path.display()
            )),
        }
    }
}
impl std::error::Error for ConfigError {}
