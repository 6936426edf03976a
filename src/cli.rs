use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "livewatch")]
#[command(author, version)]
#[command(about = "Announces on Discord when a Twitch channel goes live.")]
pub struct Cli {
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,
    #[arg(short = 'w', long = "webhook-url", env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,
    #[arg(short = 'i', long = "client-id", env = "TWITCH_CLIENT_ID")]
    pub client_id: Option<String>,
    #[arg(short = 's', long = "client-secret", env = "TWITCH_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    #[arg(short = 'c', long, env = "TWITCH_CHANNEL")]
    pub channel: Option<String>,
    /// Seconds between two status checks.
    #[arg(long = "check-interval", env = "CHECK_INTERVAL", default_value_t = 60)]
    pub check_interval: u64,
    #[arg(long = "status-file", env = "STATUS_FILE", default_value = "stream_status.json")]
    pub status_file: PathBuf,
    #[arg(short = 'o', long = "options-file", env = "LIVEWATCH_OPTIONS")]
    pub options_file: Option<PathBuf>,
}
