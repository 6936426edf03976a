use clap::Parser;
use livewatch::options::Config;
use livewatch::{bot, clock, notify, poll, status, twitch};
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_cli(livewatch::cli::Cli::parse())?;

    let store = status::StatusStore::open(&config.status_file).await;
    let (force_sender, force_receiver) = mpsc::channel(1);

    let poller = poll::Poller::new(poll::PollerData {
        channel: config.channel.clone(),
        helix: twitch::HelixClient::new(twitch::HelixAuth {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }),
        notifier: notify::WebhookNotifier::new(
            config.webhook_url.clone(),
            config.options.notify.mention.clone(),
            config.options.thumbnail,
        ),
        clock: clock::SystemClock,
        store: store.clone(),
        cooldown: config.options.cooldown(),
        token_lifetime: config.options.token_lifetime(),
    });

    let bot = bot::Bot::new(bot::data::BotData {
        token: config.discord_token.clone(),
        commands: bot::interface::CommandContext {
            channel: config.channel.clone(),
            status: store.shared(),
            thumbnail: config.options.thumbnail,
            force_checks: force_sender,
        },
    })
    .await?;

    info!(
        "Checking {} every {}s",
        config.channel,
        config.check_interval.as_secs()
    );
    tokio::select! {
        () = poller.run(poll::IntervalTicker::new(config.check_interval), force_receiver) => Ok(()),
        result = bot.run() => Ok(result?),
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
