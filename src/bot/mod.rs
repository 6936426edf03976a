//! The Discord side: a gateway shard that answers slash commands.
use std::sync::Arc;
use tracing::{error, info, warn};
use twilight_gateway::{Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::Client as HttpClient;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;

pub mod commands;
pub mod data;
pub mod embed;
pub mod error;
pub mod interface;

use error::BotError;

pub struct Bot {
    http: Arc<HttpClient>,
    shard: Shard,
    application_id: Id<ApplicationMarker>,
    commands: interface::CommandContext,
}

impl Bot {
    /// Looks up the bot's application and registers its slash commands.
    pub async fn new(data: data::BotData) -> Result<Self, BotError> {
        let http = Arc::new(HttpClient::new(data.token.clone()));
        let application_id = http.current_user_application().await?.model().await?.id;

        http.interaction(application_id)
            .set_global_commands(&commands::definitions(&data.commands.channel))
            .await?;
        info!("Registered slash commands for application {application_id}");

        Ok(Self {
            http,
            shard: Shard::new(ShardId::ONE, data.token, Intents::empty()),
            application_id,
            commands: data.commands,
        })
    }

    /// Answers interactions until the gateway connection ends for good.
    pub async fn run(mut self) -> Result<(), BotError> {
        let wanted = EventTypeFlags::READY | EventTypeFlags::INTERACTION_CREATE;

        while let Some(item) = self.shard.next_event(wanted).await {
            match item {
                Ok(Event::Ready(ready)) => info!("Bot started as {}", ready.user.name),
                Ok(Event::InteractionCreate(interaction)) => {
                    let http = self.http.clone();
                    let application_id = self.application_id;
                    let commands = self.commands.clone();
                    tokio::spawn(async move {
                        if let Err(err) =
                            commands::handle(&http, application_id, &interaction.0, &commands)
                                .await
                        {
                            error!("{err}");
                        }
                    });
                }
                Ok(_) => (),
                Err(err) => warn!("Error receiving a gateway event: {err}"),
            }
        }

        warn!("Gateway connection closed");
        Ok(())
    }
}
