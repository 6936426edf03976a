use super::embed::status_embed;
use super::error::BotError;
use super::interface::CommandContext;
use twilight_http::Client as HttpClient;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::{Interaction, InteractionData};
use twilight_model::http::interaction::{
    InteractionResponse, InteractionResponseData, InteractionResponseType,
};
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;
use twilight_util::builder::command::CommandBuilder;
use tracing::{debug, info};

pub const STATUS: &str = "status";
pub const CHECK_STREAMS: &str = "checkstreams";

/// The global slash commands the bot registers.
#[must_use]
pub fn definitions(channel: &str) -> Vec<Command> {
    vec![
        CommandBuilder::new(
            STATUS,
            format!("Check if {channel} is streaming or not"),
            CommandType::ChatInput,
        )
        .build(),
        CommandBuilder::new(
            CHECK_STREAMS,
            "Force check of stream status",
            CommandType::ChatInput,
        )
        .build(),
    ]
}

/// Answers one slash command interaction. Other interactions are ignored.
pub async fn handle(
    http: &HttpClient,
    application_id: Id<ApplicationMarker>,
    interaction: &Interaction,
    context: &CommandContext,
) -> Result<(), BotError> {
    let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
        debug!("Ignoring interaction {:?}", interaction.kind);
        return Ok(());
    };
    let client = http.interaction(application_id);
    info!("Received /{}", data.name);

    match data.name.as_str() {
        STATUS => {
            let embed = status_embed(&context.summary().await, chrono::Utc::now())?;
            client
                .create_response(
                    interaction.id,
                    &interaction.token,
                    &InteractionResponse {
                        kind: InteractionResponseType::ChannelMessageWithSource,
                        data: Some(InteractionResponseData {
                            embeds: Some(vec![embed]),
                            ..Default::default()
                        }),
                    },
                )
                .await?;
        }
        CHECK_STREAMS => {
            client
                .create_response(
                    interaction.id,
                    &interaction.token,
                    &InteractionResponse {
                        kind: InteractionResponseType::DeferredChannelMessageWithSource,
                        data: None,
                    },
                )
                .await?;

            let report = context.force_check_report().await;
            client
                .update_response(&interaction.token)
                .content(Some(report.as_str()))
                .await?;
        }
        other => {
            client
                .create_response(
                    interaction.id,
                    &interaction.token,
                    &InteractionResponse {
                        kind: InteractionResponseType::ChannelMessageWithSource,
                        data: Some(InteractionResponseData {
                            content: Some(format!("Unrecognized command: {other}")),
                            ..Default::default()
                        }),
                    },
                )
                .await?;
        }
    }

    Ok(())
}
