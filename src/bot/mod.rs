//! Discord command surface

pub mod commands;

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use crate::app::AppState;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, AppState, Error>;

/// Gateway intents needed for prefix commands
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Build the command framework around the shared state
pub fn framework(state: AppState) -> poise::Framework<AppState, Error> {
    let prefix = state.config.command_prefix.clone();

    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::analyze()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");
                Ok(state)
            })
        })
        .build()
}

/// Log command failures and tell the caller; everything else goes to poise
async fn on_error(error: poise::FrameworkError<'_, AppState, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                error = ?error,
                "Command failed"
            );
            if let Err(err) = ctx.say(commands::FAILURE_NOTICE).await {
                warn!(error = %err, "Failed to send failure notice");
            }
        }
        other => {
            if let Err(err) = poise::builtins::on_error(other).await {
                error!(error = %err, "Error while handling framework error");
            }
        }
    }
}
