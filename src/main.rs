//! PUBG team-kill bot
//!
//! Discord bot that looks up the tracked player's latest PUBG match with
//! telemetry and reports which opponents killed members of their squad,
//! along with each killer's ranked tier and average damage.

mod app;
mod bot;
mod config;
mod pipeline;
mod pubg;
mod report;
mod store;
mod telemetry;
mod util;

use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::AppState;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting PUBG team-kill bot");
    info!(platform = %config.platform, player = %config.player_name, "Tracking player");

    let token = config.discord_token.clone();

    // Create application state (opens the dedup store)
    let state = AppState::new(config)?;
    info!(
        database = %state.config.database_path,
        analyzed_matches = state.analyzed.count()?,
        "Dedup store ready"
    );

    let mut client = serenity::ClientBuilder::new(token, bot::intents())
        .framework(bot::framework(state))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shard_manager.shutdown_all().await;
    });

    client.start().await?;

    info!("Bot shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    // A handler that cannot be installed never fires; the other one still can.
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
