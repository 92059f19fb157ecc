//! Chat commands

use tracing::info;

use super::{Context, Error};
use crate::pipeline::run_analysis;

pub const PROGRESS_NOTICE: &str = "🔄 Analyzing the latest PUBG match...";
pub const FAILURE_NOTICE: &str = "❌ Analysis failed, please try again later.";

/// Report which opponents killed your squad in the latest match
#[poise::command(prefix_command, rename = "분석", aliases("analyze"))]
pub async fn analyze(ctx: Context<'_>) -> Result<(), Error> {
    let state = ctx.data();
    info!(
        author = %ctx.author().name,
        player = %state.config.player_name,
        "Analysis requested"
    );

    ctx.say(PROGRESS_NOTICE).await?;

    run_analysis(
        &state.pubg,
        &state.analyzed,
        &state.claims,
        &state.config,
        |text| async move {
            ctx.say(text).await?;
            Ok::<_, Error>(())
        },
    )
    .await?;

    Ok(())
}
