//! Ranked season statistics

use tracing::warn;

use super::client::{PubgApi, PubgError};
use super::models::{RankedModeStats, RankedStatsDocument, Season};

/// Season ID used when no season is flagged as current
pub const LIFETIME_SEASON: &str = "lifetime";

/// Game-mode bucket the report reads
pub const ALL_MODES: &str = "All";

/// Ranked standing of one player for one season
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSnapshot {
    /// "<tier> <subTier>", or just the tier
    pub tier: String,
    /// Damage dealt per round played
    pub avg_damage: f64,
}

/// Pick the season flagged as current, falling back to lifetime stats
pub fn select_current_season(seasons: &[Season]) -> String {
    seasons
        .iter()
        .find(|season| season.attributes.is_current_season)
        .map(|season| season.id.clone())
        .unwrap_or_else(|| LIFETIME_SEASON.to_string())
}

/// Resolve the current season ID; any soft failure also means lifetime
pub async fn current_season_id<A: PubgApi + ?Sized>(api: &A) -> Result<String, PubgError> {
    match api.seasons().await {
        Ok(seasons) => Ok(select_current_season(&seasons)),
        Err(err) if err.is_soft() => {
            warn!(error = %err, "season lookup failed, using lifetime stats");
            Ok(LIFETIME_SEASON.to_string())
        }
        Err(err) => Err(err),
    }
}

pub fn average_damage(damage_dealt: f64, rounds_played: u64) -> f64 {
    if rounds_played == 0 {
        0.0
    } else {
        damage_dealt / rounds_played as f64
    }
}

fn tier_label(stats: &RankedModeStats) -> String {
    let tier = stats.current_tier.as_ref();
    let name = tier
        .and_then(|t| t.tier.as_deref())
        .unwrap_or("Unknown");

    match tier.and_then(|t| t.sub_tier.as_deref()) {
        Some(sub) if !sub.is_empty() => format!("{} {}", name, sub),
        _ => name.to_string(),
    }
}

/// Build a snapshot from the "All" bucket, which must be present
pub fn snapshot_from_document(doc: &RankedStatsDocument) -> Option<RankedSnapshot> {
    let all = doc.data.attributes.ranked_game_mode_stats.get(ALL_MODES)?;
    Some(RankedSnapshot {
        tier: tier_label(all),
        avg_damage: average_damage(all.damage_dealt, all.rounds_played),
    })
}

/// Look up a player's ranked snapshot by display name.
///
/// The name is resolved again on every call. Soft failures yield `Ok(None)`.
pub async fn ranked_snapshot<A: PubgApi + ?Sized>(
    api: &A,
    name: &str,
    season_id: &str,
) -> Result<Option<RankedSnapshot>, PubgError> {
    let account_id = match api.find_player_id(name).await {
        Ok(id) => id,
        Err(err) if err.is_soft() => {
            warn!(player = name, error = %err, "ranked lookup: player not found");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    match api.ranked_stats(&account_id, season_id).await {
        Ok(doc) => Ok(snapshot_from_document(&doc)),
        Err(err) if err.is_soft() => {
            warn!(player = name, season_id, error = %err, "ranked stats unavailable");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
