//! Player resolution and telemetry match scanning

use tracing::{debug, warn};

use super::client::{PubgApi, PubgError};

/// A match that has a downloadable telemetry asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryMatch {
    pub match_id: String,
    pub telemetry_url: String,
}

/// Resolve a display name to a player ID.
///
/// Soft failures collapse to `Ok(None)`.
pub async fn resolve_player<A: PubgApi + ?Sized>(
    api: &A,
    name: &str,
) -> Result<Option<String>, PubgError> {
    match api.find_player_id(name).await {
        Ok(id) => Ok(Some(id)),
        Err(err) if err.is_soft() => {
            warn!(player = name, error = %err, "player lookup failed");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Probe the player's most recent matches, in API order, for telemetry.
///
/// At most `scan_limit` matches are inspected and scanning stops once `max`
/// qualifying matches were found. A malformed match list yields an empty result.
pub async fn scan_telemetry_matches<A: PubgApi + ?Sized>(
    api: &A,
    player_id: &str,
    max: usize,
    scan_limit: usize,
) -> Result<Vec<TelemetryMatch>, PubgError> {
    let match_ids = match api.recent_match_ids(player_id).await {
        Ok(ids) => ids,
        Err(err) if err.is_soft() => {
            warn!(player_id, error = %err, "recent match lookup failed");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    let mut found = Vec::new();
    if max == 0 {
        return Ok(found);
    }

    for match_id in match_ids.into_iter().take(scan_limit) {
        let detail = match api.match_detail(&match_id).await {
            Ok(detail) => detail,
            Err(err) if err.is_soft() => {
                warn!(%match_id, error = %err, "skipping match with unreadable detail");
                continue;
            }
            Err(err) => return Err(err),
        };

        let Some(url) = detail.telemetry_url() else {
            debug!(%match_id, "no telemetry asset");
            continue;
        };

        found.push(TelemetryMatch {
            telemetry_url: url.to_string(),
            match_id,
        });
        if found.len() >= max {
            break;
        }
    }

    Ok(found)
}
