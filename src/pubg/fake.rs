//! In-memory `PubgApi` used by tests

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::client::{PubgApi, PubgError};
use super::models::{MatchDocument, RankedStatsDocument, Season};

/// Each map holds what the API would return; absent keys answer 404.
/// `seasons: None` answers a 500. Names in `unreachable` fail their player
/// lookup with a transport error.
#[derive(Default)]
pub struct FakePubg {
    pub players: HashMap<String, String>,
    pub recent: HashMap<String, Vec<String>>,
    pub matches: HashMap<String, MatchDocument>,
    pub telemetry: HashMap<String, Vec<Value>>,
    pub seasons: Option<Vec<Season>>,
    pub ranked: HashMap<(String, String), RankedStatsDocument>,
    pub unreachable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakePubg {
    fn log(&self, call: String) {
        self.calls.lock().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.count_calls("match_detail")
    }

    pub fn count_calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.split(' ').next() == Some(method))
            .count()
    }
}

#[async_trait]
impl PubgApi for FakePubg {
    async fn find_player_id(&self, name: &str) -> Result<String, PubgError> {
        self.log(format!("find_player_id {name}"));
        if self.unreachable.contains(name) {
            return Err(transport_error());
        }
        self.players.get(name).cloned().ok_or(PubgError::NotFound)
    }

    async fn recent_match_ids(&self, player_id: &str) -> Result<Vec<String>, PubgError> {
        self.log(format!("recent_match_ids {player_id}"));
        self.recent.get(player_id).cloned().ok_or(PubgError::NotFound)
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDocument, PubgError> {
        self.log(format!("match_detail {match_id}"));
        self.matches.get(match_id).cloned().ok_or(PubgError::NotFound)
    }

    async fn telemetry(&self, url: &str) -> Result<Vec<Value>, PubgError> {
        self.log(format!("telemetry {url}"));
        self.telemetry.get(url).cloned().ok_or(PubgError::NotFound)
    }

    async fn seasons(&self) -> Result<Vec<Season>, PubgError> {
        self.log("seasons".to_string());
        self.seasons.clone().ok_or(PubgError::Api {
            status: 500,
            body: "unavailable".to_string(),
        })
    }

    async fn ranked_stats(
        &self,
        account_id: &str,
        season_id: &str,
    ) -> Result<RankedStatsDocument, PubgError> {
        self.log(format!("ranked_stats {account_id} {season_id}"));
        self.ranked
            .get(&(account_id.to_string(), season_id.to_string()))
            .cloned()
            .ok_or(PubgError::NotFound)
    }
}

/// A real `reqwest` error, built without touching the network
pub fn transport_error() -> PubgError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    PubgError::Request(err)
}

pub fn match_without_telemetry() -> MatchDocument {
    match_document(None, &[])
}

pub fn match_with_telemetry(url: &str) -> MatchDocument {
    match_document(Some(url), &[])
}

/// Build a match document; `players` is `(participant_id, name, team_id)`
pub fn match_document(telemetry_url: Option<&str>, players: &[(&str, &str, i64)]) -> MatchDocument {
    let mut included = Vec::new();
    let mut teams: Vec<i64> = players.iter().map(|(_, _, team)| *team).collect();
    teams.dedup();

    for (pid, name, _) in players {
        included.push(json!({
            "type": "participant",
            "id": pid,
            "attributes": { "stats": { "name": name, "kills": 0 } }
        }));
    }
    for team_id in teams {
        let refs: Vec<Value> = players
            .iter()
            .filter(|(_, _, team)| *team == team_id)
            .map(|(pid, _, _)| json!({ "type": "participant", "id": pid }))
            .collect();
        included.push(json!({
            "type": "roster",
            "id": format!("roster-{team_id}"),
            "attributes": { "stats": { "rank": 1, "teamId": team_id } },
            "relationships": { "participants": { "data": refs } }
        }));
    }
    if let Some(url) = telemetry_url {
        included.push(json!({
            "type": "asset",
            "id": "asset-1",
            "attributes": { "name": "telemetry", "URL": url }
        }));
    }

    serde_json::from_value(json!({ "data": { "type": "match", "id": "m" }, "included": included }))
        .unwrap()
}

/// Wrap a `rankedGameModeStats` object in the full ranked envelope
pub fn ranked_document(modes: Value) -> RankedStatsDocument {
    serde_json::from_value(json!({
        "data": {
            "type": "rankedplayerstats",
            "attributes": { "rankedGameModeStats": modes }
        }
    }))
    .unwrap()
}

pub fn season_list(current: Option<&str>) -> Vec<Season> {
    let mut seasons = vec![json!({ "id": "season-old", "attributes": { "isCurrentSeason": false } })];
    if let Some(id) = current {
        seasons.push(json!({ "id": id, "attributes": { "isCurrentSeason": true } }));
    }
    serde_json::from_value(Value::Array(seasons)).unwrap()
}
