//! JSON:API envelopes returned by the PUBG API

use std::collections::HashMap;

use serde::Deserialize;

/// Reference to another resource (`{"type": "...", "id": "..."}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefList {
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

/// `GET /shards/{platform}/players?filter[playerNames]=...`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerList {
    pub data: Vec<PlayerResource>,
}

/// `GET /shards/{platform}/players/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDocument {
    pub data: PlayerResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResource {
    pub id: String,
    #[serde(default)]
    pub relationships: Option<PlayerRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRelationships {
    pub matches: Option<RefList>,
}

impl PlayerResource {
    /// Recent match IDs in API order, or `None` when the relationship is absent
    pub fn match_ids(&self) -> Option<Vec<String>> {
        let matches = self.relationships.as_ref()?.matches.as_ref()?;
        Some(matches.data.iter().map(|m| m.id.clone()).collect())
    }
}

/// `GET /shards/{platform}/matches/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDocument {
    #[serde(default)]
    pub included: Vec<Included>,
}

/// Entries of a match's `included` array
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Included {
    Participant {
        id: String,
        attributes: ParticipantAttributes,
    },
    Roster {
        attributes: RosterAttributes,
        relationships: RosterRelationships,
    },
    Asset {
        attributes: AssetAttributes,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantAttributes {
    pub stats: ParticipantStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantStats {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterAttributes {
    pub stats: RosterStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterRelationships {
    pub participants: RefList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetAttributes {
    pub name: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

impl MatchDocument {
    /// URL of the first asset named "telemetry", if any
    pub fn telemetry_url(&self) -> Option<&str> {
        self.included.iter().find_map(|item| match item {
            Included::Asset { attributes, .. } if attributes.name.as_deref() == Some("telemetry") => {
                attributes.url.as_deref()
            }
            _ => None,
        })
    }
}

/// `GET /shards/{platform}/seasons`
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonList {
    #[serde(default)]
    pub data: Vec<Season>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub id: String,
    #[serde(default)]
    pub attributes: SeasonAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAttributes {
    #[serde(default)]
    pub is_current_season: bool,
}

/// `GET /shards/{platform}/players/{id}/seasons/{season}/ranked`
#[derive(Debug, Clone, Deserialize)]
pub struct RankedStatsDocument {
    pub data: RankedStatsResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankedStatsResource {
    pub attributes: RankedStatsAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStatsAttributes {
    pub ranked_game_mode_stats: HashMap<String, RankedModeStats>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedModeStats {
    pub current_tier: Option<RankedTier>,
    #[serde(default)]
    pub damage_dealt: f64,
    #[serde(default)]
    pub rounds_played: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTier {
    pub tier: Option<String>,
    pub sub_tier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_document_ignores_unknown_included_types() {
        let doc: MatchDocument = serde_json::from_value(json!({
            "data": { "type": "match", "id": "m1" },
            "included": [
                { "type": "participant", "id": "p1", "attributes": { "stats": { "name": "Me", "kills": 2 } } },
                { "type": "roster", "id": "r1",
                  "attributes": { "stats": { "rank": 3, "teamId": 7 }, "won": "false" },
                  "relationships": { "participants": { "data": [ { "type": "participant", "id": "p1" } ] } } },
                { "type": "asset", "id": "a1", "attributes": { "name": "telemetry", "URL": "https://cdn/t.json" } },
                { "type": "something-new", "id": "x" }
            ]
        }))
        .unwrap();

        assert_eq!(doc.included.len(), 4);
        assert!(matches!(doc.included[3], Included::Other));
        assert_eq!(doc.telemetry_url(), Some("https://cdn/t.json"));
    }

    #[test]
    fn telemetry_url_takes_first_matching_asset() {
        let doc: MatchDocument = serde_json::from_value(json!({
            "included": [
                { "type": "asset", "id": "a0", "attributes": { "name": "replay", "URL": "https://cdn/r" } },
                { "type": "asset", "id": "a1", "attributes": { "name": "telemetry", "URL": "https://cdn/first" } },
                { "type": "asset", "id": "a2", "attributes": { "name": "telemetry", "URL": "https://cdn/second" } }
            ]
        }))
        .unwrap();

        assert_eq!(doc.telemetry_url(), Some("https://cdn/first"));
    }

    #[test]
    fn player_without_match_relationship_has_no_ids() {
        let doc: PlayerDocument =
            serde_json::from_value(json!({ "data": { "type": "player", "id": "account.1" } })).unwrap();
        assert!(doc.data.match_ids().is_none());
    }
}
