//! PUBG REST API client

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{
    MatchDocument, PlayerDocument, PlayerList, RankedStatsDocument, Season, SeasonList,
};
use crate::config::Config;
use crate::util::rate_limit::ApiThrottle;

const JSON_API: &str = "application/vnd.api+json";

/// Endpoints of the stats API the bot consumes.
///
/// Every method maps a non-success status, an undecodable body or a missing
/// key to a soft [`PubgError`]; only transport failures are hard.
#[async_trait]
pub trait PubgApi: Send + Sync {
    /// Resolve a display name to an account ID (first result wins)
    async fn find_player_id(&self, name: &str) -> Result<String, PubgError>;

    /// Recent match IDs for an account, newest first
    async fn recent_match_ids(&self, player_id: &str) -> Result<Vec<String>, PubgError>;

    async fn match_detail(&self, match_id: &str) -> Result<MatchDocument, PubgError>;

    /// Download a telemetry event array
    async fn telemetry(&self, url: &str) -> Result<Vec<Value>, PubgError>;

    async fn seasons(&self) -> Result<Vec<Season>, PubgError>;

    async fn ranked_stats(
        &self,
        account_id: &str,
        season_id: &str,
    ) -> Result<RankedStatsDocument, PubgError>;
}

/// Authenticated client bound to one platform shard
#[derive(Clone)]
pub struct PubgClient {
    client: Client,
    base_url: String,
    platform: String,
    api_token: String,
    throttle: ApiThrottle,
}

impl PubgClient {
    pub fn new(config: &Config) -> Result<Self, PubgError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .gzip(true)
            .build()
            .map_err(PubgError::Request)?;

        Ok(Self {
            client,
            base_url: config.pubg_api_base_url.clone(),
            platform: config.platform.clone(),
            api_token: config.pubg_api_token.clone(),
            throttle: ApiThrottle::per_minute(config.requests_per_minute),
        })
    }

    /// Get the URL of a shard-scoped endpoint
    fn shard_url(&self, path: &str) -> String {
        format!("{}/shards/{}/{}", self.base_url, self.platform, path)
    }

    /// Make an authenticated GET request against the shard
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PubgError> {
        self.throttle.acquire().await;

        let url = self.shard_url(path);
        debug!(%url, "PUBG API request");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(header::ACCEPT, JSON_API)
            .send()
            .await
            .map_err(PubgError::Request)?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PubgError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(PubgError::NotFound);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "PUBG API returned an error status");
        return Err(PubgError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(PubgError::Parse)
}

#[async_trait]
impl PubgApi for PubgClient {
    async fn find_player_id(&self, name: &str) -> Result<String, PubgError> {
        let players: PlayerList = self
            .get(&format!("players?filter[playerNames]={}", name))
            .await?;

        players
            .data
            .into_iter()
            .next()
            .map(|player| player.id)
            .ok_or(PubgError::NotFound)
    }

    async fn recent_match_ids(&self, player_id: &str) -> Result<Vec<String>, PubgError> {
        let player: PlayerDocument = self.get(&format!("players/{}", player_id)).await?;
        player
            .data
            .match_ids()
            .ok_or(PubgError::Malformed("data.relationships.matches"))
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDocument, PubgError> {
        self.get(&format!("matches/{}", match_id)).await
    }

    async fn telemetry(&self, url: &str) -> Result<Vec<Value>, PubgError> {
        // Telemetry lives on a public CDN and takes no bearer token
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, JSON_API)
            .send()
            .await
            .map_err(PubgError::Request)?;

        decode(response).await
    }

    async fn seasons(&self) -> Result<Vec<Season>, PubgError> {
        let seasons: SeasonList = self.get("seasons").await?;
        Ok(seasons.data)
    }

    async fn ranked_stats(
        &self,
        account_id: &str,
        season_id: &str,
    ) -> Result<RankedStatsDocument, PubgError> {
        self.get(&format!("players/{}/seasons/{}/ranked", account_id, season_id))
            .await
    }
}

/// PUBG API errors
#[derive(Debug, thiserror::Error)]
pub enum PubgError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[source] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Response is missing {0}")]
    Malformed(&'static str),
}

impl PubgError {
    /// Soft failures degrade to "not found"; hard ones abort the invocation
    pub fn is_soft(&self) -> bool {
        !matches!(self, PubgError::Request(_))
    }
}
