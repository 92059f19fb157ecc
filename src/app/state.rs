//! Application state shared across command invocations

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::pubg::PubgClient;
use crate::store::{AnalyzedMatchStore, MatchClaims};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pubg: PubgClient,
    pub analyzed: Arc<AnalyzedMatchStore>,
    pub claims: MatchClaims,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        // Initialize PUBG API client
        let pubg = PubgClient::new(&config)?;

        // Open the dedup store and create its schema on first run
        let analyzed = AnalyzedMatchStore::open(Path::new(&config.database_path))?;
        analyzed.migrate()?;

        Ok(Self {
            config,
            pubg,
            analyzed: Arc::new(analyzed),
            claims: MatchClaims::new(),
        })
    }
}
