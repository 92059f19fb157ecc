//! PUBG API integration

pub mod client;
pub mod models;
pub mod players;
pub mod ranked;

#[cfg(test)]
pub mod fake;

pub use client::{PubgApi, PubgClient, PubgError};
pub use players::{resolve_player, scan_telemetry_matches, TelemetryMatch};
pub use ranked::{current_season_id, ranked_snapshot, RankedSnapshot, LIFETIME_SEASON};
