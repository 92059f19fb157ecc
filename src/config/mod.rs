//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Discord bot token
    pub discord_token: String,
    /// Prefix for text commands
    pub command_prefix: String,

    /// PUBG API bearer token
    pub pubg_api_token: String,
    /// PUBG API base URL
    pub pubg_api_base_url: String,
    /// Platform shard (kakao, steam, ...)
    pub platform: String,
    /// Display name of the tracked player
    pub player_name: String,
    /// Client-side request budget, 0 disables throttling
    pub requests_per_minute: u32,
    pub http_timeout: Duration,
    /// How many recent matches to scan for telemetry
    pub match_scan_limit: usize,

    /// SQLite file holding analyzed match IDs
    pub database_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            log_level: or_default("LOG_LEVEL", "info"),

            discord_token: required("DISCORD_BOT_TOKEN")?,
            command_prefix: or_default("COMMAND_PREFIX", "!"),

            pubg_api_token: required("PUBG_API_TOKEN")?,
            pubg_api_base_url: or_default("PUBG_API_BASE_URL", "https://api.pubg.com")
                .trim_end_matches('/')
                .to_string(),
            platform: or_default("PUBG_PLATFORM", "kakao"),
            player_name: required("PUBG_PLAYER_NAME")?,
            requests_per_minute: parse_or(&lookup, "PUBG_REQUESTS_PER_MINUTE", 10)?,
            http_timeout: Duration::from_secs(parse_or(&lookup, "PUBG_HTTP_TIMEOUT_SECS", 30)?),
            match_scan_limit: parse_or(&lookup, "MATCH_SCAN_LIMIT", 10)?,

            database_path: or_default("DATABASE_PATH", "matches.db"),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        log_level: "debug".to_string(),
        discord_token: "discord".to_string(),
        command_prefix: "!".to_string(),
        pubg_api_token: "pubg".to_string(),
        pubg_api_base_url: "http://localhost".to_string(),
        platform: "kakao".to_string(),
        player_name: "MNMNMNNNMN".to_string(),
        requests_per_minute: 0,
        http_timeout: Duration::from_secs(5),
        match_scan_limit: 10,
        database_path: ":memory:".to_string(),
    }
}
