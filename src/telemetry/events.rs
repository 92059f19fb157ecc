//! Kill events from the telemetry log

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub const LOG_PLAYER_KILL: &str = "LogPlayerKill";
pub const LOG_PLAYER_KILL_V2: &str = "LogPlayerKillV2";

const UNKNOWN: &str = "Unknown";

/// A kill normalized across both telemetry schemas
#[derive(Debug, Clone, PartialEq)]
pub struct KillEvent {
    /// Absent for environmental deaths
    pub killer: Option<String>,
    pub victim: Option<String>,
    pub damage_category: String,
    pub cause: String,
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
struct Character {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DamageInfo {
    damage_type_category: Option<String>,
    damage_causer_name: Option<String>,
    distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKill {
    killer: Option<Character>,
    victim: Option<Character>,
    /// V2 nests cause details here
    killer_damage_info: Option<DamageInfo>,
    #[serde(flatten)]
    legacy: DamageInfo,
}

fn event_type(event: &Value) -> Option<&str> {
    event.get("_T").and_then(Value::as_str)
}

pub fn is_kill_event(event: &Value) -> bool {
    matches!(event_type(event), Some(LOG_PLAYER_KILL | LOG_PLAYER_KILL_V2))
}

impl KillEvent {
    /// Normalize one kill event, preferring V2's nested fields when present
    pub fn from_value(event: &Value) -> Result<Self, serde_json::Error> {
        let raw = RawKill::deserialize(event)?;
        let nested = raw.killer_damage_info.unwrap_or_default();

        Ok(Self {
            killer: raw.killer.and_then(|c| c.name),
            victim: raw.victim.and_then(|c| c.name),
            damage_category: nested
                .damage_type_category
                .or(raw.legacy.damage_type_category)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            cause: nested
                .damage_causer_name
                .or(raw.legacy.damage_causer_name)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            distance: nested.distance.or(raw.legacy.distance).unwrap_or(0.0),
        })
    }
}

/// Extract kill events in log order; malformed kill events are skipped
pub fn kill_events(events: &[Value]) -> Vec<KillEvent> {
    events
        .iter()
        .filter(|event| is_kill_event(event))
        .filter_map(|event| match KillEvent::from_value(event) {
            Ok(kill) => Some(kill),
            Err(err) => {
                warn!(error = %err, "skipping malformed kill event");
                None
            }
        })
        .collect()
}
