//! Filtering kills suffered by the tracked player's team

use super::events::KillEvent;
use super::teams::{TeamId, TeamIndex};

/// A teammate's death at the hands of an opponent
#[derive(Debug, Clone, PartialEq)]
pub struct HostileKill {
    pub killer: String,
    pub victim: String,
    pub damage_category: String,
    pub cause: String,
    pub distance: f64,
}

/// Select kills whose victim is on `my_team` and whose killer is not.
///
/// An unresolved team never equals `my_team`: unresolved victims are dropped
/// while unresolved killers count as hostile.
pub fn hostile_kills(events: &[KillEvent], index: &TeamIndex, my_team: TeamId) -> Vec<HostileKill> {
    events
        .iter()
        .filter_map(|event| {
            let killer = event.killer.as_deref()?;
            let victim = event.victim.as_deref()?;
            if killer.is_empty() || victim.is_empty() {
                return None;
            }

            let killer_team = index.team_of(killer);
            let victim_team = index.team_of(victim);
            if victim_team != Some(my_team) || killer_team == Some(my_team) {
                return None;
            }

            Some(HostileKill {
                killer: killer.to_string(),
                victim: victim.to_string(),
                damage_category: event.damage_category.clone(),
                cause: event.cause.clone(),
                distance: event.distance,
            })
        })
        .collect()
}
