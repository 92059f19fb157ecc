//! Team membership reconstructed from match metadata

use std::collections::HashMap;
use std::fmt;

use crate::pubg::models::Included;

/// Roster team number within one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Roster {
    team: Option<TeamId>,
    members: Vec<String>,
}

/// Name, participant and team lookups for one match
#[derive(Debug, Clone, Default)]
pub struct TeamIndex {
    participant_by_name: HashMap<String, String>,
    name_by_participant: HashMap<String, String>,
    team_by_participant: HashMap<String, TeamId>,
    rosters: Vec<Roster>,
}

impl TeamIndex {
    /// Build the index from a match's `included` array.
    ///
    /// Participants are indexed before rosters, so entry order does not matter.
    pub fn from_included(included: &[Included]) -> Self {
        let mut index = Self::default();

        for item in included {
            if let Included::Participant { id, attributes } = item {
                if let Some(name) = &attributes.stats.name {
                    index.participant_by_name.insert(name.clone(), id.clone());
                    index.name_by_participant.insert(id.clone(), name.clone());
                }
            }
        }

        for item in included {
            if let Included::Roster {
                attributes,
                relationships,
                ..
            } = item
            {
                let team = attributes.stats.team_id.map(TeamId);
                let members: Vec<String> = relationships
                    .participants
                    .data
                    .iter()
                    .map(|r| r.id.clone())
                    .collect();
                if let Some(team) = team {
                    for pid in &members {
                        index.team_by_participant.insert(pid.clone(), team);
                    }
                }
                index.rosters.push(Roster { team, members });
            }
        }

        index
    }

    pub fn participant_id(&self, name: &str) -> Option<&str> {
        self.participant_by_name.get(name).map(String::as_str)
    }

    pub fn participant_name(&self, participant_id: &str) -> Option<&str> {
        self.name_by_participant.get(participant_id).map(String::as_str)
    }

    /// Team of a player by display name, `None` when unresolvable
    pub fn team_of(&self, name: &str) -> Option<TeamId> {
        let pid = self.participant_id(name)?;
        self.team_by_participant.get(pid).copied()
    }

    /// The team whose roster lists `name`, else the team found through the
    /// player's participant ID.
    pub fn my_team(&self, name: &str) -> Option<TeamId> {
        self.rosters
            .iter()
            .find(|roster| {
                roster
                    .members
                    .iter()
                    .any(|pid| self.participant_name(pid) == Some(name))
            })
            .and_then(|roster| roster.team)
            .or_else(|| self.team_of(name))
    }
}
