//! In-flight analysis claims

use std::sync::Arc;

use dashmap::DashSet;

/// Match IDs currently being analysed by some command invocation.
///
/// Guards the check / analyse / record sequence against concurrent runs
/// for the same match.
#[derive(Clone, Default)]
pub struct MatchClaims {
    active: Arc<DashSet<String>>,
}

impl MatchClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a match, or `None` if another invocation holds it
    pub fn try_claim(&self, match_id: &str) -> Option<ClaimGuard> {
        if self.active.insert(match_id.to_string()) {
            Some(ClaimGuard {
                active: self.active.clone(),
                match_id: match_id.to_string(),
            })
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn is_claimed(&self, match_id: &str) -> bool {
        self.active.contains(match_id)
    }
}

/// Releases the claim on drop
pub struct ClaimGuard {
    active: Arc<DashSet<String>>,
    match_id: String,
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        self.active.remove(&self.match_id);
    }
}
