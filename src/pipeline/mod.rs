//! One analysis run: resolve, scan, dedup, analyse, enrich, report

use std::future::Future;

use tracing::{info, warn};

use crate::config::Config;
use crate::pubg::{resolve_player, scan_telemetry_matches, PubgApi, PubgError, TelemetryMatch};
use crate::report::build_report;
use crate::store::{AnalyzedMatchStore, ClaimGuard, MatchClaims};
use crate::telemetry::{hostile_kills, kill_events, HostileKill, TeamIndex};
use crate::util::time::Timer;

/// Only the newest match with telemetry is analysed
const MAX_MATCHES: usize = 1;

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    PlayerNotFound,
    NoTelemetryMatch,
    AlreadyAnalyzed { match_id: String },
    /// Another invocation is analysing the same match right now
    InProgress { match_id: String },
    TelemetryUnavailable { match_id: String },
    TeamNotFound { match_id: String },
    Report { match_id: String, text: String },
}

impl AnalysisOutcome {
    /// Chat message for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::PlayerNotFound => "❌ Could not find the player ID.".to_string(),
            Self::NoTelemetryMatch => "❌ No recent match with telemetry was found.".to_string(),
            Self::AlreadyAnalyzed { .. } => "✅ The latest match was already analyzed.".to_string(),
            Self::InProgress { .. } => "⏳ The latest match is being analyzed right now.".to_string(),
            Self::TelemetryUnavailable { .. } => {
                "❌ Could not download the match telemetry.".to_string()
            }
            Self::TeamNotFound { .. } => "❌ Could not find team information.".to_string(),
            Self::Report { text, .. } => text.clone(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::PlayerNotFound => "player_not_found",
            Self::NoTelemetryMatch => "no_telemetry_match",
            Self::AlreadyAnalyzed { .. } => "already_analyzed",
            Self::InProgress { .. } => "in_progress",
            Self::TelemetryUnavailable { .. } => "telemetry_unavailable",
            Self::TeamNotFound { .. } => "team_not_found",
            Self::Report { .. } => "report",
        }
    }
}

/// Result of analysing one match's telemetry
#[derive(Debug, Clone, PartialEq)]
pub enum MatchAnalysis {
    TelemetryUnavailable,
    TeamNotFound,
    Kills(Vec<HostileKill>),
}

/// Download a match's telemetry and metadata and find the team's hostile deaths
pub async fn analyze_match<A: PubgApi + ?Sized>(
    api: &A,
    target: &TelemetryMatch,
    player_name: &str,
) -> Result<MatchAnalysis, PubgError> {
    let events = match api.telemetry(&target.telemetry_url).await {
        Ok(events) => events,
        Err(err) if err.is_soft() => {
            warn!(match_id = %target.match_id, error = %err, "telemetry download failed");
            return Ok(MatchAnalysis::TelemetryUnavailable);
        }
        Err(err) => return Err(err),
    };

    let index = match api.match_detail(&target.match_id).await {
        Ok(detail) => TeamIndex::from_included(&detail.included),
        Err(err) if err.is_soft() => {
            warn!(match_id = %target.match_id, error = %err, "match metadata unavailable");
            TeamIndex::default()
        }
        Err(err) => return Err(err),
    };

    let Some(my_team) = index.my_team(player_name) else {
        return Ok(MatchAnalysis::TeamNotFound);
    };

    let kills = hostile_kills(&kill_events(&events), &index, my_team);
    info!(
        match_id = %target.match_id,
        team = %my_team,
        events = events.len(),
        hostile_kills = kills.len(),
        "telemetry analyzed"
    );
    Ok(MatchAnalysis::Kills(kills))
}

/// Run the full command pipeline once and deliver its message through `send`.
///
/// A report is recorded in the dedup store only after `send` succeeds, and
/// the match claim is held until then.
pub async fn run_analysis<A, S, F>(
    api: &A,
    store: &AnalyzedMatchStore,
    claims: &MatchClaims,
    config: &Config,
    send: S,
) -> anyhow::Result<AnalysisOutcome>
where
    A: PubgApi + ?Sized,
    S: FnOnce(String) -> F,
    F: Future<Output = anyhow::Result<()>>,
{
    let timer = Timer::new();
    let (outcome, _claim) = run_steps(api, store, claims, config).await?;

    send(outcome.message()).await?;
    if let AnalysisOutcome::Report { match_id, .. } = &outcome {
        store.record(match_id)?;
    }

    info!(
        outcome = outcome.label(),
        elapsed_ms = timer.elapsed_ms(),
        "analysis finished"
    );
    Ok(outcome)
}

async fn run_steps<A: PubgApi + ?Sized>(
    api: &A,
    store: &AnalyzedMatchStore,
    claims: &MatchClaims,
    config: &Config,
) -> anyhow::Result<(AnalysisOutcome, Option<ClaimGuard>)> {
    let player = config.player_name.as_str();

    let Some(player_id) = resolve_player(api, player).await? else {
        return Ok((AnalysisOutcome::PlayerNotFound, None));
    };

    let matches =
        scan_telemetry_matches(api, &player_id, MAX_MATCHES, config.match_scan_limit).await?;
    let Some(target) = matches.into_iter().next() else {
        return Ok((AnalysisOutcome::NoTelemetryMatch, None));
    };
    let match_id = target.match_id.clone();

    if store.contains(&match_id)? {
        return Ok((AnalysisOutcome::AlreadyAnalyzed { match_id }, None));
    }
    let Some(claim) = claims.try_claim(&match_id) else {
        return Ok((AnalysisOutcome::InProgress { match_id }, None));
    };
    // a concurrent run may have finished between the check and the claim
    if store.contains(&match_id)? {
        return Ok((AnalysisOutcome::AlreadyAnalyzed { match_id }, None));
    }

    let kills = match analyze_match(api, &target, player).await? {
        MatchAnalysis::TelemetryUnavailable => {
            return Ok((AnalysisOutcome::TelemetryUnavailable { match_id }, None))
        }
        MatchAnalysis::TeamNotFound => {
            return Ok((AnalysisOutcome::TeamNotFound { match_id }, None))
        }
        MatchAnalysis::Kills(kills) => kills,
    };

    let text = build_report(api, &match_id, &kills, player).await;
    Ok((AnalysisOutcome::Report { match_id, text }, Some(claim)))
}
