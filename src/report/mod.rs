//! Rendering the analysis as a chat message

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::pubg::{current_season_id, ranked_snapshot, PubgApi, RankedSnapshot, LIFETIME_SEASON};
use crate::telemetry::HostileKill;

/// Sent instead of an empty report
pub const NO_RESULTS: &str = "🔍 No results.";

pub fn header(match_id: &str) -> String {
    format!("📊 **Match {} - team deaths to opponents**\n", match_id)
}

pub fn kill_line(kill: &HostileKill) -> String {
    format!(
        "- 💀 `{}` ▶ `{}` ({}, {}, {:.1}m)",
        kill.killer, kill.victim, kill.damage_category, kill.cause, kill.distance
    )
}

pub fn stats_line(killer: &str, snapshot: Option<&RankedSnapshot>) -> String {
    match snapshot {
        Some(stats) => format!(
            "   ↪ {} - tier: **{}**, avg damage: `{:.1}`",
            killer, stats.tier, stats.avg_damage
        ),
        None => format!("   ↪ {} - stats unavailable", killer),
    }
}

/// Join report lines into one message
pub fn render(lines: &[String]) -> String {
    lines.join("\n")
}

/// Build the report for a match's hostile kills.
///
/// Each distinct killer gets one stats line, right after their first kill.
/// A failed stats lookup, transport errors included, is noted inline and
/// does not abort the report. The current season is resolved on the first
/// lookup and reused for the rest of the report.
pub async fn build_report<A: PubgApi + ?Sized>(
    api: &A,
    match_id: &str,
    kills: &[HostileKill],
    player_name: &str,
) -> String {
    if kills.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut lines = vec![header(match_id)];
    let mut enriched: HashSet<&str> = HashSet::new();
    let mut season_id: Option<String> = None;

    for kill in kills {
        lines.push(kill_line(kill));

        if kill.killer == player_name || !enriched.insert(kill.killer.as_str()) {
            continue;
        }

        if season_id.is_none() {
            season_id = Some(resolve_season(api).await);
        }
        let season = season_id.as_deref().unwrap_or(LIFETIME_SEASON);

        debug!(killer = %kill.killer, season_id = season, "fetching killer stats");
        let snapshot = match ranked_snapshot(api, &kill.killer, season).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(killer = %kill.killer, error = %err, "killer stats lookup failed");
                None
            }
        };
        lines.push(stats_line(&kill.killer, snapshot.as_ref()));
    }

    render(&lines)
}

async fn resolve_season<A: PubgApi + ?Sized>(api: &A) -> String {
    match current_season_id(api).await {
        Ok(season) => season,
        Err(err) => {
            warn!(error = %err, "season request failed, using lifetime stats");
            LIFETIME_SEASON.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubg::fake::{ranked_document, season_list, FakePubg};
    use serde_json::json;

    fn kill(killer: &str, victim: &str) -> HostileKill {
        HostileKill {
            killer: killer.to_string(),
            victim: victim.to_string(),
            damage_category: "Damage_Gun".to_string(),
            cause: "WeapM416_C".to_string(),
            distance: 1234.56,
        }
    }

    fn fake_with_gold_enemy() -> FakePubg {
        let mut fake = FakePubg::default();
        fake.seasons = Some(season_list(Some("s1")));
        fake.players.insert("EnemyA".to_string(), "acct.a".to_string());
        fake.ranked.insert(
            ("acct.a".to_string(), "s1".to_string()),
            ranked_document(json!({
                "All": { "currentTier": { "tier": "Gold", "subTier": "III" }, "damageDealt": 2105.0, "roundsPlayed": 10 }
            })),
        );
        fake
    }

    #[test]
    fn kill_line_rounds_distance() {
        assert_eq!(
            kill_line(&kill("EnemyA", "Mate")),
            "- 💀 `EnemyA` ▶ `Mate` (Damage_Gun, WeapM416_C, 1234.6m)"
        );
    }

    #[test]
    fn stats_line_variants() {
        let snapshot = RankedSnapshot {
            tier: "Gold III".to_string(),
            avg_damage: 210.5,
        };
        assert_eq!(
            stats_line("EnemyA", Some(&snapshot)),
            "   ↪ EnemyA - tier: **Gold III**, avg damage: `210.5`"
        );
        assert_eq!(stats_line("EnemyB", None), "   ↪ EnemyB - stats unavailable");
    }

    #[tokio::test]
    async fn no_kills_is_the_no_results_message() {
        let fake = FakePubg::default();
        let text = build_report(&fake, "m1", &[], "Me").await;
        assert_eq!(text, NO_RESULTS);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_killer_is_enriched_once() {
        let fake = fake_with_gold_enemy();
        let kills = [kill("EnemyA", "Mate"), kill("EnemyA", "Me")];

        let text = build_report(&fake, "m1", &kills, "Me").await;

        assert_eq!(text.matches("tier: **Gold III**").count(), 1);
        assert_eq!(text.matches("💀").count(), 2);
        assert_eq!(fake.count_calls("ranked_stats"), 1);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("📊"));
        assert_eq!(lines[1], "");
        assert!(lines[2].contains("`Mate`"));
        assert!(lines[3].contains("Gold III"));
        assert!(lines[4].contains("`Me`"));
    }

    #[tokio::test]
    async fn failed_stats_do_not_abort_the_report() {
        let fake = fake_with_gold_enemy();
        let kills = [kill("Unknown1", "Mate"), kill("EnemyA", "Me")];

        let text = build_report(&fake, "m1", &kills, "Me").await;

        assert!(text.contains("Unknown1 - stats unavailable"));
        assert!(text.contains("EnemyA - tier: **Gold III**"));
    }

    #[tokio::test]
    async fn transport_error_on_one_killer_keeps_the_report() {
        let mut fake = fake_with_gold_enemy();
        fake.unreachable.insert("Slow".to_string());
        let kills = [kill("EnemyA", "Mate"), kill("Slow", "Me")];

        let text = build_report(&fake, "m1", &kills, "Me").await;

        assert!(text.contains("EnemyA - tier: **Gold III**"));
        assert!(text.contains("`Slow` ▶ `Me`"));
        assert!(text.contains("Slow - stats unavailable"));
    }

    #[tokio::test]
    async fn season_is_resolved_once_per_report() {
        let mut fake = fake_with_gold_enemy();
        fake.players.insert("EnemyB".to_string(), "acct.b".to_string());
        let kills = [kill("EnemyA", "Mate"), kill("EnemyB", "Me")];

        build_report(&fake, "m1", &kills, "Me").await;

        assert_eq!(fake.count_calls("seasons"), 1);
        assert!(fake.calls().contains(&"ranked_stats acct.b s1".to_string()));
    }

    #[tokio::test]
    async fn season_lookup_failure_uses_lifetime() {
        let mut fake = fake_with_gold_enemy();
        fake.seasons = None;

        let text = build_report(&fake, "m1", &[kill("EnemyA", "Mate")], "Me").await;

        assert!(fake.calls().contains(&"ranked_stats acct.a lifetime".to_string()));
        assert!(text.contains("EnemyA - stats unavailable"));
    }
}
