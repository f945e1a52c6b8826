//! Plain-text match report for the `summary` command.

use std::fmt::Write;

use stats_core::{AggregatedStats, PlayerId, TeamSide, TeamStats};

/// Passing links listed under the comparison table.
pub const TOP_LINKS: usize = 5;

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |percent| format!("{:.1}%", percent))
}

fn rows(home: &TeamStats, away: &TeamStats) -> Vec<(&'static str, String, String)> {
    let count = |label: &'static str, pick: fn(&TeamStats) -> u32| {
        (label, pick(home).to_string(), pick(away).to_string())
    };
    let percent = |label: &'static str, pick: fn(&TeamStats) -> Option<f64>| {
        (label, ratio(pick(home)), ratio(pick(away)))
    };

    vec![
        count("Goals", |t| t.goals),
        count("Shots", |t| t.shots),
        count("Shots on target", |t| t.shots_on_target),
        percent("Shot accuracy", TeamStats::shot_accuracy),
        percent("Goal conversion", TeamStats::goal_conversion),
        ("Expected goals", format!("{:.2}", home.total_xg), format!("{:.2}", away.total_xg)),
        count("Passes", |t| t.passes_attempted),
        count("Passes completed", |t| t.passes_completed),
        percent("Pass accuracy", TeamStats::pass_accuracy),
        count("Progressive passes", |t| t.progressive_passes),
        count("Passes to final third", |t| t.passes_to_final_third),
        count("Crosses", |t| t.crosses),
        count("Tackles", |t| t.tackles),
        count("Interceptions", |t| t.interceptions),
        count("Duels won", |t| t.duels_won),
        percent("Duel success", TeamStats::duel_success_rate),
        count("Balls played", |t| t.balls_played),
        count("Fouls", |t| t.fouls_committed),
        count("Yellow cards", |t| t.yellow_cards),
        count("Red cards", |t| t.red_cards),
        count("Corners", |t| t.corners),
        count("Offsides", |t| t.offsides),
    ]
}

fn player_name<'a>(stats: &'a AggregatedStats, id: &'a PlayerId) -> &'a str {
    stats
        .player(id)
        .map(|summary| summary.player_name.as_str())
        .unwrap_or_else(|| id.as_str())
}

/// Home/away comparison followed by the busiest passing links.
pub fn render_summary(stats: &AggregatedStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24}{:>10}{:>10}", "", "Home", "Away");
    for (label, home, away) in rows(stats.team(TeamSide::Home), stats.team(TeamSide::Away)) {
        let _ = writeln!(out, "{:<24}{:>10}{:>10}", label, home, away);
    }

    let mut links: Vec<_> = stats
        .player_stats
        .iter()
        .flat_map(|sender| sender.pass_network_sent.iter().map(move |link| (sender, link)))
        .collect();
    links.sort_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then(b.successful_count.cmp(&a.successful_count))
    });

    if !links.is_empty() {
        let _ = writeln!(out, "\nTop passing links");
        for (sender, link) in links.into_iter().take(TOP_LINKS) {
            let _ = writeln!(
                out,
                "  {} -> {}: {} ({} completed)",
                sender.player_name,
                player_name(stats, &link.to_player_id),
                link.count,
                link.successful_count
            );
        }
    }

    out
}
