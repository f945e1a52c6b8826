use serde::{Deserialize, Serialize};

use super::events::{PlayerId, TeamSide};

/// Team-level counters accumulated over one aggregation pass.
///
/// Every counter starts at zero and only ever grows while events are folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    // Shooting
    pub shots: u32,
    pub shots_on_target: u32,
    pub goals: u32,
    pub assists: u32,
    pub own_goals: u32,
    pub total_xg: f64,

    // Shot categories
    pub dangerous_foot_shots: u32,
    pub non_dangerous_foot_shots: u32,
    pub foot_shots_on_target: u32,
    pub foot_shots_off_target: u32,
    pub foot_shots_post_hits: u32,
    pub foot_shots_blocked: u32,
    pub dangerous_header_shots: u32,
    pub non_dangerous_header_shots: u32,
    pub header_shots_on_target: u32,
    pub header_shots_off_target: u32,
    pub header_shots_post_hits: u32,
    pub header_shots_blocked: u32,

    // Passing
    pub passes_attempted: u32,
    pub passes_completed: u32,
    pub support_passes: u32,
    pub offensive_passes: u32,
    pub long_passes: u32,
    pub forward_passes: u32,
    pub backward_passes: u32,
    pub lateral_passes: u32,
    pub decisive_passes: u32,
    pub successful_crosses: u32,
    pub progressive_passes: u32,
    pub passes_to_final_third: u32,
    pub crosses: u32,

    // Defending
    pub tackles: u32,
    pub interceptions: u32,
    pub clearances: u32,
    pub blocks: u32,
    pub saves: u32,

    // Ball control and duels
    pub balls_played: u32,
    pub balls_lost: u32,
    pub balls_recovered: u32,
    pub contacts: u32,
    pub dribbles: u32,
    pub successful_dribbles: u32,
    pub aerial_duels_won: u32,
    pub aerial_duels_lost: u32,
    pub duels_won: u32,
    pub duels_lost: u32,

    // Discipline and set pieces
    pub fouls_committed: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub corners: u32,
    pub offsides: u32,
    pub free_kicks: u32,
    pub penalties: u32,
    pub throw_ins: u32,
    pub goal_kicks: u32,
    pub six_meter_violations: u32,
    pub substitutions: u32,
}

fn percentage(numerator: u32, denominator: u32) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64 * 100.0)
}

impl TeamStats {
    pub fn pass_accuracy(&self) -> Option<f64> {
        percentage(self.passes_completed, self.passes_attempted)
    }

    pub fn shot_accuracy(&self) -> Option<f64> {
        percentage(self.shots_on_target, self.shots)
    }

    pub fn goal_conversion(&self) -> Option<f64> {
        percentage(self.goals, self.shots)
    }

    pub fn duel_success_rate(&self) -> Option<f64> {
        percentage(self.duels_won, self.duels_won + self.duels_lost)
    }
}

/// One directed edge of a player's pass network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassLink {
    pub to_player_id: PlayerId,
    pub count: u32,
    pub successful_count: u32,
}

/// Per-player counters, created lazily the first time a player is referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatSummary {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u32>,
    pub team: TeamSide,

    pub shots: u32,
    pub shots_on_target: u32,
    pub goals: u32,
    pub assists: u32,
    pub own_goals: u32,
    pub total_xg: f64,

    pub dangerous_foot_shots: u32,
    pub non_dangerous_foot_shots: u32,
    pub foot_shots_on_target: u32,
    pub foot_shots_off_target: u32,
    pub foot_shots_post_hits: u32,
    pub foot_shots_blocked: u32,
    pub dangerous_header_shots: u32,
    pub non_dangerous_header_shots: u32,
    pub header_shots_on_target: u32,
    pub header_shots_off_target: u32,
    pub header_shots_post_hits: u32,
    pub header_shots_blocked: u32,

    pub passes_attempted: u32,
    pub passes_completed: u32,
    pub support_passes: u32,
    pub offensive_passes: u32,
    pub long_passes: u32,
    pub forward_passes: u32,
    pub backward_passes: u32,
    pub lateral_passes: u32,
    pub decisive_passes: u32,
    pub successful_crosses: u32,
    pub progressive_passes: u32,
    pub passes_to_final_third: u32,
    pub crosses: u32,
    pub balls_received: u32,

    pub tackles: u32,
    pub interceptions: u32,
    pub clearances: u32,
    pub blocks: u32,
    pub saves: u32,
    pub total_pressures: u32,
    pub successful_pressures: u32,
    pub pressure_regains: u32,

    pub balls_played: u32,
    /// Player-level name for team `ballsLost`
    pub balls_given: u32,
    pub balls_recovered: u32,
    pub contacts: u32,
    pub dribbles: u32,
    pub successful_dribbles: u32,
    pub aerial_duels_won: u32,
    pub aerial_duels_lost: u32,
    pub duels_won: u32,
    pub duels_lost: u32,

    pub fouls_committed: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,

    pub pass_network_sent: Vec<PassLink>,
}

impl PlayerStatSummary {
    pub fn new(
        player_id: PlayerId,
        player_name: impl Into<String>,
        jersey_number: Option<u32>,
        team: TeamSide,
    ) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            jersey_number,
            team,
            shots: 0,
            shots_on_target: 0,
            goals: 0,
            assists: 0,
            own_goals: 0,
            total_xg: 0.0,
            dangerous_foot_shots: 0,
            non_dangerous_foot_shots: 0,
            foot_shots_on_target: 0,
            foot_shots_off_target: 0,
            foot_shots_post_hits: 0,
            foot_shots_blocked: 0,
            dangerous_header_shots: 0,
            non_dangerous_header_shots: 0,
            header_shots_on_target: 0,
            header_shots_off_target: 0,
            header_shots_post_hits: 0,
            header_shots_blocked: 0,
            passes_attempted: 0,
            passes_completed: 0,
            support_passes: 0,
            offensive_passes: 0,
            long_passes: 0,
            forward_passes: 0,
            backward_passes: 0,
            lateral_passes: 0,
            decisive_passes: 0,
            successful_crosses: 0,
            progressive_passes: 0,
            passes_to_final_third: 0,
            crosses: 0,
            balls_received: 0,
            tackles: 0,
            interceptions: 0,
            clearances: 0,
            blocks: 0,
            saves: 0,
            total_pressures: 0,
            successful_pressures: 0,
            pressure_regains: 0,
            balls_played: 0,
            balls_given: 0,
            balls_recovered: 0,
            contacts: 0,
            dribbles: 0,
            successful_dribbles: 0,
            aerial_duels_won: 0,
            aerial_duels_lost: 0,
            duels_won: 0,
            duels_lost: 0,
            fouls_committed: 0,
            yellow_cards: 0,
            red_cards: 0,
            pass_network_sent: Vec::new(),
        }
    }

    /// Record a pass towards `recipient`, merging with an existing edge.
    pub fn record_pass_to(&mut self, recipient: &PlayerId, successful: bool) {
        let link = match self
            .pass_network_sent
            .iter()
            .position(|link| &link.to_player_id == recipient)
        {
            Some(idx) => &mut self.pass_network_sent[idx],
            None => {
                self.pass_network_sent.push(PassLink {
                    to_player_id: recipient.clone(),
                    count: 0,
                    successful_count: 0,
                });
                let last = self.pass_network_sent.len() - 1;
                &mut self.pass_network_sent[last]
            }
        };
        link.count += 1;
        if successful {
            link.successful_count += 1;
        }
    }

    pub fn pass_link(&self, recipient: &PlayerId) -> Option<&PassLink> {
        self.pass_network_sent.iter().find(|link| &link.to_player_id == recipient)
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStats {
    pub home_team_stats: TeamStats,
    pub away_team_stats: TeamStats,
    /// One entry per referenced player, in first-seen order
    pub player_stats: Vec<PlayerStatSummary>,
}

impl AggregatedStats {
    pub fn team(&self, side: TeamSide) -> &TeamStats {
        match side {
            TeamSide::Home => &self.home_team_stats,
            TeamSide::Away => &self.away_team_stats,
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerStatSummary> {
        self.player_stats.iter().find(|summary| &summary.player_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ratios_guard_zero_denominators() {
        let stats = TeamStats::default();
        assert_eq!(stats.pass_accuracy(), None);
        assert_eq!(stats.duel_success_rate(), None);

        let stats = TeamStats {
            passes_attempted: 4,
            passes_completed: 3,
            shots: 4,
            shots_on_target: 2,
            goals: 1,
            duels_won: 1,
            duels_lost: 3,
            ..TeamStats::default()
        };
        assert_eq!(stats.pass_accuracy(), Some(75.0));
        assert_eq!(stats.shot_accuracy(), Some(50.0));
        assert_eq!(stats.goal_conversion(), Some(25.0));
        assert_eq!(stats.duel_success_rate(), Some(25.0));
    }

    #[test]
    fn test_pass_network_merges_edges() {
        let mut summary = PlayerStatSummary::new("H1".into(), "Home Player 1", Some(10), TeamSide::Home);
        let h2 = PlayerId::from("H2");
        summary.record_pass_to(&h2, true);
        summary.record_pass_to(&h2, false);
        summary.record_pass_to(&PlayerId::from("H3"), true);

        assert_eq!(summary.pass_network_sent.len(), 2);
        let link = summary.pass_link(&h2).unwrap();
        assert_eq!((link.count, link.successful_count), (2, 1));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let mut summary = PlayerStatSummary::new("H1".into(), "Home Player 1", None, TeamSide::Home);
        summary.record_pass_to(&PlayerId::from("H2"), true);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["playerId"], json!("H1"));
        assert_eq!(value["team"], json!("home"));
        assert_eq!(
            value["passNetworkSent"],
            json!([{"toPlayerId": "H2", "count": 1, "successfulCount": 1}])
        );
        assert!(value.get("jerseyNumber").is_none());

        let team = serde_json::to_value(TeamStats::default()).unwrap();
        assert_eq!(team["shotsOnTarget"], json!(0));
        assert_eq!(team["totalXg"], json!(0.0));
    }
}
