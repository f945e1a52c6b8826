//! # Event Handlers
//!
//! Dispatch table from [`EventKind`] to the handler that folds one event into
//! a team record and, when the actor is known, that player's summary.
//!
//! Handlers never look up other players. A completed pass towards a named
//! recipient returns a [`Reception`] which the caller credits to the
//! recipient's summary.

use crate::config::AnalyticsConfig;
use crate::models::{
    CardEventData, EventKind, MatchEvent, PassEventData, PlayerId, PlayerStatSummary,
    PressureEventData, ShotEventData, TeamStats,
};

use super::metrics::{record, Metric};
use super::passing::PassClassifier;
use super::xg::XgModel;

use Metric::*;

/// Shared models consulted by the handlers during one aggregation pass.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub xg: XgModel,
    pub passes: PassClassifier,
    /// xG at or above which a shot is dangerous
    pub dangerous_xg: f64,
}

impl Default for HandlerContext {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl HandlerContext {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            xg: XgModel::new(config.xg.clone(), config.pitch.clone()),
            passes: PassClassifier::new(config.passing.clone(), config.pitch.clone()),
            dangerous_xg: config.shots.dangerous_xg,
        }
    }
}

/// A completed pass that reached a named team-mate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    pub recipient: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Fixed metric list, no payload
    Counters(&'static [Metric]),
    Shot,
    /// Generic pass (`always_completed == false`) or a pass subtype
    Pass {
        own: &'static [Metric],
        always_completed: bool,
    },
    Pressure,
    Card,
}

pub fn handler_for(kind: EventKind) -> Handler {
    match kind {
        EventKind::Shot => Handler::Shot,
        EventKind::Goal => Handler::Counters(&[Goals, BallsPlayed]),
        EventKind::Assist => Handler::Counters(&[Assists, BallsPlayed]),
        EventKind::OwnGoal => Handler::Counters(&[OwnGoals]),

        EventKind::Pass => Handler::Pass { own: &[], always_completed: false },
        EventKind::SupportPass => subtype(&[SupportPasses]),
        EventKind::OffensivePass => subtype(&[OffensivePasses]),
        EventKind::LongPass => subtype(&[LongPasses]),
        EventKind::ForwardPass => subtype(&[ForwardPasses]),
        EventKind::BackwardPass => subtype(&[BackwardPasses]),
        EventKind::LateralPass => subtype(&[LateralPasses]),
        EventKind::DecisivePass => subtype(&[DecisivePasses]),
        EventKind::SuccessfulCross => subtype(&[SuccessfulCrosses, Crosses]),

        EventKind::Cross => Handler::Counters(&[Crosses, BallsPlayed]),
        EventKind::Dribble => Handler::Counters(&[Dribbles, BallsPlayed]),
        EventKind::SuccessfulDribble => {
            Handler::Counters(&[SuccessfulDribbles, Dribbles, BallsPlayed])
        }

        EventKind::Tackle => Handler::Counters(&[Tackles, BallsPlayed]),
        EventKind::Interception => Handler::Counters(&[Interceptions, BallsPlayed]),
        EventKind::Clearance => Handler::Counters(&[Clearances, BallsPlayed]),
        EventKind::Block => Handler::Counters(&[Blocks, BallsPlayed]),
        EventKind::Save => Handler::Counters(&[Saves, BallsPlayed]),
        EventKind::Pressure => Handler::Pressure,

        EventKind::BallRecovered => Handler::Counters(&[BallsRecovered, BallsPlayed]),
        EventKind::BallLost => Handler::Counters(&[BallsLost, BallsPlayed]),
        EventKind::Contact => Handler::Counters(&[Contacts, BallsPlayed]),
        EventKind::AerialDuelWon => Handler::Counters(&[AerialDuelsWon, DuelsWon, BallsPlayed]),
        EventKind::AerialDuelLost => {
            Handler::Counters(&[AerialDuelsLost, DuelsLost, BallsPlayed])
        }

        EventKind::Foul => Handler::Counters(&[FoulsCommitted, BallsPlayed]),
        EventKind::Card => Handler::Card,
        EventKind::YellowCard => Handler::Counters(&[YellowCards, BallsPlayed]),
        EventKind::RedCard => Handler::Counters(&[RedCards, BallsPlayed]),

        EventKind::Corner => Handler::Counters(&[Corners, BallsPlayed]),
        EventKind::Offside => Handler::Counters(&[Offsides]),
        EventKind::FreeKick => Handler::Counters(&[FreeKicks]),
        EventKind::Penalty => Handler::Counters(&[Penalties]),
        EventKind::ThrowIn => Handler::Counters(&[ThrowIns, BallsPlayed]),
        EventKind::GoalKick => Handler::Counters(&[GoalKicks, BallsPlayed]),
        EventKind::SixMeterViolation => Handler::Counters(&[SixMeterViolations]),
        EventKind::Substitution => Handler::Counters(&[Substitutions]),
    }
}

const fn subtype(own: &'static [Metric]) -> Handler {
    Handler::Pass { own, always_completed: true }
}

impl Handler {
    /// Fold `event` into `team` and the acting `player`.
    pub fn apply(
        self,
        ctx: &HandlerContext,
        team: &mut TeamStats,
        player: Option<&mut PlayerStatSummary>,
        event: &MatchEvent,
    ) -> Option<Reception> {
        match self {
            Handler::Counters(metrics) => {
                record(team, player, metrics);
                None
            }
            Handler::Shot => {
                handle_shot(ctx, team, player, event);
                None
            }
            Handler::Pass { own, always_completed } => {
                handle_pass(ctx, team, player, event, own, always_completed)
            }
            Handler::Pressure => {
                let outcome: PressureEventData = event.payload();
                record(team, player, &pressure_metrics(&outcome));
                None
            }
            Handler::Card => {
                let card: CardEventData = event.payload();
                match card.card_type.as_str() {
                    "yellow" => record(team, player, &[YellowCards, BallsPlayed]),
                    "red" => record(team, player, &[RedCards, BallsPlayed]),
                    other => log::debug!("Event '{}': unknown card_type '{}'", event.id, other),
                }
                None
            }
        }
    }
}

fn handle_shot(
    ctx: &HandlerContext,
    team: &mut TeamStats,
    mut player: Option<&mut PlayerStatSummary>,
    event: &MatchEvent,
) {
    let shot: ShotEventData = event.payload();
    let xg = ctx.xg.estimate(&shot, event.coordinates);

    record(team, player.as_deref_mut(), &shot_metrics(&shot, xg, ctx.dangerous_xg));
    team.total_xg += xg;
    if let Some(summary) = player {
        summary.total_xg += xg;
    }
}

/// Counters bumped by a shot with the given xG.
pub fn shot_metrics(shot: &ShotEventData, xg: f64, dangerous_xg: f64) -> Vec<Metric> {
    let header = shot.is_header.unwrap_or(false);
    let dangerous = xg >= dangerous_xg;
    let hit_post = shot.hit_post.unwrap_or(false);

    let mut metrics = vec![Shots, BallsPlayed];
    if shot.on_target {
        metrics.push(ShotsOnTarget);
    }

    metrics.push(match (header, dangerous) {
        (false, true) => DangerousFootShots,
        (false, false) => NonDangerousFootShots,
        (true, true) => DangerousHeaderShots,
        (true, false) => NonDangerousHeaderShots,
    });

    // blocked shots are never attributed to the shooter
    metrics.push(match (header, shot.on_target, hit_post) {
        (false, true, _) => FootShotsOnTarget,
        (false, false, true) => FootShotsPostHits,
        (false, false, false) => FootShotsOffTarget,
        (true, true, _) => HeaderShotsOnTarget,
        (true, false, true) => HeaderShotsPostHits,
        (true, false, false) => HeaderShotsOffTarget,
    });

    metrics
}

fn handle_pass(
    ctx: &HandlerContext,
    team: &mut TeamStats,
    mut player: Option<&mut PlayerStatSummary>,
    event: &MatchEvent,
    own: &'static [Metric],
    always_completed: bool,
) -> Option<Reception> {
    let pass: PassEventData = event.payload();
    let completed = always_completed || pass.success;

    let mut metrics = Vec::with_capacity(own.len() + 5);
    metrics.extend_from_slice(own);
    metrics.extend_from_slice(&[PassesAttempted, BallsPlayed]);
    if completed {
        metrics.push(PassesCompleted);
        if let (Some(start), Some(end)) = (event.coordinates, pass.end_coordinates) {
            let shape = ctx.passes.classify(start, end);
            if shape.progressive {
                metrics.push(ProgressivePasses);
            }
            if shape.to_final_third {
                metrics.push(PassesToFinalThird);
            }
        }
    }
    record(team, player.as_deref_mut(), &metrics);

    let recipient = pass.recipient_player_id?;
    if let Some(passer) = player {
        passer.record_pass_to(&recipient, completed);
    }
    completed.then_some(Reception { recipient })
}

fn pressure_metrics(pressure: &PressureEventData) -> Vec<Metric> {
    let mut metrics = vec![TotalPressures];
    if pressure.is_successful() {
        metrics.push(SuccessfulPressures);
    }
    if pressure.is_regain() {
        metrics.push(PressureRegains);
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn summary() -> PlayerStatSummary {
        PlayerStatSummary::new("H1".into(), "Home Player 1", Some(10), TeamSide::Home)
    }

    fn run(event: &MatchEvent) -> (TeamStats, PlayerStatSummary, Option<Reception>) {
        let ctx = HandlerContext::default();
        let mut team = TeamStats::default();
        let mut player = summary();
        let kind = event.kind.expect("test events carry a kind");
        let reception = handler_for(kind).apply(&ctx, &mut team, Some(&mut player), event);
        (team, player, reception)
    }

    fn event(kind: EventKind) -> MatchEvent {
        MatchEvent::new(kind, TeamSide::Home).with_player("H1")
    }

    #[test]
    fn test_every_kind_has_a_handler() {
        let ctx = HandlerContext::default();
        for kind in EventKind::iter() {
            let mut team = TeamStats::default();
            handler_for(kind).apply(&ctx, &mut team, None, &MatchEvent::new(kind, TeamSide::Away));
        }
    }

    #[test]
    fn test_pass_subtypes_route_to_completed_pass_handler() {
        for kind in EventKind::iter() {
            let completed_pass = matches!(
                handler_for(kind),
                Handler::Pass { always_completed: true, .. }
            );
            assert_eq!(completed_pass, kind.is_pass_subtype(), "{}", kind);
        }
    }

    #[test]
    fn test_touch_kinds_count_balls_played() {
        for kind in [
            EventKind::Shot,
            EventKind::Pass,
            EventKind::Cross,
            EventKind::SuccessfulDribble,
            EventKind::Tackle,
            EventKind::Save,
            EventKind::BallLost,
            EventKind::AerialDuelLost,
            EventKind::Corner,
            EventKind::ThrowIn,
            EventKind::DecisivePass,
            EventKind::Foul,
            EventKind::YellowCard,
            EventKind::RedCard,
            EventKind::Goal,
            EventKind::Assist,
        ] {
            let (team, player, _) = run(&event(kind));
            assert_eq!(team.balls_played, 1, "{}", kind);
            assert_eq!(player.balls_played, 1, "{}", kind);
        }

        for kind in [
            EventKind::OwnGoal,
            EventKind::Offside,
            EventKind::FreeKick,
            EventKind::SixMeterViolation,
            EventKind::Substitution,
            EventKind::Pressure,
        ] {
            let (team, player, _) = run(&event(kind));
            assert_eq!(team.balls_played + player.balls_played, 0, "{}", kind);
        }
    }

    #[test]
    fn test_corner_is_team_only_but_taker_touches() {
        let (team, player, _) = run(&event(EventKind::Corner));
        assert_eq!(team.corners, 1);
        assert_eq!(player.balls_played, 1);
    }

    #[test]
    fn test_duel_rollups() {
        let (team, player, _) = run(&event(EventKind::AerialDuelWon));
        assert_eq!((team.aerial_duels_won, team.duels_won), (1, 1));
        assert_eq!((player.aerial_duels_won, player.duels_won), (1, 1));

        let (team, _, _) = run(&event(EventKind::SuccessfulDribble));
        assert_eq!((team.successful_dribbles, team.dribbles), (1, 1));
    }

    #[test]
    fn test_shot_on_target_foot() {
        let shot = event(EventKind::Shot).with_data(json!({"on_target": true}));
        let (team, player, _) = run(&shot);
        assert_eq!((team.shots, team.shots_on_target), (1, 1));
        assert_eq!(team.non_dangerous_foot_shots, 1);
        assert_eq!(team.foot_shots_on_target, 1);
        assert!((team.total_xg - 0.08).abs() < 1e-9);
        assert!((player.total_xg - 0.08).abs() < 1e-9);
        assert_eq!(player.shots_on_target, 1);
    }

    #[test]
    fn test_shot_categories() {
        let dangerous = event(EventKind::Shot)
            .at(1.0, 1.0)
            .with_data(json!({"on_target": true, "isHeader": false, "assist_type": "through_ball"}));
        let (team, _, _) = run(&dangerous);
        assert_eq!(team.dangerous_foot_shots, 1);
        assert_eq!(team.foot_shots_on_target, 1);

        let post = event(EventKind::Shot).with_data(json!({"on_target": false, "hitPost": true}));
        let (team, _, _) = run(&post);
        assert_eq!(team.shots_on_target, 0);
        assert_eq!(team.foot_shots_post_hits, 1);

        let header = event(EventKind::Shot).with_data(json!({"on_target": false, "isHeader": true}));
        let (team, player, _) = run(&header);
        assert_eq!(team.non_dangerous_header_shots, 1);
        assert_eq!(team.header_shots_off_target, 1);
        assert_eq!(player.header_shots_off_target, 1);
        assert_eq!(team.header_shots_blocked + team.foot_shots_blocked, 0);
    }

    #[test]
    fn test_shot_is_goal_does_not_count_goal() {
        let shot = event(EventKind::Shot).with_data(json!({"on_target": true, "is_goal": true}));
        let (team, player, _) = run(&shot);
        assert_eq!(team.goals + player.goals, 0);
    }

    #[test]
    fn test_dangerous_threshold_is_inclusive() {
        let metrics = shot_metrics(&ShotEventData::default(), 0.1, 0.1);
        assert!(metrics.contains(&DangerousFootShots));
        let metrics = shot_metrics(&ShotEventData::default(), 0.099, 0.1);
        assert!(metrics.contains(&NonDangerousFootShots));
    }

    #[test]
    fn test_failed_pass_keeps_network_edge_without_reception() {
        let pass = event(EventKind::Pass).with_data(json!({"success": false, "recipient_player_id": "H2"}));
        let (team, player, reception) = run(&pass);
        assert_eq!((team.passes_attempted, team.passes_completed), (1, 0));
        assert_eq!(reception, None);
        let link = player.pass_link(&"H2".into()).unwrap();
        assert_eq!((link.count, link.successful_count), (1, 0));
    }

    #[test]
    fn test_completed_pass_returns_reception() {
        let pass = event(EventKind::Pass).with_data(json!({"success": true, "recipient_player_id": 7}));
        let (_, player, reception) = run(&pass);
        assert_eq!(reception, Some(Reception { recipient: "7".into() }));
        assert_eq!(player.pass_link(&"7".into()).unwrap().successful_count, 1);
    }

    #[test]
    fn test_pass_geometry_only_for_completed_passes() {
        let data = json!({"success": true, "end_coordinates": {"x": 70.0, "y": 30.0}});
        let (team, player, _) = run(&event(EventKind::Pass).at(30.0, 30.0).with_data(data));
        assert_eq!(team.progressive_passes, 1);
        assert_eq!(player.progressive_passes, 1);
        assert_eq!(player.passes_to_final_third, 1);

        let data = json!({"success": false, "end_coordinates": {"x": 70.0, "y": 30.0}});
        let (team, _, _) = run(&event(EventKind::Pass).at(30.0, 30.0).with_data(data));
        assert_eq!(team.progressive_passes + team.passes_to_final_third, 0);

        let data = json!({"success": true});
        let (team, _, _) = run(&event(EventKind::Pass).at(30.0, 30.0).with_data(data));
        assert_eq!(team.progressive_passes, 0);
    }

    #[test]
    fn test_subtypes_are_completed_passes() {
        let (team, player, _) = run(&event(EventKind::LongPass));
        assert_eq!(team.long_passes, 1);
        assert_eq!((team.passes_attempted, team.passes_completed), (1, 1));
        assert_eq!(player.passes_completed, 1);

        let (team, player, _) = run(&event(EventKind::SuccessfulCross));
        assert_eq!((team.successful_crosses, team.crosses), (1, 1));
        assert_eq!(player.crosses, 1);
        assert_eq!(team.passes_completed, 1);
    }

    #[test]
    fn test_subtype_with_geometry_and_recipient() {
        let data = json!({"recipient_player_id": "H2", "end_coordinates": {"x": 90.0, "y": 34.0}});
        let (team, player, reception) = run(&event(EventKind::ForwardPass).at(60.0, 34.0).with_data(data));
        assert_eq!(team.progressive_passes, 1);
        assert_eq!(team.passes_to_final_third, 1);
        assert!(reception.is_some());
        assert_eq!(player.pass_network_sent.len(), 1);
    }

    #[test]
    fn test_pressure_is_player_only() {
        let regain = event(EventKind::Pressure).with_data(json!({"outcome": "regain_possession"}));
        let (team, player, _) = run(&regain);
        assert_eq!(team, TeamStats::default());
        assert_eq!(
            (player.total_pressures, player.successful_pressures, player.pressure_regains),
            (1, 1, 1)
        );

        let foul = event(EventKind::Pressure).with_data(json!({"outcome": "foul_won"}));
        let (_, player, _) = run(&foul);
        assert_eq!((player.successful_pressures, player.pressure_regains), (1, 0));

        let nothing = event(EventKind::Pressure).with_data(json!({"outcome": "no_effect"}));
        let (_, player, _) = run(&nothing);
        assert_eq!((player.total_pressures, player.successful_pressures), (1, 0));
    }

    #[test]
    fn test_card_event_dispatches_on_type() {
        let (team, player, _) = run(&event(EventKind::Card).with_data(json!({"card_type": "red"})));
        assert_eq!((team.red_cards, player.red_cards, team.yellow_cards), (1, 1, 0));

        assert_eq!((team.balls_played, player.balls_played), (1, 1));

        let (team, _, _) = run(&event(EventKind::Card).with_data(json!({"card_type": "yellow"})));
        assert_eq!((team.yellow_cards, team.balls_played), (1, 1));

        let (team, _, _) = run(&event(EventKind::Card).with_data(json!({"card_type": "green"})));
        assert_eq!(team.yellow_cards + team.red_cards + team.balls_played, 0);
    }

    #[test]
    fn test_context_follows_config() {
        let mut config = AnalyticsConfig::default();
        config.shots.dangerous_xg = 0.05;
        let ctx = HandlerContext::from_config(&config);
        let mut team = TeamStats::default();
        handler_for(EventKind::Shot).apply(&ctx, &mut team, None, &MatchEvent::new(EventKind::Shot, TeamSide::Home));
        assert_eq!(team.dangerous_foot_shots, 1);
    }
}
