//! # Metric Registry
//!
//! Names every integer counter once and maps it onto the team and player
//! records. Handlers declare *which* metrics an event bumps; this module owns
//! *where* each metric lives, so team and player bookkeeping cannot drift.
//!
//! ## Scope
//!
//! | Scope    | Examples                                        |
//! |----------|-------------------------------------------------|
//! | Both     | shots, passes, tackles, ballsPlayed             |
//! | Team     | corners, offsides, freeKicks, throwIns          |
//! | Player   | ballsReceived, pressures                        |

use crate::models::{PlayerStatSummary, TeamStats};

/// Where a metric is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScope {
    Both,
    TeamOnly,
    PlayerOnly,
}

impl MetricScope {
    pub fn on_team(self) -> bool {
        self != MetricScope::PlayerOnly
    }

    pub fn on_player(self) -> bool {
        self != MetricScope::TeamOnly
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Metric {
    Shots,
    ShotsOnTarget,
    Goals,
    Assists,
    OwnGoals,

    DangerousFootShots,
    NonDangerousFootShots,
    FootShotsOnTarget,
    FootShotsOffTarget,
    FootShotsPostHits,
    FootShotsBlocked,
    DangerousHeaderShots,
    NonDangerousHeaderShots,
    HeaderShotsOnTarget,
    HeaderShotsOffTarget,
    HeaderShotsPostHits,
    HeaderShotsBlocked,

    PassesAttempted,
    PassesCompleted,
    SupportPasses,
    OffensivePasses,
    LongPasses,
    ForwardPasses,
    BackwardPasses,
    LateralPasses,
    DecisivePasses,
    SuccessfulCrosses,
    ProgressivePasses,
    PassesToFinalThird,
    Crosses,
    BallsReceived,

    Tackles,
    Interceptions,
    Clearances,
    Blocks,
    Saves,
    TotalPressures,
    SuccessfulPressures,
    PressureRegains,

    BallsPlayed,
    /// `ballsLost` on the team, `ballsGiven` on the player
    BallsLost,
    BallsRecovered,
    Contacts,
    Dribbles,
    SuccessfulDribbles,
    AerialDuelsWon,
    AerialDuelsLost,
    DuelsWon,
    DuelsLost,

    FoulsCommitted,
    YellowCards,
    RedCards,
    Corners,
    Offsides,
    FreeKicks,
    Penalties,
    ThrowIns,
    GoalKicks,
    SixMeterViolations,
    Substitutions,
}

impl Metric {
    pub fn scope(self) -> MetricScope {
        match self {
            Metric::BallsReceived
            | Metric::TotalPressures
            | Metric::SuccessfulPressures
            | Metric::PressureRegains => MetricScope::PlayerOnly,
            Metric::Corners
            | Metric::Offsides
            | Metric::FreeKicks
            | Metric::Penalties
            | Metric::ThrowIns
            | Metric::GoalKicks
            | Metric::SixMeterViolations
            | Metric::Substitutions => MetricScope::TeamOnly,
            _ => MetricScope::Both,
        }
    }
}

impl TeamStats {
    /// Counter backing `metric`, or `None` for player-only metrics.
    pub fn counter_mut(&mut self, metric: Metric) -> Option<&mut u32> {
        let counter = match metric {
            Metric::Shots => &mut self.shots,
            Metric::ShotsOnTarget => &mut self.shots_on_target,
            Metric::Goals => &mut self.goals,
            Metric::Assists => &mut self.assists,
            Metric::OwnGoals => &mut self.own_goals,
            Metric::DangerousFootShots => &mut self.dangerous_foot_shots,
            Metric::NonDangerousFootShots => &mut self.non_dangerous_foot_shots,
            Metric::FootShotsOnTarget => &mut self.foot_shots_on_target,
            Metric::FootShotsOffTarget => &mut self.foot_shots_off_target,
            Metric::FootShotsPostHits => &mut self.foot_shots_post_hits,
            Metric::FootShotsBlocked => &mut self.foot_shots_blocked,
            Metric::DangerousHeaderShots => &mut self.dangerous_header_shots,
            Metric::NonDangerousHeaderShots => &mut self.non_dangerous_header_shots,
            Metric::HeaderShotsOnTarget => &mut self.header_shots_on_target,
            Metric::HeaderShotsOffTarget => &mut self.header_shots_off_target,
            Metric::HeaderShotsPostHits => &mut self.header_shots_post_hits,
            Metric::HeaderShotsBlocked => &mut self.header_shots_blocked,
            Metric::PassesAttempted => &mut self.passes_attempted,
            Metric::PassesCompleted => &mut self.passes_completed,
            Metric::SupportPasses => &mut self.support_passes,
            Metric::OffensivePasses => &mut self.offensive_passes,
            Metric::LongPasses => &mut self.long_passes,
            Metric::ForwardPasses => &mut self.forward_passes,
            Metric::BackwardPasses => &mut self.backward_passes,
            Metric::LateralPasses => &mut self.lateral_passes,
            Metric::DecisivePasses => &mut self.decisive_passes,
            Metric::SuccessfulCrosses => &mut self.successful_crosses,
            Metric::ProgressivePasses => &mut self.progressive_passes,
            Metric::PassesToFinalThird => &mut self.passes_to_final_third,
            Metric::Crosses => &mut self.crosses,
            Metric::Tackles => &mut self.tackles,
            Metric::Interceptions => &mut self.interceptions,
            Metric::Clearances => &mut self.clearances,
            Metric::Blocks => &mut self.blocks,
            Metric::Saves => &mut self.saves,
            Metric::BallsPlayed => &mut self.balls_played,
            Metric::BallsLost => &mut self.balls_lost,
            Metric::BallsRecovered => &mut self.balls_recovered,
            Metric::Contacts => &mut self.contacts,
            Metric::Dribbles => &mut self.dribbles,
            Metric::SuccessfulDribbles => &mut self.successful_dribbles,
            Metric::AerialDuelsWon => &mut self.aerial_duels_won,
            Metric::AerialDuelsLost => &mut self.aerial_duels_lost,
            Metric::DuelsWon => &mut self.duels_won,
            Metric::DuelsLost => &mut self.duels_lost,
            Metric::FoulsCommitted => &mut self.fouls_committed,
            Metric::YellowCards => &mut self.yellow_cards,
            Metric::RedCards => &mut self.red_cards,
            Metric::Corners => &mut self.corners,
            Metric::Offsides => &mut self.offsides,
            Metric::FreeKicks => &mut self.free_kicks,
            Metric::Penalties => &mut self.penalties,
            Metric::ThrowIns => &mut self.throw_ins,
            Metric::GoalKicks => &mut self.goal_kicks,
            Metric::SixMeterViolations => &mut self.six_meter_violations,
            Metric::Substitutions => &mut self.substitutions,
            Metric::BallsReceived
            | Metric::TotalPressures
            | Metric::SuccessfulPressures
            | Metric::PressureRegains => return None,
        };
        Some(counter)
    }
}

impl PlayerStatSummary {
    /// Counter backing `metric`, or `None` for team-only metrics.
    pub fn counter_mut(&mut self, metric: Metric) -> Option<&mut u32> {
        let counter = match metric {
            Metric::Shots => &mut self.shots,
            Metric::ShotsOnTarget => &mut self.shots_on_target,
            Metric::Goals => &mut self.goals,
            Metric::Assists => &mut self.assists,
            Metric::OwnGoals => &mut self.own_goals,
            Metric::DangerousFootShots => &mut self.dangerous_foot_shots,
            Metric::NonDangerousFootShots => &mut self.non_dangerous_foot_shots,
            Metric::FootShotsOnTarget => &mut self.foot_shots_on_target,
            Metric::FootShotsOffTarget => &mut self.foot_shots_off_target,
            Metric::FootShotsPostHits => &mut self.foot_shots_post_hits,
            Metric::FootShotsBlocked => &mut self.foot_shots_blocked,
            Metric::DangerousHeaderShots => &mut self.dangerous_header_shots,
            Metric::NonDangerousHeaderShots => &mut self.non_dangerous_header_shots,
            Metric::HeaderShotsOnTarget => &mut self.header_shots_on_target,
            Metric::HeaderShotsOffTarget => &mut self.header_shots_off_target,
            Metric::HeaderShotsPostHits => &mut self.header_shots_post_hits,
            Metric::HeaderShotsBlocked => &mut self.header_shots_blocked,
            Metric::PassesAttempted => &mut self.passes_attempted,
            Metric::PassesCompleted => &mut self.passes_completed,
            Metric::SupportPasses => &mut self.support_passes,
            Metric::OffensivePasses => &mut self.offensive_passes,
            Metric::LongPasses => &mut self.long_passes,
            Metric::ForwardPasses => &mut self.forward_passes,
            Metric::BackwardPasses => &mut self.backward_passes,
            Metric::LateralPasses => &mut self.lateral_passes,
            Metric::DecisivePasses => &mut self.decisive_passes,
            Metric::SuccessfulCrosses => &mut self.successful_crosses,
            Metric::ProgressivePasses => &mut self.progressive_passes,
            Metric::PassesToFinalThird => &mut self.passes_to_final_third,
            Metric::Crosses => &mut self.crosses,
            Metric::BallsReceived => &mut self.balls_received,
            Metric::Tackles => &mut self.tackles,
            Metric::Interceptions => &mut self.interceptions,
            Metric::Clearances => &mut self.clearances,
            Metric::Blocks => &mut self.blocks,
            Metric::Saves => &mut self.saves,
            Metric::TotalPressures => &mut self.total_pressures,
            Metric::SuccessfulPressures => &mut self.successful_pressures,
            Metric::PressureRegains => &mut self.pressure_regains,
            Metric::BallsPlayed => &mut self.balls_played,
            Metric::BallsLost => &mut self.balls_given,
            Metric::BallsRecovered => &mut self.balls_recovered,
            Metric::Contacts => &mut self.contacts,
            Metric::Dribbles => &mut self.dribbles,
            Metric::SuccessfulDribbles => &mut self.successful_dribbles,
            Metric::AerialDuelsWon => &mut self.aerial_duels_won,
            Metric::AerialDuelsLost => &mut self.aerial_duels_lost,
            Metric::DuelsWon => &mut self.duels_won,
            Metric::DuelsLost => &mut self.duels_lost,
            Metric::FoulsCommitted => &mut self.fouls_committed,
            Metric::YellowCards => &mut self.yellow_cards,
            Metric::RedCards => &mut self.red_cards,
            Metric::Corners
            | Metric::Offsides
            | Metric::FreeKicks
            | Metric::Penalties
            | Metric::ThrowIns
            | Metric::GoalKicks
            | Metric::SixMeterViolations
            | Metric::Substitutions => return None,
        };
        Some(counter)
    }
}

/// Increment each metric on the team and, when present, on the player.
///
/// Metrics outside a record's scope are skipped for that record.
pub fn record(team: &mut TeamStats, mut player: Option<&mut PlayerStatSummary>, metrics: &[Metric]) {
    for &metric in metrics {
        let scope = metric.scope();
        if scope.on_team() {
            bump(team.counter_mut(metric));
        }
        if scope.on_player() {
            bump(player.as_deref_mut().and_then(|p| p.counter_mut(metric)));
        }
    }
}

/// Increment metrics on a player alone, e.g. the receiver of a pass.
pub fn record_player(player: &mut PlayerStatSummary, metrics: &[Metric]) {
    for &metric in metrics.iter().filter(|m| m.scope().on_player()) {
        bump(player.counter_mut(metric));
    }
}

fn bump(counter: Option<&mut u32>) {
    if let Some(counter) = counter {
        *counter += 1;
    }
}
