//! # Event Aggregator
//!
//! Single pass fold of a match's events into [`AggregatedStats`].
//!
//! ## Pipeline
//!
//! ```text
//! events ──▶ drop (no kind / no team) ──▶ resolve actor ──▶ handler_for(kind)
//!                                                               │
//!                                 recipient ballsReceived ◀─────┘
//! ```
//!
//! Player summaries live in an arena (id → slot index) that is created per
//! call and handed back as `player_stats` in first-seen order. Nothing is
//! retained between calls.

use std::collections::HashMap;

use crate::config::AnalyticsConfig;
use crate::models::{
    AggregatedStats, MatchEvent, Player, PlayerId, PlayerStatSummary, TeamSide, TeamStats,
};

use super::handlers::{handler_for, HandlerContext, Reception};
use super::metrics::{record_player, Metric};
use super::registry::PlayerRegistry;

// ============================================================================
// Player arena
// ============================================================================

/// Lazily populated player summaries for one aggregation call.
struct PlayerArena<'a> {
    registry: PlayerRegistry<'a>,
    slots: HashMap<PlayerId, usize>,
    summaries: Vec<PlayerStatSummary>,
}

impl<'a> PlayerArena<'a> {
    fn new(registry: PlayerRegistry<'a>) -> Self {
        Self {
            registry,
            slots: HashMap::new(),
            summaries: Vec::new(),
        }
    }

    /// Slot of `id`, creating its summary on first reference.
    fn slot(&mut self, id: &PlayerId, team_hint: Option<TeamSide>) -> Option<usize> {
        if let Some(&slot) = self.slots.get(id) {
            return Some(slot);
        }

        let identity = self.registry.resolve(id, team_hint)?;
        let slot = self.summaries.len();
        self.summaries.push(PlayerStatSummary::new(
            id.clone(),
            identity.name,
            identity.jersey_number,
            identity.team,
        ));
        self.slots.insert(id.clone(), slot);
        Some(slot)
    }

    fn summary_mut(&mut self, slot: Option<usize>) -> Option<&mut PlayerStatSummary> {
        self.summaries.get_mut(slot?)
    }

    fn len(&self) -> usize {
        self.summaries.len()
    }

    fn into_summaries(self) -> Vec<PlayerStatSummary> {
        self.summaries
    }
}

// ============================================================================
// EventAggregator
// ============================================================================

/// Stateless aggregator; one instance can serve any number of calls,
/// including concurrently.
#[derive(Debug, Clone, Default)]
pub struct EventAggregator {
    ctx: HandlerContext,
}

impl EventAggregator {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self { ctx: HandlerContext::from_config(config) }
    }

    /// Fold `events` into team and player totals.
    ///
    /// Never fails: events without a kind or team are skipped, and events
    /// naming an unknown player still count for their team.
    pub fn aggregate(
        &self,
        events: &[MatchEvent],
        home_players: &[Player],
        away_players: &[Player],
    ) -> AggregatedStats {
        let mut home = TeamStats::default();
        let mut away = TeamStats::default();
        let mut arena = PlayerArena::new(PlayerRegistry::new(home_players, away_players));
        let mut dropped = 0usize;

        for event in events {
            let (kind, side) = match (event.kind, event.team) {
                (Some(kind), Some(side)) => (kind, side),
                (None, _) => {
                    log::debug!("Dropping event '{}': missing or unknown type", event.id);
                    dropped += 1;
                    continue;
                }
                (_, None) => {
                    log::debug!("Dropping event '{}': missing or unknown team", event.id);
                    dropped += 1;
                    continue;
                }
            };
            log::trace!("Event '{}': {} for {}", event.id, kind, side.as_str());

            let actor = event
                .player_id
                .as_ref()
                .filter(|id| !id.is_empty())
                .and_then(|id| arena.slot(id, Some(side)));
            let team = match side {
                TeamSide::Home => &mut home,
                TeamSide::Away => &mut away,
            };
            let player = arena.summary_mut(actor);

            let handler = handler_for(kind);
            let reception = handler.apply(&self.ctx, team, player, event);
            if let Some(Reception { recipient }) = reception.filter(|r| !r.recipient.is_empty()) {
                let slot = arena.slot(&recipient, Some(side));
                if let Some(receiver) = arena.summary_mut(slot) {
                    record_player(receiver, &[Metric::BallsReceived]);
                }
            }
        }

        log::debug!(
            "Aggregated {} events ({} dropped), {} players tracked",
            events.len(),
            dropped,
            arena.len()
        );

        AggregatedStats {
            home_team_stats: home,
            away_team_stats: away,
            player_stats: arena.into_summaries(),
        }
    }
}

/// Aggregate with the default configuration.
pub fn aggregate_match_events(
    events: &[MatchEvent],
    home_players: &[Player],
    away_players: &[Player],
) -> AggregatedStats {
    EventAggregator::default().aggregate(events, home_players, away_players)
}
