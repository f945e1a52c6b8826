//! # stats_core - Match Event Aggregation Engine
//!
//! Reduces the discrete events logged by match trackers (passes, shots,
//! duels, fouls, pressures, ...) into team and player statistics.
//!
//! ## Features
//! - Deterministic single pass fold over 39 event kinds
//! - Heuristic expected goals (xG) per shot
//! - Progressive pass, final third entry and pass network metrics
//! - Independent per-window aggregation (parallel for long matches)
//! - JSON API for dashboards and exporters
//!
//! ## Example
//!
//! ```rust
//! use stats_core::{aggregate_match_events, EventKind, MatchEvent, Player, TeamSide};
//!
//! let home = vec![Player::new("H1", "Home Player 1")];
//! let events = vec![MatchEvent::new(EventKind::Tackle, TeamSide::Home).with_player("H1")];
//!
//! let stats = aggregate_match_events(&events, &home, &[]);
//! assert_eq!(stats.home_team_stats.tackles, 1);
//! assert_eq!(stats.player_stats[0].player_name, "Home Player 1");
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{aggregate_match_json, aggregate_segments_json, StatsResponse};

// Re-export aggregation entry points
pub use analysis::{
    aggregate_match_events, aggregate_stats_for_segments, estimate_xg, segment_events_by_time,
    EventAggregator, PlayerRegistry, XgModel,
};

pub use config::AnalyticsConfig;
pub use error::{Result, StatsError};

// Re-export data model
pub use models::{
    AggregatedStats, Coordinates, EventKind, MatchEvent, PassLink, Player, PlayerId,
    PlayerStatSummary, ShotEventData, TeamSide, TeamStats,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the JSON response envelope
pub const SCHEMA_VERSION: &str = "1.0";
