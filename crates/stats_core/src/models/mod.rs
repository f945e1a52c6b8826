pub mod events;
pub mod player;
pub mod stats;

pub use events::{
    CardEventData, Coordinates, EventKind, MatchEvent, PassEventData, PlayerId,
    PressureEventData, ShotEventData, TeamSide,
};
pub use player::{placeholder_name, Player};
pub use stats::{AggregatedStats, PassLink, PlayerStatSummary, TeamStats};
