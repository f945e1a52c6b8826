//! JSON entry points for hosts that speak JSON (dashboards, exporters, the
//! CLI).
//!
//! Requests are decoded strictly at the envelope level and leniently per
//! event: a request without `events` or rosters is rejected, while a single
//! undecodable event is dropped and the rest are aggregated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::analysis::{segment_count, segment_events_by_time, EventAggregator, MAX_SEGMENTS};
use crate::config::AnalyticsConfig;
use crate::error::{Result, StatsError};
use crate::models::{AggregatedStats, MatchEvent, Player};
use crate::SCHEMA_VERSION;

/// Whole-match aggregation request.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateRequest {
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub home_players: Option<Vec<Player>>,
    #[serde(default)]
    pub away_players: Option<Vec<Player>>,
    /// Overrides the environment/default configuration
    #[serde(default)]
    pub config: Option<AnalyticsConfig>,
}

/// Windowed aggregation request: either pre-split `segments`, or `events`
/// plus `interval_minutes` and `match_duration_minutes`.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsRequest {
    #[serde(default)]
    pub segments: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub interval_minutes: Option<f64>,
    #[serde(default)]
    pub match_duration_minutes: Option<f64>,
    #[serde(default)]
    pub home_players: Option<Vec<Player>>,
    #[serde(default)]
    pub away_players: Option<Vec<Player>>,
    #[serde(default)]
    pub config: Option<AnalyticsConfig>,
}

/// Envelope of every successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub data: T,
}

impl<T> StatsResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentsData {
    /// Window length when the server did the splitting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_minutes: Option<f64>,
    pub segments: Vec<AggregatedStats>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| StatsError::InvalidRequest(format!("missing field `{}`", field)))
}

fn resolve_config(config: Option<AnalyticsConfig>) -> Result<AnalyticsConfig> {
    match config {
        Some(config) => {
            config.validate()?;
            Ok(config)
        }
        None => Ok(AnalyticsConfig::from_env_or_default()),
    }
}

/// Decode events one by one, skipping those that do not decode.
pub fn decode_events(raw: Vec<Value>) -> Vec<MatchEvent> {
    let total = raw.len();
    let events: Vec<MatchEvent> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping undecodable event #{}: {}", index, e);
                None
            }
        })
        .collect();
    if events.len() < total {
        debug!("Decoded {} of {} events", events.len(), total);
    }
    events
}

/// Aggregate a whole match.
pub fn aggregate_match(request: AggregateRequest) -> Result<AggregatedStats> {
    let events = decode_events(required(request.events, "events")?);
    let home_players = required(request.home_players, "home_players")?;
    let away_players = required(request.away_players, "away_players")?;
    let config = resolve_config(request.config)?;

    Ok(EventAggregator::new(&config).aggregate(&events, &home_players, &away_players))
}

/// Aggregate each window of a match.
pub fn aggregate_segments(request: SegmentsRequest) -> Result<SegmentsData> {
    let home_players = required(request.home_players, "home_players")?;
    let away_players = required(request.away_players, "away_players")?;
    let config = resolve_config(request.config)?;

    let (segments, interval_minutes): (Vec<Vec<MatchEvent>>, Option<f64>) =
        match (request.segments, request.events) {
            (Some(segments), _) => (segments.into_iter().map(decode_events).collect(), None),
            (None, Some(events)) => {
                let interval = required(request.interval_minutes, "interval_minutes")?;
                let duration = required(request.match_duration_minutes, "match_duration_minutes")?;
                if segment_count(interval, duration).is_none() {
                    return Err(StatsError::InvalidRequest(format!(
                        "invalid segment lengths: {} minute windows over {} minutes (at most {} segments)",
                        interval, duration, MAX_SEGMENTS
                    )));
                }
                let events = decode_events(events);
                (segment_events_by_time(&events, interval, duration), Some(interval))
            }
            (None, None) => {
                return Err(StatsError::InvalidRequest(
                    "expected `segments` or `events` with `interval_minutes`".to_string(),
                ))
            }
        };

    let stats =
        EventAggregator::new(&config).aggregate_segments(&segments, &home_players, &away_players);
    Ok(SegmentsData { interval_minutes, segments: stats })
}

/// JSON in, JSON out: [`aggregate_match`] wrapped in a [`StatsResponse`].
pub fn aggregate_match_json(request_json: &str) -> Result<String> {
    info!("Processing match aggregation request");
    let request: AggregateRequest = serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse AggregateRequest: {}", e);
        e
    })?;

    let stats = aggregate_match(request).map_err(|e| {
        warn!(code = e.code(), "Match aggregation request rejected: {}", e);
        e
    })?;
    info!("Aggregated match: {} players", stats.player_stats.len());

    Ok(serde_json::to_string(&StatsResponse::new(stats))?)
}

/// JSON in, JSON out: [`aggregate_segments`] wrapped in a [`StatsResponse`].
pub fn aggregate_segments_json(request_json: &str) -> Result<String> {
    info!("Processing segment aggregation request");
    let request: SegmentsRequest = serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse SegmentsRequest: {}", e);
        e
    })?;

    let data = aggregate_segments(request).map_err(|e| {
        warn!(code = e.code(), "Segment aggregation request rejected: {}", e);
        e
    })?;
    info!("Aggregated {} segments", data.segments.len());

    Ok(serde_json::to_string(&StatsResponse::new(data))?)
}
