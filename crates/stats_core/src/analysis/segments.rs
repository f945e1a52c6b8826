//! Time windows: split a match into fixed intervals and aggregate each one
//! on its own.

use rayon::prelude::*;

use crate::models::{AggregatedStats, MatchEvent, Player};

use super::aggregator::EventAggregator;

/// Segment counts above this are aggregated in parallel.
const PARALLEL_SEGMENT_THRESHOLD: usize = 4;

/// Most windows a single match may be split into.
pub const MAX_SEGMENTS: usize = 10_000;

/// Number of windows of `interval_minutes` covering `match_duration_minutes`.
///
/// `None` when either length is not a finite positive number or the window
/// count falls outside `1..=MAX_SEGMENTS`.
pub fn segment_count(interval_minutes: f64, match_duration_minutes: f64) -> Option<usize> {
    let usable = |minutes: f64| minutes.is_finite() && minutes > 0.0;
    if !usable(interval_minutes) || !usable(match_duration_minutes) {
        return None;
    }

    let count = (match_duration_minutes / interval_minutes).ceil();
    (count >= 1.0 && count <= MAX_SEGMENTS as f64).then_some(count as usize)
}

/// Bucket events into `ceil(duration / interval)` windows by timestamp.
///
/// Returns no windows when there are no events or [`segment_count`] rejects
/// the lengths. Negative timestamps and events past the final whistle are
/// skipped; an event exactly at the final whistle joins the last window.
pub fn segment_events_by_time(
    events: &[MatchEvent],
    interval_minutes: f64,
    match_duration_minutes: f64,
) -> Vec<Vec<MatchEvent>> {
    let count = match segment_count(interval_minutes, match_duration_minutes) {
        Some(count) if !events.is_empty() => count,
        _ => return Vec::new(),
    };

    let interval_secs = interval_minutes * 60.0;
    let duration_secs = match_duration_minutes * 60.0;
    let mut segments: Vec<Vec<MatchEvent>> = vec![Vec::new(); count];

    for event in events {
        let timestamp = event.timestamp;
        if timestamp.is_nan() || timestamp < 0.0 {
            log::debug!("Event '{}': negative timestamp, not segmented", event.id);
            continue;
        }

        let index = (timestamp / interval_secs).floor() as usize;
        if index < count {
            segments[index].push(event.clone());
        } else if timestamp == duration_secs && index == count {
            segments[count - 1].push(event.clone());
        } else {
            log::debug!("Event '{}' at {}s is past the end of the match", event.id, timestamp);
        }
    }

    segments
}

impl EventAggregator {
    /// Aggregate each segment independently. Output order matches input.
    pub fn aggregate_segments(
        &self,
        segments: &[Vec<MatchEvent>],
        home_players: &[Player],
        away_players: &[Player],
    ) -> Vec<AggregatedStats> {
        if segments.len() > PARALLEL_SEGMENT_THRESHOLD {
            segments
                .par_iter()
                .map(|segment| self.aggregate(segment, home_players, away_players))
                .collect()
        } else {
            segments
                .iter()
                .map(|segment| self.aggregate(segment, home_players, away_players))
                .collect()
        }
    }
}

/// Per-segment aggregation with the default configuration.
pub fn aggregate_stats_for_segments(
    segments: &[Vec<MatchEvent>],
    home_players: &[Player],
    away_players: &[Player],
) -> Vec<AggregatedStats> {
    EventAggregator::default().aggregate_segments(segments, home_players, away_players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::aggregate_match_events;
    use crate::models::{EventKind, PlayerId, TeamSide};
    use serde_json::json;

    fn at_minute(kind: EventKind, minute: f64) -> MatchEvent {
        MatchEvent::new(kind, TeamSide::Home)
            .with_player("H1")
            .with_timestamp(minute * 60.0)
    }

    fn rosters() -> (Vec<Player>, Vec<Player>) {
        (vec![Player::new("H1", "Home Player 1")], vec![Player::new("A1", "Away Player 1")])
    }

    #[test]
    fn test_segmenting_rejects_empty_or_bad_lengths() {
        let events = vec![at_minute(EventKind::Foul, 1.0)];
        assert!(segment_events_by_time(&[], 5.0, 90.0).is_empty());
        assert!(segment_events_by_time(&events, 0.0, 90.0).is_empty());
        assert!(segment_events_by_time(&events, 5.0, -1.0).is_empty());
        assert!(segment_events_by_time(&events, f64::NAN, 90.0).is_empty());
    }

    #[test]
    fn test_non_finite_lengths_give_no_windows() {
        let events = vec![at_minute(EventKind::Foul, 90.0), at_minute(EventKind::Foul, 1.0)];
        assert!(segment_events_by_time(&events, f64::INFINITY, 90.0).is_empty());
        assert!(segment_events_by_time(&events, 15.0, f64::INFINITY).is_empty());
        assert!(segment_events_by_time(&events, 1e-300, 1e300).is_empty());
    }

    #[test]
    fn test_segment_count_bounds() {
        assert_eq!(segment_count(15.0, 90.0), Some(6));
        assert_eq!(segment_count(10.0, 95.0), Some(10));
        assert_eq!(segment_count(120.0, 90.0), Some(1));
        assert_eq!(segment_count(1.0, MAX_SEGMENTS as f64), Some(MAX_SEGMENTS));
        assert_eq!(segment_count(1.0, MAX_SEGMENTS as f64 + 1.0), None);
        assert_eq!(segment_count(1e-9, 90.0), None);
        assert_eq!(segment_count(f64::INFINITY, 90.0), None);
        assert_eq!(segment_count(1e300, 1e-300), None);
    }

    #[test]
    fn test_segments_by_interval() {
        let events = vec![
            at_minute(EventKind::Foul, 0.0).with_id("a"),
            at_minute(EventKind::Foul, 4.99).with_id("b"),
            at_minute(EventKind::Foul, 5.0).with_id("c"),
            at_minute(EventKind::Foul, 14.0).with_id("d"),
        ];
        let segments = segment_events_by_time(&events, 5.0, 15.0);
        let ids: Vec<Vec<&str>> = segments
            .iter()
            .map(|segment| segment.iter().map(|e| e.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_segment_edges() {
        let events = vec![
            at_minute(EventKind::Foul, 90.0).with_id("whistle"),
            at_minute(EventKind::Foul, 92.0).with_id("late"),
            MatchEvent::new(EventKind::Foul, TeamSide::Home).with_timestamp(-3.0).with_id("early"),
        ];
        let segments = segment_events_by_time(&events, 15.0, 90.0);
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[5].len(), 1);
        assert_eq!(segments[5][0].id, "whistle");
        assert_eq!(segments.iter().map(Vec::len).sum::<usize>(), 1);
    }

    #[test]
    fn test_partial_last_window_keeps_overflow() {
        // 95 minutes in 10 minute windows leaves room up to minute 100
        let events = vec![at_minute(EventKind::Foul, 97.0)];
        let segments = segment_events_by_time(&events, 10.0, 95.0);
        assert_eq!(segments.len(), 10);
        assert_eq!(segments[9].len(), 1);
    }

    #[test]
    fn test_empty_input_gives_no_results() {
        let (home, away) = rosters();
        assert!(aggregate_stats_for_segments(&[], &home, &away).is_empty());
    }

    #[test]
    fn test_empty_segment_is_zeroed() {
        let (home, away) = rosters();
        let results = aggregate_stats_for_segments(&[Vec::new()], &home, &away);
        assert_eq!(results, vec![AggregatedStats::default()]);
    }

    #[test]
    fn test_no_leakage_between_segments() {
        let (home, away) = rosters();
        let first = vec![
            at_minute(EventKind::Shot, 1.0).with_data(json!({"on_target": true})),
            at_minute(EventKind::Tackle, 2.0),
        ];
        let second = vec![at_minute(EventKind::Tackle, 6.0)];
        let results = aggregate_stats_for_segments(&[first.clone(), second.clone()], &home, &away);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], aggregate_match_events(&first, &home, &away));
        assert_eq!(results[1], aggregate_match_events(&second, &home, &away));

        let h1 = results[1].player(&PlayerId::from("H1")).unwrap();
        assert_eq!((h1.shots, h1.tackles), (0, 1));
    }

    #[test]
    fn test_parallel_path_preserves_order() {
        let (home, away) = rosters();
        let segments: Vec<Vec<MatchEvent>> = (0..12)
            .map(|n| (0..n).map(|_| at_minute(EventKind::Foul, 1.0)).collect())
            .collect();
        let results = aggregate_stats_for_segments(&segments, &home, &away);
        let fouls: Vec<u32> = results.iter().map(|r| r.home_team_stats.fouls_committed).collect();
        assert_eq!(fouls, (0..12).collect::<Vec<u32>>());
    }
}
