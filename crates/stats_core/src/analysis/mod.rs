//! Aggregation pipeline: player resolution, shot and pass models, the metric
//! registry, per-kind handlers, the event fold and time segments.

pub mod aggregator;
pub mod handlers;
pub mod metrics;
pub mod passing;
pub mod registry;
pub mod segments;
pub mod xg;

pub use aggregator::{aggregate_match_events, EventAggregator};
pub use handlers::{handler_for, Handler, HandlerContext, Reception};
pub use metrics::{Metric, MetricScope};
pub use passing::{PassClassifier, PassShape};
pub use registry::{PlayerIdentity, PlayerRegistry};
pub use segments::{
    aggregate_stats_for_segments, segment_count, segment_events_by_time, MAX_SEGMENTS,
};
pub use xg::{estimate_xg, XgModel};
