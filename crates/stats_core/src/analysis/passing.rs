//! Pass geometry: final third entries and progressive passes.
//!
//! Zones (attack towards increasing x, default 105m pitch):
//!
//! | Origin x      | Progressive when                  |
//! |---------------|-----------------------------------|
//! | < 52.5 (own)  | gain >= 30m                       |
//! | 52.5 .. 70    | gain >= 15m                       |
//! | >= 35         | also when the pass ends in the box |

use crate::config::{PassingConfig, PitchConfig};
use crate::models::Coordinates;

/// Classification of a completed pass with known start and end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassShape {
    pub progressive: bool,
    pub to_final_third: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PassClassifier {
    pub passing: PassingConfig,
    pub pitch: PitchConfig,
}

impl PassClassifier {
    pub fn new(passing: PassingConfig, pitch: PitchConfig) -> Self {
        Self { passing, pitch }
    }

    pub fn final_third_x(&self) -> f64 {
        self.pitch.length_m * self.passing.final_third_ratio
    }

    pub fn classify(&self, start: Coordinates, end: Coordinates) -> PassShape {
        PassShape {
            progressive: self.is_progressive(start, end),
            to_final_third: self.enters_final_third(start, end),
        }
    }

    pub fn enters_final_third(&self, start: Coordinates, end: Coordinates) -> bool {
        let line = self.final_third_x();
        start.x < line && end.x >= line
    }

    pub fn is_progressive(&self, start: Coordinates, end: Coordinates) -> bool {
        let gain = end.x - start.x;
        let by_distance = if start.x < self.pitch.half_x() {
            gain >= self.passing.own_half_gain_m
        } else if start.x < self.final_third_x() {
            gain >= self.passing.middle_gain_m
        } else {
            false
        };

        by_distance || (start.x >= self.passing.box_entry_min_origin_x_m && self.in_penalty_box(end))
    }

    /// Simplified box: full depth from the goal line, centred band across.
    pub fn in_penalty_box(&self, point: Coordinates) -> bool {
        point.x >= self.pitch.length_m - self.passing.box_depth_m
            && (point.y - self.pitch.center_y()).abs() <= self.passing.box_half_width_m
    }
}
