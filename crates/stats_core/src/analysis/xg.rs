//! # Expected Goals (xG) Model
//!
//! Additive heuristic: start from an average shot value, adjust for the
//! situation, technique, body part, assist and distance to goal, then clamp.
//! Penalties short-circuit to a fixed value.
//!
//! Attack is always towards x = pitch length; the goal centre sits at
//! (length, width / 2).

use crate::config::{PitchConfig, XgConfig};
use crate::models::{Coordinates, ShotEventData};

/// Shot model bound to a pitch geometry.
#[derive(Debug, Clone, Default)]
pub struct XgModel {
    pub xg: XgConfig,
    pub pitch: PitchConfig,
}

impl XgModel {
    pub fn new(xg: XgConfig, pitch: PitchConfig) -> Self {
        Self { xg, pitch }
    }

    pub fn goal_center(&self) -> Coordinates {
        Coordinates::new(self.pitch.length_m, self.pitch.center_y())
    }

    /// Goal probability of a shot, within `[min, max]` unless it is a penalty.
    pub fn estimate(&self, shot: &ShotEventData, coordinates: Option<Coordinates>) -> f64 {
        let cfg = &self.xg;
        let situation = shot.situation.as_deref();
        let technique = shot.shot_type.as_deref();

        if situation == Some("penalty") {
            return cfg.penalty;
        }

        let mut xg = cfg.base;

        match situation {
            Some("direct_free_kick") => xg += cfg.direct_free_kick,
            Some("corner_related") if technique == Some("header") => xg += cfg.corner_header,
            Some("corner_related") => xg += cfg.corner_other,
            Some("fast_break") => xg += cfg.fast_break,
            _ => {}
        }

        match technique {
            Some("header") if situation != Some("corner_related") => xg += cfg.header,
            Some("volley") => xg += cfg.volley,
            Some("lob") => xg += cfg.lob,
            _ => {}
        }

        if shot.body_part_used.as_deref() == Some("other") {
            xg += cfg.other_body_part;
        }

        match shot.assist_type.as_deref() {
            Some("through_ball") => xg += cfg.through_ball,
            Some("pull_back") | Some("cut_back") => xg += cfg.pull_back,
            Some("cross") => xg += cfg.cross,
            Some("rebound") => xg += cfg.rebound,
            _ => {}
        }

        if let Some(position) = coordinates {
            xg += self.distance_adjustment(position.distance_to(self.goal_center()));
        }

        xg.clamp(cfg.min, cfg.max)
    }

    /// First matching band wins; the very-close band sits behind the close
    /// band and therefore never fires with the default thresholds.
    fn distance_adjustment(&self, distance: f64) -> f64 {
        let cfg = &self.xg;
        if distance > cfg.far_distance_m {
            cfg.far
        } else if distance > cfg.mid_distance_m {
            cfg.mid
        } else if distance < cfg.close_distance_m {
            cfg.close
        } else if distance < cfg.very_close_distance_m {
            cfg.very_close
        } else {
            0.0
        }
    }
}

/// xG with the default model.
pub fn estimate_xg(shot: &ShotEventData, coordinates: Option<Coordinates>) -> f64 {
    XgModel::default().estimate(shot, coordinates)
}
