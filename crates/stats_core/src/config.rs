//! # Analytics Configuration
//!
//! Central home for every tuning constant used by the aggregation core.
//! `AnalyticsConfig::default()` reproduces the reference model exactly;
//! partial JSON files may override individual values.
//!
//! | Section   | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | `pitch`   | Pitch dimensions in metres (105 x 68)            |
//! | `xg`      | Shot model base rate, adjustments, distance bands |
//! | `passing` | Final third line, progressive thresholds, box    |
//! | `shots`   | Dangerous shot threshold                         |
//!
//! ## Usage
//!
//! ```rust
//! use stats_core::config::AnalyticsConfig;
//!
//! let config = AnalyticsConfig::default();
//! assert_eq!(config.pitch.length_m, 105.0);
//!
//! let tuned = AnalyticsConfig::from_json_str(r#"{"shots": {"dangerous_xg": 0.15}}"#).unwrap();
//! assert_eq!(tuned.shots.dangerous_xg, 0.15);
//! assert_eq!(tuned.xg.base, 0.08);
//! ```
//!
//! ## Environment Variables
//!
//! - `MATCH_STATS_CONFIG`: path to a JSON config file

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Result, StatsError};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "MATCH_STATS_CONFIG";

/// Full analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub pitch: PitchConfig,
    pub xg: XgConfig,
    pub passing: PassingConfig,
    pub shots: ShotConfig,
}

/// Pitch dimensions. Attack is always towards increasing x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub length_m: f64,
    pub width_m: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self { length_m: 105.0, width_m: 68.0 }
    }
}

impl PitchConfig {
    pub fn half_x(&self) -> f64 {
        self.length_m / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.width_m / 2.0
    }
}

/// Heuristic shot model constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XgConfig {
    /// Average value of an unremarkable shot
    pub base: f64,
    /// Fixed value for penalties, bypasses every other rule
    pub penalty: f64,
    pub min: f64,
    pub max: f64,

    // Situation
    pub direct_free_kick: f64,
    pub corner_header: f64,
    pub corner_other: f64,
    pub fast_break: f64,

    // Technique
    pub header: f64,
    pub volley: f64,
    pub lob: f64,

    // Body part
    pub other_body_part: f64,

    // Assist type
    pub through_ball: f64,
    pub pull_back: f64,
    pub cross: f64,
    pub rebound: f64,

    // Distance bands, first match wins
    pub far_distance_m: f64,
    pub far: f64,
    pub mid_distance_m: f64,
    pub mid: f64,
    pub close_distance_m: f64,
    pub close: f64,
    pub very_close_distance_m: f64,
    pub very_close: f64,
}

impl Default for XgConfig {
    fn default() -> Self {
        Self {
            base: 0.08,
            penalty: 0.76,
            min: 0.01,
            max: 0.95,
            direct_free_kick: 0.04,
            corner_header: 0.05,
            corner_other: 0.02,
            fast_break: 0.03,
            header: -0.01,
            volley: -0.01,
            lob: -0.02,
            other_body_part: -0.02,
            through_ball: 0.06,
            pull_back: 0.05,
            cross: 0.01,
            rebound: 0.04,
            far_distance_m: 25.0,
            far: -0.03,
            mid_distance_m: 18.0,
            mid: -0.01,
            close_distance_m: 10.0,
            close: 0.05,
            very_close_distance_m: 5.0,
            very_close: 0.10,
        }
    }
}

/// Pass classification geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassingConfig {
    /// Final third starts at this fraction of the pitch length
    pub final_third_ratio: f64,
    /// Minimum forward gain for passes starting in the own half
    pub own_half_gain_m: f64,
    /// Minimum forward gain for passes starting between halfway and the final third
    pub middle_gain_m: f64,
    /// Passes into the box only count as progressive from beyond this x
    pub box_entry_min_origin_x_m: f64,
    pub box_depth_m: f64,
    pub box_half_width_m: f64,
}

impl Default for PassingConfig {
    fn default() -> Self {
        Self {
            final_third_ratio: 2.0 / 3.0,
            own_half_gain_m: 30.0,
            middle_gain_m: 15.0,
            box_entry_min_origin_x_m: 35.0,
            box_depth_m: 16.5,
            box_half_width_m: 20.16,
        }
    }
}

/// Shot categorisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Shots at or above this xG are dangerous
    pub dangerous_xg: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self { dangerous_xg: 0.1 }
    }
}

impl AnalyticsConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Load from `MATCH_STATS_CONFIG` if set, defaults otherwise.
    ///
    /// A broken config file is reported and replaced by the defaults.
    pub fn from_env_or_default() -> Self {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => match Self::from_path(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Ignoring {} ({}): {}", CONFIG_ENV_VAR, path, err);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pitch.length_m > 0.0 && self.pitch.width_m > 0.0) {
            return Err(StatsError::InvalidConfig(format!(
                "pitch dimensions must be positive, got {} x {}",
                self.pitch.length_m, self.pitch.width_m
            )));
        }
        if !(self.xg.min <= self.xg.max) {
            return Err(StatsError::InvalidConfig(format!(
                "xg.min ({}) exceeds xg.max ({})",
                self.xg.min, self.xg.max
            )));
        }
        if !(0.0..=1.0).contains(&self.passing.final_third_ratio) {
            return Err(StatsError::InvalidConfig(format!(
                "passing.final_third_ratio must be within [0, 1], got {}",
                self.passing.final_third_ratio
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========
