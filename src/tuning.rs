//! Data-driven physics constants
//!
//! Defaults come from [`crate::consts`]. An optional JSON file can override
//! any subset of fields; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and scoring parameters used by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    pub acc: f32,
    pub max_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub damping: f32,
    pub ground_friction: f32,

    // === Tether ===
    pub attach_length: f32,
    pub attach_rest_length: f32,
    pub spring_constant: f32,

    // === Boost ===
    pub boost_coefficient: f32,
    pub boost_decay: f32,
    pub boost_limit: f32,
    pub ejection_coefficient: f32,

    // === Goal window ===
    pub goal_offset_x: f32,
    pub goal_threshold_x: f32,
    pub goal_threshold_y: f32,

    // === Score ===
    pub score_decay_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acc: ACC,
            max_speed: MAX_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            damping: DAMPING,
            ground_friction: GROUND_FRICTION,

            attach_length: ATTACH_LENGTH,
            attach_rest_length: ATTACH_REST_LENGTH,
            spring_constant: SPRING_CONSTANT,

            boost_coefficient: BOOST_COEFFICIENT,
            boost_decay: BOOST_DECAY,
            boost_limit: BOOST_LIMIT,
            ejection_coefficient: EJECTION_COEFFICIENT,

            goal_offset_x: GOAL_OFFSET_X,
            goal_threshold_x: GOAL_THRESHOLD_X,
            goal_threshold_y: GOAL_THRESHOLD_Y,

            score_decay_interval: SCORE_DECAY_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load tuning from `path`, falling back to defaults.
    ///
    /// A missing file is not an error. A parse failure is logged and ignored.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default tuning", path.display());
                Self::default()
            }
        }
    }

    /// Keep values that feed clamps and modulo arithmetic in a usable range
    pub fn sanitized(mut self) -> Self {
        self.score_decay_interval = self.score_decay_interval.max(1);
        self.boost_limit = self.boost_limit.abs();
        self.max_speed = self.max_speed.abs();
        self
    }
}
