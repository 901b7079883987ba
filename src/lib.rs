//! Dot Swing - a tether-swing platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swing physics, level state machine)
//! - `level`: Level file parsing and the level list
//! - `tuning`: Data-driven physics constants
//! - `driver`: Fixed-tick game loop around an external frontend

pub mod driver;
pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::LevelError;
pub use level::{LevelHint, LevelSet, LevelSpec};
pub use tuning::Tuning;

use glam::Vec2;

/// Default tuning values (world units are pixels, time is ticks)
pub mod consts {
    /// Horizontal/vertical input acceleration per tick
    pub const ACC: f32 = 0.5;
    /// Input acceleration stops once speed reaches this
    pub const MAX_SPEED: f32 = 10.0;
    pub const JUMP_SPEED: f32 = 10.0;
    /// Gravity (positive y is down, ground at y = 0)
    pub const GRAVITY: f32 = 0.3;
    /// Global velocity damping applied every tick
    pub const DAMPING: f32 = 0.98;
    /// Friction on the ground while no horizontal key is held
    pub const GROUND_FRICTION: f32 = 0.9;

    /// Tether snaps beyond this distance; attach requires being closer
    pub const ATTACH_LENGTH: f32 = 200.0;
    /// Tether length with zero spring force
    pub const ATTACH_REST_LENGTH: f32 = ATTACH_LENGTH / 3.0;
    pub const SPRING_CONSTANT: f32 = 0.0005;

    /// Boost gained per radian of swing
    pub const BOOST_COEFFICIENT: f32 = 3.0;
    pub const BOOST_DECAY: f32 = 0.999;
    pub const BOOST_LIMIT: f32 = 100.0;
    /// Detach velocity scale per unit of |boost|
    pub const EJECTION_COEFFICIENT: f32 = 0.1;

    /// Goal tolerance window (goal sprite is offset from its anchor)
    pub const GOAL_OFFSET_X: f32 = 48.0;
    pub const GOAL_THRESHOLD_X: f32 = 80.0;
    pub const GOAL_THRESHOLD_Y: f32 = 32.0;

    /// Score drops by one every this many ticks
    pub const SCORE_DECAY_INTERVAL: u64 = 10;

    /// Ground plane height
    pub const GROUND_Y: f32 = 0.0;
}

/// Anything placed in world space
pub trait Positioned {
    fn pos(&self) -> Vec2;
}

/// Euclidean distance between two entities
#[inline]
pub fn distance(a: &impl Positioned, b: &impl Positioned) -> f32 {
    a.pos().distance(b.pos())
}

/// Angle of the vector pointing from `to` towards `from` (radians, atan2 range)
#[inline]
pub fn direction(from: &impl Positioned, to: &impl Positioned) -> f32 {
    let d = from.pos() - to.pos();
    d.y.atan2(d.x)
}

/// Wrap an angle difference into one turn around zero.
///
/// Only corrects once: inputs are differences of two atan2 results, so they
/// never exceed 2π in magnitude.
#[inline]
pub fn wrap_angle_delta(delta: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if delta > PI {
        delta - TAU
    } else if delta < -PI {
        delta + TAU
    } else {
        delta
    }
}

impl Positioned for Vec2 {
    fn pos(&self) -> Vec2 {
        *self
    }
}
