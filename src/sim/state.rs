//! Game state and core simulation types
//!
//! Everything the tick function reads or mutates lives here; there are no
//! globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Positioned;
use crate::level::{LevelHint, LevelSpec};
use crate::tuning::Tuning;

/// Current phase of the level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level is playable yet (session start, or between levels)
    Loading,
    /// Active gameplay
    Playing,
    /// Goal reached, level unloaded, waiting for the driver to advance
    Finishing,
    /// Last level cleared
    Won,
}

/// Handle to a dot in the loaded level (index into `Level::dots`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DotId(pub usize);

/// Static tether anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pos: Vec2,
}

impl Dot {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}

impl Positioned for Dot {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

/// Static level target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pos: Vec2,
}

impl Goal {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}

impl Positioned for Goal {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

/// Live tether between the player and a dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub dot: DotId,
    /// Swing momentum, kept within ±boost_limit
    pub boost: f32,
    /// Direction from the anchor to the player on the previous tick
    pub last_direction: f32,
}

impl Attachment {
    /// Tether color for rendering, brighter blue the more boost is stored
    pub fn color(&self) -> [u8; 3] {
        let b = self.boost.abs();
        [
            (170.0 - b).clamp(0.0, 255.0) as u8,
            20,
            (50.0 + b * 2.0).clamp(0.0, 255.0) as u8,
        ]
    }

    /// Tether line width for rendering
    pub fn line_width(&self) -> f32 {
        (2.0 + self.boost.abs() * 0.05).trunc()
    }
}

/// The player-controlled point mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Latched by the ground clamp, cleared only by a jump
    pub on_ground: bool,
    pub attachment: Option<Attachment>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            on_ground: true,
            attachment: None,
        }
    }
}

impl Player {
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Back to the origin, at rest, untethered
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::ZERO;
        self.attachment = None;
    }
}

impl Positioned for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

/// Entities of the currently loaded level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub index: usize,
    pub dots: Vec<Dot>,
    pub goals: Vec<Goal>,
}

impl Level {
    pub fn from_spec(index: usize, spec: &LevelSpec) -> Self {
        Self {
            index,
            dots: spec.dots.iter().copied().map(Dot::new).collect(),
            goals: spec.goals.iter().copied().map(Goal::new).collect(),
        }
    }

    pub fn dot(&self, id: DotId) -> Option<&Dot> {
        self.dots.get(id.0)
    }

    /// Closest dot to `pos` by squared distance (first one wins ties)
    pub fn nearest_dot(&self, pos: Vec2) -> Option<DotId> {
        let mut best: Option<(usize, f32)> = None;
        for (i, dot) in self.dots.iter().enumerate() {
            let d = dot.pos.distance_squared(pos);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| DotId(i))
    }
}

/// Outcome of a completed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level_index: usize,
    pub score: u32,
    pub total_score: u64,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Index of the level being played (or just finished)
    pub level_index: usize,
    pub level: Level,
    pub player: Player,
    /// Per-level score, decays over time, never negative
    pub score: u32,
    /// Sum of the final scores of every cleared level
    pub total_score: u64,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Set when the current level finishes, consumed by the driver
    pub last_result: Option<LevelResult>,
}

impl GameState {
    /// New session with no level loaded
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: GamePhase::Loading,
            level_index: 0,
            level: Level::default(),
            player: Player::default(),
            score: 0,
            total_score: 0,
            time_ticks: 0,
            last_result: None,
        }
    }

    /// Install a parsed level and start playing it.
    ///
    /// Returns the level's hints so the driver can show them before ticking.
    pub fn load_level(&mut self, index: usize, spec: &LevelSpec) -> Vec<LevelHint> {
        self.phase = GamePhase::Loading;
        self.level_index = index;
        self.level = Level::from_spec(index, spec);
        self.player.attachment = None;
        self.score = spec.start_score.max(0) as u32;
        self.last_result = None;
        self.phase = GamePhase::Playing;

        log::info!(
            "Level {} loaded: {} dots, {} goals, start score {}",
            index + 1,
            self.level.dots.len(),
            self.level.goals.len(),
            self.score
        );

        spec.hints.clone()
    }

    /// Drop level entities, reset the player and bank the level score
    pub fn unload_level(&mut self) -> LevelResult {
        self.level = Level::default();
        self.player.reset();
        self.total_score += u64::from(self.score);

        let result = LevelResult {
            level_index: self.level_index,
            score: self.score,
            total_score: self.total_score,
        };
        self.last_result = Some(result);
        result
    }

    /// Decrement score on every decay interval (floored at zero)
    pub fn advance_clock(&mut self) {
        self.time_ticks += 1;
        if self.time_ticks % self.tuning.score_decay_interval == 0 {
            self.score = self.score.saturating_sub(1);
        }
    }
}
