//! Read-only frame snapshot for an external renderer
//!
//! The simulation never draws. A frontend captures a [`FrameView`] after each
//! tick and renders from that alone.

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState};
use crate::Positioned;
use crate::consts::GROUND_Y;

/// Tether line between player and anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TetherView {
    pub from: Vec2,
    pub to: Vec2,
    pub color: [u8; 3],
    pub width: f32,
    pub boost: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub level_index: usize,
    pub player: Vec2,
    pub tether: Option<TetherView>,
    pub dots: Vec<Vec2>,
    pub goals: Vec<Vec2>,
    pub ground_y: f32,
    pub score: u32,
    pub total_score: u64,
    pub tick: u64,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let player = state.player.pos;
        let tether = state.player.attachment.and_then(|a| {
            let dot = state.level.dot(a.dot)?;
            Some(TetherView {
                from: player,
                to: dot.pos(),
                color: a.color(),
                width: a.line_width(),
                boost: a.boost,
            })
        });

        Self {
            phase: state.phase,
            level_index: state.level_index,
            player,
            tether,
            dots: state.level.dots.iter().map(|d| d.pos()).collect(),
            goals: state.level.goals.iter().map(|g| g.pos()).collect(),
            ground_y: GROUND_Y,
            score: state.score,
            total_score: state.total_score,
            tick: state.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelSpec;
    use crate::sim::swing;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_tether() {
        let mut state = GameState::new(Tuning::default());
        state.load_level(
            0,
            &LevelSpec {
                dots: vec![Vec2::new(100.0, -50.0)],
                goals: vec![Vec2::new(900.0, 0.0)],
                start_score: 7,
                hints: Vec::new(),
            },
        );

        let view = FrameView::capture(&state);
        assert!(view.tether.is_none());
        assert_eq!(view.score, 7);
        assert_eq!(view.goals, vec![Vec2::new(900.0, 0.0)]);

        swing::attach_nearest(&mut state.player, &state.level, &state.tuning);
        let view = FrameView::capture(&state);
        let tether = view.tether.unwrap();
        assert_eq!(tether.to, Vec2::new(100.0, -50.0));
        assert_eq!(tether.color, [170, 20, 50]);
        assert_eq!(tether.width, 2.0);
    }
}
