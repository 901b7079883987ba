//! Fixed timestep simulation tick
//!
//! Runs the swing physics, detects goal contact and drives the level
//! lifecycle. Level transitions are split out of [`tick`] so the driver can
//! hold the clock still while a splash is on screen.

use serde::{Deserialize, Serialize};

use super::state::{Attachment, DotId, GamePhase, GameState, Goal, LevelResult, Player};
use super::swing;
use crate::Positioned;
use crate::error::LevelError;
use crate::level::{LevelHint, LevelSet};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    /// Climb/descend on the tether (ignored while free)
    pub up: bool,
    pub down: bool,
    /// Edge-triggered: jump if on the ground
    pub jump: bool,
    /// Edge-triggered: release the tether, or grab the nearest dot
    pub toggle_attach: bool,
}

/// What happened during one tick (for audio/visual feedback)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    /// Tether overstretched and broke
    pub snapped: Option<DotId>,
    pub attached: Option<DotId>,
    /// Player let go of the tether
    pub released: Option<Attachment>,
    pub jumped: bool,
    /// Goal reached; the level has already been unloaded
    pub finished: Option<LevelResult>,
}

/// Level transition chosen after a finish
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Next level is loaded and playable once its hints are shown
    Next {
        level_index: usize,
        level_score: u32,
        hints: Vec<LevelHint>,
    },
    /// No levels remain
    Won { total_score: u64 },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    // Nothing moves outside of play
    if state.phase != GamePhase::Playing {
        return events;
    }

    events.snapped = swing::step(&mut state.player, &state.level, input, &state.tuning);
    events.finished = check_for_finish(state);

    if events.finished.is_none() {
        if input.jump {
            events.jumped = swing::jump(&mut state.player, &state.tuning);
        }
        if input.toggle_attach {
            if state.player.is_attached() {
                events.released = swing::detach(&mut state.player, &state.tuning);
            } else {
                events.attached =
                    swing::attach_nearest(&mut state.player, &state.level, &state.tuning);
            }
        }
    }

    state.advance_clock();
    events
}

/// Is the player inside the goal's tolerance window?
pub fn goal_reached(goal: &Goal, player: &Player, t: &Tuning) -> bool {
    let g = goal.pos();
    (g.x + t.goal_offset_x - player.pos.x).abs() < t.goal_threshold_x
        && (g.y - player.pos.y).abs() < t.goal_threshold_y
}

/// Finish the level if the player touches any goal.
///
/// Only fires while playing, so repeated calls in one tick cannot finish the
/// same level twice.
pub fn check_for_finish(state: &mut GameState) -> Option<LevelResult> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let reached = state
        .level
        .goals
        .iter()
        .any(|goal| goal_reached(goal, &state.player, &state.tuning));
    if !reached {
        return None;
    }

    let result = state.unload_level();
    state.phase = GamePhase::Finishing;
    log::info!(
        "Level {} finished with score {} (total {})",
        result.level_index + 1,
        result.score,
        result.total_score
    );
    Some(result)
}

/// Load the level at `index` and start playing it
pub fn start_level(
    state: &mut GameState,
    levels: &LevelSet,
    index: usize,
) -> Result<Vec<LevelHint>, LevelError> {
    let spec = levels.load(index)?;
    Ok(state.load_level(index, &spec))
}

/// Move on from a finished level: load the next one or declare victory.
///
/// Returns `Ok(None)` unless the state is `Finishing`.
pub fn advance_level(
    state: &mut GameState,
    levels: &LevelSet,
) -> Result<Option<Advance>, LevelError> {
    if state.phase != GamePhase::Finishing {
        return Ok(None);
    }

    let level_score = state.last_result.map(|r| r.score).unwrap_or(state.score);
    let next = state.level_index + 1;

    if next >= levels.len() {
        state.phase = GamePhase::Won;
        log::info!("All levels cleared, total score {}", state.total_score);
        return Ok(Some(Advance::Won {
            total_score: state.total_score,
        }));
    }

    state.phase = GamePhase::Loading;
    let hints = start_level(state, levels, next)?;
    Ok(Some(Advance::Next {
        level_index: next,
        level_score,
        hints,
    }))
}
