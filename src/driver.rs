//! Fixed-tick game loop driver
//!
//! Owns the session, asks the frontend for input once per frame, ticks the
//! simulation, tracks the camera and hands the frontend a snapshot to draw.
//! Splash screens are shown by the frontend while the driver withholds ticks,
//! so no simulation time passes during them.

use std::time::Duration;

use glam::Vec2;

use crate::error::LevelError;
use crate::level::{LevelHint, LevelSet};
use crate::sim::{
    Advance, FrameView, GameState, TickEvents, TickInput, advance_level, start_level, tick,
};
use crate::tuning::Tuning;

/// Full-stop message between stretches of play
#[derive(Debug, Clone, PartialEq)]
pub enum Splash {
    /// Level hint, shown before the level becomes playable
    Hint(LevelHint),
    /// Shown between levels; `next_level` is 1-based
    LevelComplete { next_level: usize, level_score: u32 },
    /// Shown once after the final level
    Victory { total_score: u64 },
}

impl Splash {
    pub fn title(&self) -> String {
        match self {
            Splash::Hint(hint) => hint.title.clone(),
            Splash::LevelComplete { next_level, .. } => {
                format!("Congratulations! Loading level {}", next_level)
            }
            Splash::Victory { .. } => "You won the game!".to_string(),
        }
    }

    pub fn subtitle(&self) -> Option<String> {
        match self {
            Splash::Hint(hint) => hint.subtitle.clone(),
            Splash::LevelComplete { level_score, .. } => {
                Some(format!("Level score: {}", level_score))
            }
            Splash::Victory { total_score } => Some(format!("Total score: {}", total_score)),
        }
    }

    /// How long the frontend should keep the splash up
    pub fn hold(&self) -> Duration {
        match self {
            Splash::Hint(_) => Duration::from_secs(2),
            Splash::LevelComplete { .. } => Duration::from_secs(1),
            Splash::Victory { .. } => Duration::from_secs(5),
        }
    }
}

/// External collaborator: input, drawing, splashes and sound
pub trait Frontend {
    /// Input for the next tick, or `None` to quit.
    ///
    /// Windowed frontends pace the loop here (one call per display frame).
    fn poll_input(&mut self) -> Option<TickInput>;

    /// Draw one frame; `camera` is the world position of the top-left corner
    fn present(&mut self, view: &FrameView, camera: Vec2, events: &TickEvents);

    /// Show a splash, blocking for `splash.hold()`
    fn splash(&mut self, splash: &Splash);
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every level cleared
    Won { total_score: u64 },
    /// Frontend stopped asking for ticks
    Quit { total_score: u64 },
}

/// Camera offset that centres `target` in a `viewport`-sized screen
pub fn follow_camera(target: Vec2, viewport: Vec2) -> Vec2 {
    target - viewport / 2.0
}

/// Owns one play session
pub struct Driver {
    state: GameState,
    levels: LevelSet,
    viewport: Vec2,
    camera: Vec2,
}

impl Driver {
    pub fn new(tuning: Tuning, levels: LevelSet, viewport: Vec2) -> Self {
        Self {
            state: GameState::new(tuning),
            levels,
            viewport,
            camera: follow_camera(Vec2::ZERO, viewport),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Load the starting level and show its hints
    pub fn start<F: Frontend>(&mut self, frontend: &mut F, index: usize) -> Result<(), LevelError> {
        let hints = start_level(&mut self.state, &self.levels, index)?;
        show_hints(frontend, hints);
        Ok(())
    }

    /// Run one frame with the given input.
    ///
    /// Returns the outcome once the final level is cleared.
    pub fn frame<F: Frontend>(
        &mut self,
        frontend: &mut F,
        input: &TickInput,
    ) -> Result<Option<Outcome>, LevelError> {
        let events = tick(&mut self.state, input);

        if events.finished.is_some() {
            match advance_level(&mut self.state, &self.levels)? {
                Some(Advance::Next {
                    level_index,
                    level_score,
                    hints,
                }) => {
                    frontend.splash(&Splash::LevelComplete {
                        next_level: level_index + 1,
                        level_score,
                    });
                    show_hints(frontend, hints);
                }
                Some(Advance::Won { total_score }) => {
                    frontend.splash(&Splash::Victory { total_score });
                    return Ok(Some(Outcome::Won { total_score }));
                }
                None => {}
            }
        }

        self.camera = follow_camera(self.state.player.pos, self.viewport);
        frontend.present(&FrameView::capture(&self.state), self.camera, &events);
        Ok(None)
    }

    /// Play from level `start` until victory or quit
    pub fn run<F: Frontend>(mut self, frontend: &mut F, start: usize) -> Result<Outcome, LevelError> {
        self.start(frontend, start)?;

        while let Some(input) = frontend.poll_input() {
            if let Some(outcome) = self.frame(frontend, &input)? {
                return Ok(outcome);
            }
        }

        log::info!("Quit with total score {}", self.state.total_score);
        Ok(Outcome::Quit {
            total_score: self.state.total_score,
        })
    }
}

fn show_hints<F: Frontend>(frontend: &mut F, hints: Vec<LevelHint>) {
    for hint in hints {
        frontend.splash(&Splash::Hint(hint));
    }
}
