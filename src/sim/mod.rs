//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only, one call to `tick` per frame
//! - No rendering, audio, input polling or sleeping
//! - Level transitions happen only when the driver asks for them

pub mod state;
pub mod swing;
pub mod tick;
pub mod view;

pub use state::{
    Attachment, Dot, DotId, GamePhase, GameState, Goal, Level, LevelResult, Player,
};
pub use swing::{accumulate_boost, attach, attach_nearest, detach, jump, step};
pub use tick::{
    Advance, TickEvents, TickInput, advance_level, check_for_finish, goal_reached, start_level,
    tick,
};
pub use view::{FrameView, TetherView};
