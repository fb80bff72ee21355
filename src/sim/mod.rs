//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, no self-scheduling
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use config::{BounceMode, Config, Difficulty};
pub use state::{Ball, GameState, Paddle, Score, SessionState, Side};
pub use tick::{Command, GameEvent, TickInput, apply_command, step};
