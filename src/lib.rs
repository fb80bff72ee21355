//! DOM Pong - classic two-paddle Pong
//!
//! Core modules:
//! - `sim`: Simulation step (physics, collisions, AI, scoring, session state)
//! - `host`: Tick driver, input sampling and the renderer/notifier sinks
//! - `renderer`: Terminal and DOM projections of a frame
//! - `audio`: Sound feedback for game events
//! - `settings`: Player preferences for the host

pub mod audio;
pub mod error;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use host::{Frame, Match, Notifier, Renderer};
pub use settings::Settings;
pub use sim::{Config, GameEvent, GameState, TickInput, step};

/// Game configuration constants
pub mod consts {
    /// Host tick length (one display refresh at 60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Longest frame gap the host will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;

    /// Ball defaults (units per tick)
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_BASE_SPEED: f32 = 6.0;
    pub const BALL_MAX_SPEED: f32 = 20.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_HIT_MULTIPLIER: f32 = 1.05;
    /// Steepest exit angle off a paddle edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Steepest serve angle (45 degrees)
    pub const MAX_SERVE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Speed ramp
    pub const RAMP_INCREMENT: f32 = 0.0005;
    pub const RAMP_MAX: f32 = 2.5;

    /// Distance past the arena edge that counts as a point
    pub const SCORE_MARGIN: f32 = 30.0;

    /// AI
    pub const AI_DEAD_ZONE: f32 = 6.0;
    pub const AI_LOOKAHEAD_TICKS: f32 = 120.0;

    pub const WINNING_SCORE: u32 = 7;
}
