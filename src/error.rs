//! Configuration errors
//!
//! The simulation itself cannot fail at runtime; everything is kept in range by
//! clamping. The only failure is a configuration that cannot describe a
//! playable arena, and that is rejected when a session is set up.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A length, speed or multiplier that must be finite and > 0 is not
    NonPositive { field: &'static str, value: f32 },
    /// Paddle does not fit vertically inside the arena
    PaddleTallerThanArena { paddle_height: f32, arena_height: f32 },
    /// Ball does not fit inside the arena
    BallLargerThanArena { ball_size: f32, arena_height: f32 },
    /// Both paddles overlap horizontally
    PaddlesTooWide { paddle_width: f32, arena_width: f32 },
    /// A multiplier that must be >= 1.0 is not
    MultiplierBelowOne { field: &'static str, value: f32 },
    /// Bounce angle must lie in (0, pi/2)
    BounceAngleOutOfRange { value: f32 },
    /// Speed cap is lower than the fastest possible serve
    SpeedCapBelowServe { max_ball_speed: f32, fastest_serve: f32 },
    /// Speed cap lets the ball skip over a paddle in a single tick
    SpeedCapTunnels { max_ball_speed: f32, limit: f32 },
    /// A match needs at least one point to be won
    ZeroWinningScore,
    UnknownDifficulty(String),
    UnknownBounceMode(String),
    /// Configuration text could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be a positive number, got {value}")
            }
            Self::PaddleTallerThanArena {
                paddle_height,
                arena_height,
            } => write!(
                f,
                "paddle height {paddle_height} exceeds arena height {arena_height}"
            ),
            Self::BallLargerThanArena {
                ball_size,
                arena_height,
            } => write!(
                f,
                "ball size {ball_size} does not fit arena height {arena_height}"
            ),
            Self::PaddlesTooWide {
                paddle_width,
                arena_width,
            } => write!(
                f,
                "two paddles of width {paddle_width} do not fit arena width {arena_width}"
            ),
            Self::MultiplierBelowOne { field, value } => {
                write!(f, "{field} must be at least 1.0, got {value}")
            }
            Self::BounceAngleOutOfRange { value } => {
                write!(f, "max bounce angle must be in (0, pi/2) radians, got {value}")
            }
            Self::SpeedCapBelowServe {
                max_ball_speed,
                fastest_serve,
            } => write!(
                f,
                "max ball speed {max_ball_speed} is below the fastest serve {fastest_serve}"
            ),
            Self::SpeedCapTunnels {
                max_ball_speed,
                limit,
            } => write!(
                f,
                "max ball speed {max_ball_speed} must stay below {limit} (ball size + paddle width)"
            ),
            Self::ZeroWinningScore => write!(f, "winning score must be at least 1"),
            Self::UnknownDifficulty(s) => {
                write!(f, "unknown difficulty '{s}' (expected easy, medium or hard)")
            }
            Self::UnknownBounceMode(s) => {
                write!(f, "unknown bounce mode '{s}' (expected angled or inverted)")
            }
            Self::Parse(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
