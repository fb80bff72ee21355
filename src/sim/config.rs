//! Session configuration
//!
//! Fixed for the lifetime of a session. Every field has a default, so a JSON
//! document only needs to name the values it changes.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::consts::*;
use crate::error::ConfigError;

/// Opponent skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Paddle travel per tick for the AI
    pub fn ai_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 3.2,
            Difficulty::Hard => 5.0,
        }
    }

    /// Whether the AI aims at the predicted intercept instead of the ball
    pub fn uses_lookahead(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// How the ball leaves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BounceMode {
    /// Outgoing angle follows the hit offset, speed grows per hit
    #[default]
    Angled,
    /// Horizontal velocity is flipped, nothing else changes
    Inverted,
}

impl FromStr for BounceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angled" | "angle" => Ok(BounceMode::Angled),
            "inverted" | "basic" => Ok(BounceMode::Inverted),
            _ => Err(ConfigError::UnknownBounceMode(s.to_string())),
        }
    }
}

/// Arena geometry, speeds and rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Ball bounding box edge length
    pub ball_size: f32,
    /// Serve speed at ramp 1.0 (units per tick)
    pub base_speed: f32,
    /// Hard cap on ball speed after a paddle hit
    pub max_ball_speed: f32,
    /// Outgoing angle at the very edge of a paddle (radians)
    pub max_bounce_angle: f32,
    /// Speed factor applied on every paddle hit
    pub paddle_hit_multiplier: f32,
    /// Added to the speed ramp every running tick
    pub ramp_increment: f32,
    /// Upper bound of the speed ramp
    pub ramp_max: f32,
    /// How far past an edge the ball must travel before a point is scored
    pub score_margin: f32,
    /// AI tolerance band around the paddle center
    pub ai_dead_zone: f32,
    pub difficulty: Difficulty,
    pub bounce_mode: BounceMode,
    pub winning_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_size: BALL_SIZE,
            base_speed: BALL_BASE_SPEED,
            max_ball_speed: BALL_MAX_SPEED,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            paddle_hit_multiplier: PADDLE_HIT_MULTIPLIER,
            ramp_increment: RAMP_INCREMENT,
            ramp_max: RAMP_MAX,
            score_margin: SCORE_MARGIN,
            ai_dead_zone: AI_DEAD_ZONE,
            difficulty: Difficulty::default(),
            bounce_mode: BounceMode::default(),
            winning_score: WINNING_SCORE,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn at_least_one(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::MultiplierBelowOne { field, value })
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    /// Consume the config, returning it only if it describes a playable arena
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("ball_size", self.ball_size)?;
        positive("base_speed", self.base_speed)?;
        positive("max_ball_speed", self.max_ball_speed)?;
        positive("score_margin", self.score_margin)?;

        if !self.ramp_increment.is_finite() || self.ramp_increment < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "ramp_increment",
                value: self.ramp_increment,
            });
        }
        if !self.ai_dead_zone.is_finite() || self.ai_dead_zone < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "ai_dead_zone",
                value: self.ai_dead_zone,
            });
        }

        if self.paddle_height > self.arena_height {
            return Err(ConfigError::PaddleTallerThanArena {
                paddle_height: self.paddle_height,
                arena_height: self.arena_height,
            });
        }
        if self.ball_size >= self.arena_height || self.ball_size >= self.arena_width {
            return Err(ConfigError::BallLargerThanArena {
                ball_size: self.ball_size,
                arena_height: self.arena_height,
            });
        }
        if self.paddle_width * 2.0 + self.ball_size >= self.arena_width {
            return Err(ConfigError::PaddlesTooWide {
                paddle_width: self.paddle_width,
                arena_width: self.arena_width,
            });
        }

        at_least_one("paddle_hit_multiplier", self.paddle_hit_multiplier)?;
        at_least_one("ramp_max", self.ramp_max)?;

        if !(self.max_bounce_angle > 0.0 && self.max_bounce_angle < std::f32::consts::FRAC_PI_2)
        {
            return Err(ConfigError::BounceAngleOutOfRange {
                value: self.max_bounce_angle,
            });
        }

        let fastest_serve = self.base_speed * self.ramp_max;
        if self.max_ball_speed < fastest_serve {
            return Err(ConfigError::SpeedCapBelowServe {
                max_ball_speed: self.max_ball_speed,
                fastest_serve,
            });
        }
        let limit = self.ball_size + self.paddle_width;
        if self.max_ball_speed >= limit {
            return Err(ConfigError::SpeedCapTunnels {
                max_ball_speed: self.max_ball_speed,
                limit,
            });
        }

        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }

        Ok(())
    }

    /// Left edge of a paddle's rectangle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.arena_width - self.paddle_width,
        }
    }

    /// Largest valid paddle y (top edge)
    pub fn max_paddle_y(&self) -> f32 {
        self.arena_height - self.paddle_height
    }

    /// Clamp paddle y to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_paddle_y())
    }

    /// Paddle y that centers it vertically
    pub fn centered_paddle_y(&self) -> f32 {
        self.arena_height / 2.0 - self.paddle_height / 2.0
    }

    /// Ball respawn position
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    pub fn ai_speed(&self) -> f32 {
        self.difficulty.ai_speed()
    }
}
