//! Game state and core simulation types
//!
//! One `GameState` value holds everything the step reads and writes. It is
//! owned by whoever drives the ticks and handed to `step` by `&mut`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::Config;
use crate::consts::MAX_SERVE_ANGLE;
use crate::error::ConfigError;

/// Which end of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing away from this side's paddle
    pub fn away(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Whether ticks advance the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// The ball; `pos` is the top-left corner of its bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// A paddle; `y` is its top edge, x is implied by `side`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side, y: f32) -> Self {
        Self { side, y }
    }

    pub fn center_y(&self, config: &Config) -> f32 {
        self.y + config.paddle_height / 2.0
    }

    pub fn clamp(&mut self, config: &Config) {
        self.y = config.clamp_paddle_y(self.y);
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// Side that has reached `winning_score`, if any
    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.left >= winning_score && self.left > self.right {
            Some(Side::Left)
        } else if self.right >= winning_score && self.right > self.left {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, reported by the driver's logs
    pub seed: u64,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub score: Score,
    pub session: SessionState,
    /// Speed ramp multiplier for the current rally
    pub ramp: f32,
    /// Paddle hits in the current rally
    pub rally_hits: u32,
    /// Running ticks since the session was created
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Set up a stopped session with the ball at rest in the center
    pub fn new(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle_y = config.centered_paddle_y();
        Ok(Self {
            seed,
            ball: Ball::new(config.center(), Vec2::ZERO, config.ball_size),
            left: Paddle::new(Side::Left, paddle_y),
            right: Paddle::new(Side::Right, paddle_y),
            score: Score::new(),
            session: SessionState::Stopped,
            ramp: 1.0,
            rally_hits: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Launch the ball toward `toward` at `base_speed * ramp`, with a random
    /// vertical angle
    pub fn serve(&mut self, toward: Side, config: &Config) {
        let angle: f32 = self.rng.random_range(-MAX_SERVE_ANGLE..=MAX_SERVE_ANGLE);
        let speed = config.base_speed * self.ramp;
        // Serving toward a side means travelling away from the other paddle
        let dir = toward.opposite().away();
        self.ball.vel = Vec2::new(angle.cos() * dir, angle.sin()) * speed;
    }

    /// Serve toward a side picked by the session RNG
    pub fn serve_random(&mut self, config: &Config) {
        let toward = if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        self.serve(toward, config);
    }

    /// Start a new rally from the center after a point
    pub fn respawn_ball(&mut self, toward: Side, config: &Config) {
        self.ball.pos = config.center();
        self.ramp = 1.0;
        self.rally_hits = 0;
        self.serve(toward, config);
    }

    /// Back to a fresh stopped session; scores are cleared
    pub fn reset(&mut self, config: &Config) {
        let paddle_y = config.centered_paddle_y();
        self.ball = Ball::new(config.center(), Vec2::ZERO, config.ball_size);
        self.left.y = paddle_y;
        self.right.y = paddle_y;
        self.score.reset();
        self.session = SessionState::Stopped;
        self.ramp = 1.0;
        self.rally_hits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered_and_stopped() {
        let config = Config::new();
        let state = GameState::new(&config, 1).unwrap();
        assert_eq!(state.session, SessionState::Stopped);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert!(state.ball.is_at_rest());
        assert_eq!(state.left.y, 200.0);
        assert_eq!(state.right.y, 200.0);
        assert_eq!(state.ramp, 1.0);
    }

    #[test]
    fn test_new_state_rejects_invalid_config() {
        let config = Config {
            paddle_height: 501.0,
            ..Config::default()
        };
        assert!(GameState::new(&config, 1).is_err());
    }

    #[test]
    fn test_serve_direction_and_speed() {
        let config = Config::new();
        let mut state = GameState::new(&config, 7).unwrap();

        for _ in 0..32 {
            state.serve(Side::Left, &config);
            assert!(state.ball.vel.x < 0.0);
            assert!((state.ball.speed() - config.base_speed).abs() < 1e-4);

            state.serve(Side::Right, &config);
            assert!(state.ball.vel.x > 0.0);
            let angle = (state.ball.vel.y / state.ball.vel.x).atan().abs();
            assert!(angle <= MAX_SERVE_ANGLE + 1e-4);
        }
    }

    #[test]
    fn test_serve_scales_with_ramp() {
        let config = Config::new();
        let mut state = GameState::new(&config, 7).unwrap();
        state.ramp = 2.0;
        state.serve(Side::Right, &config);
        assert!((state.ball.speed() - config.base_speed * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::new();
        assert_eq!(score.winner(3), None);
        for _ in 0..3 {
            score.increment(Side::Right);
        }
        score.increment(Side::Left);
        assert_eq!(score.get(Side::Right), 3);
        assert_eq!(score.winner(3), Some(Side::Right));
        score.reset();
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_reset_clears_scores_and_recenters() {
        let config = Config::new();
        let mut state = GameState::new(&config, 3).unwrap();
        state.score.increment(Side::Left);
        state.left.y = 0.0;
        state.ramp = 1.7;
        state.session = SessionState::Running;
        state.ball.vel = Vec2::new(4.0, 1.0);

        state.reset(&config);

        assert_eq!(state.score, Score::default());
        assert_eq!(state.left.y, 200.0);
        assert_eq!(state.ramp, 1.0);
        assert_eq!(state.session, SessionState::Stopped);
        assert!(state.ball.is_at_rest());
    }

    #[test]
    fn test_same_seed_same_serves() {
        let config = Config::new();
        let mut a = GameState::new(&config, 99).unwrap();
        let mut b = GameState::new(&config, 99).unwrap();
        for _ in 0..8 {
            a.serve_random(&config);
            b.serve_random(&config);
            assert_eq!(a.ball.vel, b.ball.vel);
        }
    }
}
