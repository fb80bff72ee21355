//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle: the ball's bounding box against
//! the arena walls and the two paddles.

use glam::Vec2;

use super::config::Config;
use super::state::{Ball, Paddle, Side};

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x <= other.right()
            && self.right() >= other.pos.x
            && self.pos.y <= other.bottom()
            && self.bottom() >= other.pos.y
    }
}

pub fn ball_rect(ball: &Ball) -> Rect {
    Rect::new(ball.pos.x, ball.pos.y, ball.size, ball.size)
}

pub fn paddle_rect(paddle: &Paddle, config: &Config) -> Rect {
    Rect::new(
        config.paddle_x(paddle.side),
        paddle.y,
        config.paddle_width,
        config.paddle_height,
    )
}

/// Reflect the ball off the top or bottom wall.
///
/// Returns true if the ball touched a wall this tick.
pub fn wall_bounce(ball: &mut Ball, config: &Config) -> bool {
    let floor = config.arena_height - ball.size;
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.pos.y >= floor {
        ball.pos.y = floor;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Whether the ball is travelling toward this paddle
pub fn approaching(ball: &Ball, side: Side) -> bool {
    ball.vel.x * side.away() < 0.0
}

/// True if the ball overlaps the paddle while heading into it
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    approaching(ball, paddle.side) && ball_rect(ball).overlaps(&paddle_rect(paddle, config))
}

/// Vertical distance of the ball center from the paddle center, scaled so the
/// paddle ends are -1 and 1
pub fn hit_offset(ball: &Ball, paddle: &Paddle, config: &Config) -> f32 {
    let half = config.paddle_height / 2.0;
    ((ball.center().y - paddle.center_y(config)) / half).clamp(-1.0, 1.0)
}

/// Outgoing velocity for an angled bounce off `side`'s paddle
pub fn angled_bounce(offset: f32, speed: f32, side: Side, config: &Config) -> Vec2 {
    let angle = offset * config.max_bounce_angle;
    Vec2::new(angle.cos() * side.away(), angle.sin()) * speed
}

/// Speed after a paddle hit: grown by the hit multiplier, never slower than the
/// current ramp allows, never faster than the cap.
///
/// The lower bound `base_speed * ramp` comes from the speed ramp, so a long
/// rally can lift a hit above the plain multiplier.
pub fn bounce_speed(current: f32, ramp: f32, config: &Config) -> f32 {
    (current * config.paddle_hit_multiplier)
        .max(config.base_speed * ramp)
        .min(config.max_ball_speed)
}

/// Put the ball flush against the paddle's inner face
pub fn push_out(ball: &mut Ball, side: Side, config: &Config) {
    ball.pos.x = match side {
        Side::Left => config.paddle_width,
        Side::Right => config.arena_width - config.paddle_width - ball.size,
    };
}

/// Side that scores if the ball has left the arena past the margin
pub fn out_of_bounds(ball: &Ball, config: &Config) -> Option<Side> {
    if ball.pos.x > config.arena_width + config.score_margin {
        Some(Side::Left)
    } else if ball.pos.x < -config.score_margin {
        Some(Side::Right)
    } else {
        None
    }
}
