//! Scripted paddle control
//!
//! Chases the ball's vertical center at a fixed speed per tick. On hard
//! difficulty it aims at where the ball will cross its paddle instead.

use super::collision::approaching;
use super::config::Config;
use super::state::{Ball, GameState, Paddle, Side};
use crate::consts::AI_LOOKAHEAD_TICKS;

/// Vertical position (ball center) the paddle on `side` should line up with
pub fn target_y(ball: &Ball, side: Side, config: &Config, lookahead: bool) -> f32 {
    if lookahead && approaching(ball, side) {
        predict_intercept(ball, side, config)
    } else {
        ball.center().y
    }
}

/// Ball center y when it reaches `side`'s paddle face, with wall reflections.
///
/// Looks at most `AI_LOOKAHEAD_TICKS` ahead.
pub fn predict_intercept(ball: &Ball, side: Side, config: &Config) -> f32 {
    let face_x = match side {
        Side::Left => config.paddle_width,
        Side::Right => config.arena_width - config.paddle_width - ball.size,
    };

    let ticks = if ball.vel.x == 0.0 {
        0.0
    } else {
        ((face_x - ball.pos.x) / ball.vel.x).clamp(0.0, AI_LOOKAHEAD_TICKS)
    };

    let span = config.arena_height - ball.size;
    let raw = ball.pos.y + ball.vel.y * ticks;
    // Unfold the reflections off both walls
    let folded = raw.rem_euclid(2.0 * span);
    let top = if folded > span {
        2.0 * span - folded
    } else {
        folded
    };
    top + ball.size / 2.0
}

/// Move the paddle one tick toward `target`, holding still inside the dead zone
pub fn track(paddle: &mut Paddle, target: f32, speed: f32, config: &Config) {
    let diff = target - paddle.center_y(config);
    if diff > config.ai_dead_zone {
        paddle.y += speed;
    } else if diff < -config.ai_dead_zone {
        paddle.y -= speed;
    }
}

/// Run the policy for one paddle of the game
pub fn drive(state: &mut GameState, side: Side, config: &Config) {
    let target = target_y(
        &state.ball,
        side,
        config,
        config.difficulty.uses_lookahead(),
    );
    track(state.paddle_mut(side), target, config.ai_speed(), config);
}
