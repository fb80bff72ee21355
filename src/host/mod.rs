//! Host side of the game
//!
//! Everything between the simulation and the outside world:
//! - `Match`: owns the state and drives ticks at a fixed cadence
//! - `InputState`: turns pointer/key events into per-tick snapshots
//! - `Renderer` / `Notifier`: sinks for frames and events

pub mod driver;
pub mod input;

pub use driver::Match;
pub use input::{InputState, Key};

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameEvent, GameState, Score, SessionState, Side};

/// Renderer-facing snapshot of the game after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// Ball top-left corner
    pub ball: Vec2,
    pub left_y: f32,
    pub right_y: f32,
    pub score: Score,
    pub session: SessionState,
    pub ramp: f32,
    pub tick: u64,
    pub winner: Option<Side>,
}

impl Frame {
    pub fn capture(state: &GameState, winner: Option<Side>) -> Self {
        Self {
            ball: state.ball.pos,
            left_y: state.left.y,
            right_y: state.right.y,
            score: state.score,
            session: state.session,
            ramp: state.ramp,
            tick: state.time_ticks,
            winner,
        }
    }

    /// Short status line for the HUD
    pub fn status(&self) -> &'static str {
        match (self.session, self.winner) {
            (_, Some(Side::Left)) => "left wins",
            (_, Some(Side::Right)) => "right wins",
            (SessionState::Running, None) => "",
            (SessionState::Paused, None) => "paused",
            (SessionState::Stopped, None) => "press start",
        }
    }
}

/// Consumes frames and puts them on a display surface
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Reacts to discrete game events (sound, flashes, logs)
pub trait Notifier {
    fn notify(&mut self, event: &GameEvent);
}

/// Keeps every frame; handy for headless runs and tests
impl Renderer for Vec<Frame> {
    fn render(&mut self, frame: &Frame) {
        self.push(*frame);
    }
}

/// Keeps every event
impl Notifier for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Writes events to the `log` facade
#[derive(Debug, Default)]
pub struct LogNotifier {
    pub points: u32,
}

impl Notifier for LogNotifier {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::WallBounce => log::trace!("wall bounce"),
            GameEvent::PaddleBounce { side } => log::debug!("{} paddle hit", side.as_str()),
            GameEvent::PointScored { side } => {
                self.points += 1;
                log::info!("Point to {}", side.as_str());
            }
            GameEvent::SessionChanged { from, to } => {
                log::debug!("session {:?} -> {:?}", from, to)
            }
            GameEvent::ScoresCleared => log::debug!("scores cleared"),
            GameEvent::MatchWon { side } => log::info!("Match won by {}", side.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Config;

    #[test]
    fn test_frame_capture() {
        let config = Config::new();
        let mut state = GameState::new(&config, 5).unwrap();
        state.score.left = 2;
        state.left.y = 10.0;

        let frame = Frame::capture(&state, None);
        assert_eq!(frame.ball, Vec2::new(400.0, 250.0));
        assert_eq!(frame.left_y, 10.0);
        assert_eq!(frame.right_y, 200.0);
        assert_eq!(frame.score.left, 2);
        assert_eq!(frame.session, SessionState::Stopped);
        assert_eq!(frame.status(), "press start");

        let won = Frame::capture(&state, Some(Side::Right));
        assert_eq!(won.status(), "right wins");
    }

    #[test]
    fn test_log_notifier_counts_points() {
        let mut notifier = LogNotifier::default();
        notifier.notify(&GameEvent::WallBounce);
        notifier.notify(&GameEvent::PointScored { side: Side::Left });
        notifier.notify(&GameEvent::PointScored { side: Side::Right });
        assert_eq!(notifier.points, 2);
    }
}
