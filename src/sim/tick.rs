//! Fixed tick simulation step
//!
//! Core game loop body: applies the tick's session command, then advances the
//! ball and paddles by one frame and reports what happened.

use serde::{Deserialize, Serialize};

use super::ai;
use super::collision::{
    angled_bounce, ball_hits_paddle, bounce_speed, hit_offset, out_of_bounds, push_out,
    wall_bounce,
};
use super::config::{BounceMode, Config};
use super::state::{GameState, Score, SessionState, Side};

/// Discrete session control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Stop the rally, keep the scores
    Stop,
    /// Stop and clear the scores
    Reset,
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired top edge of the player (left) paddle
    pub target_y: Option<f32>,
    /// Session command to apply before the tick
    pub command: Option<Command>,
    /// Let the AI drive the player paddle too (demo mode)
    pub autopilot: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    WallBounce,
    PaddleBounce { side: Side },
    PointScored { side: Side },
    SessionChanged { from: SessionState, to: SessionState },
    /// Reset of an already stopped session wiped a non-zero score
    ScoresCleared,
    MatchWon { side: Side },
}

/// Apply a session command, returning the transition if the state changed.
///
/// Resetting a stopped session that still shows a score (a finished match)
/// reports `ScoresCleared` instead of a transition.
pub fn apply_command(
    state: &mut GameState,
    command: Command,
    config: &Config,
) -> Option<GameEvent> {
    use SessionState::*;

    let from = state.session;
    if command == Command::Reset && from == Stopped {
        let had_score = state.score != Score::default();
        state.reset(config);
        if !had_score {
            return None;
        }
        log::info!("Scores cleared");
        return Some(GameEvent::ScoresCleared);
    }

    let to = match (command, from) {
        (Command::Start, Stopped) => {
            if state.ball.is_at_rest() {
                state.serve_random(config);
            }
            Running
        }
        (Command::Resume, Paused) | (Command::TogglePause, Paused) => Running,
        (Command::Pause, Running) | (Command::TogglePause, Running) => Paused,
        (Command::Stop, Running | Paused) => {
            let scores = state.score;
            state.reset(config);
            state.score = scores;
            Stopped
        }
        (Command::Reset, Running | Paused) => {
            state.reset(config);
            Stopped
        }
        _ => from,
    };

    state.session = to;
    if from == to {
        return None;
    }

    log::info!("Session {:?} -> {:?} ({:?})", from, to, command);
    Some(GameEvent::SessionChanged { from, to })
}

/// Advance the game state by one tick
pub fn step(state: &mut GameState, input: &TickInput, config: &Config) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(command) = input.command {
        if let Some(event) = apply_command(state, command, config) {
            events.push(event);
        }
    }

    // Don't tick unless running
    if state.session != SessionState::Running {
        return events;
    }

    state.time_ticks += 1;

    if !input.autopilot {
        if let Some(y) = input.target_y {
            state.left.y = config.clamp_paddle_y(y);
        }
    }

    // Integrate
    state.ball.pos += state.ball.vel;

    if wall_bounce(&mut state.ball, config) {
        events.push(GameEvent::WallBounce);
    }

    for side in [Side::Left, Side::Right] {
        let paddle = *state.paddle(side);
        if !ball_hits_paddle(&state.ball, &paddle, config) {
            continue;
        }

        match config.bounce_mode {
            BounceMode::Angled => {
                let offset = hit_offset(&state.ball, &paddle, config);
                let speed = bounce_speed(state.ball.speed(), state.ramp, config);
                state.ball.vel = angled_bounce(offset, speed, side, config);
            }
            BounceMode::Inverted => {
                state.ball.vel.x = -state.ball.vel.x;
            }
        }
        push_out(&mut state.ball, side, config);
        state.rally_hits += 1;
        events.push(GameEvent::PaddleBounce { side });
        break;
    }

    let scorer = out_of_bounds(&state.ball, config);
    if let Some(side) = scorer {
        state.score.increment(side);
        log::debug!(
            "Point {} after {} hits ({}-{})",
            side.as_str(),
            state.rally_hits,
            state.score.left,
            state.score.right
        );
        state.respawn_ball(side.opposite(), config);
        events.push(GameEvent::PointScored { side });
    } else {
        state.ramp = (state.ramp + config.ramp_increment).min(config.ramp_max);
    }

    ai::drive(state, Side::Right, config);
    if input.autopilot {
        ai::drive(state, Side::Left, config);
    }

    state.left.clamp(config);
    state.right.clamp(config);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn running(config: &Config, pos: Vec2, vel: Vec2) -> GameState {
        let mut state = GameState::new(config, 12345).unwrap();
        state.session = SessionState::Running;
        state.ball.pos = pos;
        state.ball.vel = vel;
        state
    }

    #[test]
    fn test_stopped_session_does_not_advance() {
        let config = Config::new();
        let mut state = GameState::new(&config, 1).unwrap();
        state.ball.vel = Vec2::new(5.0, 3.0);

        let events = step(&mut state, &TickInput::default(), &config);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_serves_ball() {
        let config = Config::new();
        let mut state = GameState::new(&config, 1).unwrap();

        let input = TickInput {
            command: Some(Command::Start),
            ..Default::default()
        };
        let events = step(&mut state, &input, &config);

        assert_eq!(state.session, SessionState::Running);
        assert_eq!(
            events[0],
            GameEvent::SessionChanged {
                from: SessionState::Stopped,
                to: SessionState::Running
            }
        );
        assert!((state.ball.speed() - config.base_speed).abs() < 1e-4);
        assert_ne!(state.ball.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_pause_and_resume() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(5.0, 3.0));

        let pause = TickInput {
            command: Some(Command::Pause),
            ..Default::default()
        };
        step(&mut state, &pause, &config);
        assert_eq!(state.session, SessionState::Paused);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));

        // Further ticks are frozen
        step(&mut state, &TickInput::default(), &config);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));

        // Pausing again is a no-op
        assert!(apply_command(&mut state, Command::Pause, &config).is_none());

        let toggle = TickInput {
            command: Some(Command::TogglePause),
            ..Default::default()
        };
        step(&mut state, &toggle, &config);
        assert_eq!(state.session, SessionState::Running);
        assert_eq!(state.ball.pos, Vec2::new(405.0, 253.0));
    }

    #[test]
    fn test_stop_keeps_scores_reset_clears_them() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(5.0, 3.0));
        state.score.left = 2;
        state.score.right = 1;

        let event = apply_command(&mut state, Command::Stop, &config);
        assert_eq!(
            event,
            Some(GameEvent::SessionChanged {
                from: SessionState::Running,
                to: SessionState::Stopped
            })
        );
        assert_eq!((state.score.left, state.score.right), (2, 1));
        assert!(state.ball.is_at_rest());

        apply_command(&mut state, Command::Start, &config);
        apply_command(&mut state, Command::Pause, &config);
        apply_command(&mut state, Command::Reset, &config);
        assert_eq!(state.session, SessionState::Stopped);
        assert_eq!((state.score.left, state.score.right), (0, 0));
    }

    #[test]
    fn test_reset_after_stop_reports_cleared_scores() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(5.0, 3.0));
        state.score.right = 3;
        apply_command(&mut state, Command::Stop, &config);

        let event = apply_command(&mut state, Command::Reset, &config);
        assert_eq!(event, Some(GameEvent::ScoresCleared));
        assert_eq!(state.score, Score::default());
        assert_eq!(state.session, SessionState::Stopped);

        // Nothing left to clear
        assert!(apply_command(&mut state, Command::Reset, &config).is_none());
    }

    #[test]
    fn test_resume_from_stopped_is_noop() {
        let config = Config::new();
        let mut state = GameState::new(&config, 1).unwrap();
        assert!(apply_command(&mut state, Command::Resume, &config).is_none());
        assert!(apply_command(&mut state, Command::Stop, &config).is_none());
        assert_eq!(state.session, SessionState::Stopped);
    }

    #[test]
    fn test_free_flight_one_tick() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(5.0, 3.0));

        let events = step(&mut state, &TickInput::default(), &config);

        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(405.0, 253.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_right_paddle_bounce() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(795.0, 250.0), Vec2::new(5.0, 0.0));
        assert_eq!(state.right.y, 200.0);

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::PaddleBounce { side: Side::Right }]);
        assert!(state.ball.vel.x < 0.0);
        assert_eq!(state.ball.pos.x, 775.0);
        assert_eq!(state.rally_hits, 1);
    }

    #[test]
    fn test_center_hit_leaves_horizontally() {
        let config = Config::new();
        // Ball center lands on paddle center (250) after the move
        let mut state = running(&config, Vec2::new(14.0, 242.5), Vec2::new(-10.0, 0.0));

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::PaddleBounce { side: Side::Left }]);
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.ball.vel.y, 0.0);
        assert!((state.ball.speed() - 10.5).abs() < 1e-4);
        assert_eq!(state.ball.pos.x, 10.0);
    }

    #[test]
    fn test_inverted_bounce_mode() {
        let config = Config {
            bounce_mode: BounceMode::Inverted,
            ..Config::default()
        };
        let mut state = running(&config, Vec2::new(795.0, 220.0), Vec2::new(5.0, 2.0));

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::PaddleBounce { side: Side::Right }]);
        assert_eq!(state.ball.vel, Vec2::new(-5.0, 2.0));
        assert_eq!(state.ball.pos.x, 775.0);
    }

    #[test]
    fn test_wall_bounce_event() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 2.0), Vec2::new(5.0, -3.0));

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert_eq!(state.ball.pos.y, 0.0);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_right_scores_past_left_margin() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(-26.0, 250.0), Vec2::new(-5.0, 0.0));
        state.ramp = 1.8;

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::PointScored { side: Side::Right }]);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.ramp, 1.0);
        // Served toward the side that conceded
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_left_scores_past_right_margin() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(828.0, 50.0), Vec2::new(5.0, 0.0));
        state.ramp = 2.2;

        let events = step(&mut state, &TickInput::default(), &config);

        assert_eq!(events, vec![GameEvent::PointScored { side: Side::Left }]);
        assert_eq!(state.score.left, 1);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.ramp, 1.0);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_ramp_grows_and_caps() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(0.0, 0.0));

        step(&mut state, &TickInput::default(), &config);
        assert!((state.ramp - 1.0005).abs() < 1e-6);

        state.ramp = 2.4999;
        step(&mut state, &TickInput::default(), &config);
        assert_eq!(state.ramp, config.ramp_max);
    }

    #[test]
    fn test_player_target_is_clamped() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 250.0), Vec2::new(1.0, 0.0));

        let input = TickInput {
            target_y: Some(-50.0),
            ..Default::default()
        };
        step(&mut state, &input, &config);
        assert_eq!(state.left.y, 0.0);

        let input = TickInput {
            target_y: Some(480.0),
            ..Default::default()
        };
        step(&mut state, &input, &config);
        assert_eq!(state.left.y, 400.0);
    }

    #[test]
    fn test_opponent_tracks_ball() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 50.0), Vec2::new(1.0, 0.0));

        step(&mut state, &TickInput::default(), &config);
        assert!((state.right.y - (200.0 - 3.2)).abs() < 1e-4);
        assert_eq!(state.left.y, 200.0);
    }

    #[test]
    fn test_autopilot_drives_player() {
        let config = Config::new();
        let mut state = running(&config, Vec2::new(400.0, 50.0), Vec2::new(-1.0, 0.0));

        let input = TickInput {
            target_y: Some(300.0),
            autopilot: true,
            ..Default::default()
        };
        step(&mut state, &input, &config);
        assert!((state.left.y - (200.0 - 3.2)).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let config = Config::new();
        let mut state1 = GameState::new(&config, 99999).unwrap();
        let mut state2 = GameState::new(&config, 99999).unwrap();

        let start = TickInput {
            command: Some(Command::Start),
            autopilot: true,
            ..Default::default()
        };
        let play = TickInput {
            autopilot: true,
            ..Default::default()
        };

        step(&mut state1, &start, &config);
        step(&mut state2, &start, &config);
        for _ in 0..2_000 {
            let e1 = step(&mut state1, &play, &config);
            let e2 = step(&mut state2, &play, &config);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.time_ticks, 2_001);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::PointScored { side: Side::Left }).unwrap();
        assert_eq!(json, r#"{"event":"point_scored","side":"left"}"#);
    }
}
