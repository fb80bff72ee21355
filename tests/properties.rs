//! Property checks over long runs of the simulation step

use dom_pong::sim::{
    BounceMode, Command, Config, Difficulty, GameState, Paddle, SessionState, Side, TickInput,
    step,
};
use proptest::prelude::*;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn bounce_mode() -> impl Strategy<Value = BounceMode> {
    prop_oneof![Just(BounceMode::Angled), Just(BounceMode::Inverted)]
}

fn started(config: &Config, seed: u64) -> GameState {
    let mut state = GameState::new(config, seed).unwrap();
    let start = TickInput {
        command: Some(Command::Start),
        ..TickInput::default()
    };
    step(&mut state, &start, config);
    assert_eq!(state.session, SessionState::Running);
    state
}

proptest! {
    #[test]
    fn paddles_stay_in_arena(
        seed in any::<u64>(),
        targets in prop::collection::vec(-2000.0f32..2000.0, 1..200),
    ) {
        let config = Config::new();
        let mut state = started(&config, seed);

        for target in targets {
            let input = TickInput {
                target_y: Some(target),
                ..TickInput::default()
            };
            step(&mut state, &input, &config);
            prop_assert!(state.left.y >= 0.0 && state.left.y <= config.max_paddle_y());
            prop_assert!(state.right.y >= 0.0 && state.right.y <= config.max_paddle_y());
        }
    }

    #[test]
    fn paddle_clamp_is_idempotent(y in -5000.0f32..5000.0) {
        let config = Config::new();
        let once = config.clamp_paddle_y(y);
        prop_assert_eq!(config.clamp_paddle_y(once), once);

        let mut paddle = Paddle::new(Side::Right, y);
        paddle.clamp(&config);
        let clamped = paddle;
        paddle.clamp(&config);
        prop_assert_eq!(paddle, clamped);
        prop_assert_eq!(paddle.y, once);
    }

    #[test]
    fn long_rallies_respect_limits(
        seed in any::<u64>(),
        difficulty in difficulty(),
        bounce_mode in bounce_mode(),
    ) {
        let config = Config {
            difficulty,
            bounce_mode,
            ..Config::default()
        };
        let mut state = started(&config, seed);
        let autopilot = TickInput {
            autopilot: true,
            ..TickInput::default()
        };

        for _ in 0..3000 {
            step(&mut state, &autopilot, &config);
            prop_assert!(state.ball.speed() <= config.max_ball_speed + 1e-3);
            prop_assert!(state.ramp >= 1.0 && state.ramp <= config.ramp_max);
            prop_assert!(state.ball.pos.y >= 0.0);
            prop_assert!(state.ball.pos.y <= config.arena_height - config.ball_size);
        }
    }

    #[test]
    fn same_seed_same_match(seed in any::<u64>(), ticks in 1usize..600) {
        let config = Config::new();
        let mut a = started(&config, seed);
        let mut b = started(&config, seed);
        let autopilot = TickInput {
            autopilot: true,
            ..TickInput::default()
        };

        for _ in 0..ticks {
            let ea = step(&mut a, &autopilot, &config);
            let eb = step(&mut b, &autopilot, &config);
            prop_assert_eq!(ea, eb);
        }
        prop_assert_eq!(a.ball, b.ball);
        prop_assert_eq!(a.score, b.score);
    }

    #[test]
    fn paused_ticks_change_nothing(seed in any::<u64>(), ticks in 1usize..100) {
        let config = Config::new();
        let mut state = started(&config, seed);
        let pause = TickInput {
            command: Some(Command::Pause),
            ..TickInput::default()
        };
        step(&mut state, &pause, &config);
        let ball = state.ball;
        let score = state.score;

        for _ in 0..ticks {
            let events = step(&mut state, &TickInput::default(), &config);
            prop_assert!(events.is_empty());
        }
        prop_assert_eq!(state.ball, ball);
        prop_assert_eq!(state.score, score);
    }
}
