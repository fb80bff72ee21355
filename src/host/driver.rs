//! Fixed timestep match driver
//!
//! Owns the only `GameState` and feeds it ticks. The platform calls
//! `advance` from whatever frame callback it has; the driver never
//! schedules itself.

use super::input::InputState;
use super::{Frame, Notifier, Renderer};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, TICK_DT};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::sim::{Command, Config, GameEvent, GameState, Side, apply_command, step};

pub struct Match<R: Renderer, N: Notifier> {
    config: Config,
    state: GameState,
    input: InputState,
    renderer: R,
    notifier: N,
    accumulator: f32,
    winner: Option<Side>,
}

impl<R: Renderer, N: Notifier> Match<R, N> {
    /// Validate `config` and set up a stopped match
    pub fn new(
        config: Config,
        settings: &Settings,
        seed: u64,
        renderer: R,
        notifier: N,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(&config, seed)?;
        log::info!(
            "New match: {}x{}, difficulty {}, first to {} (seed {})",
            config.arena_width,
            config.arena_height,
            config.difficulty.as_str(),
            config.winning_score,
            state.seed
        );
        Ok(Self {
            config,
            state,
            input: InputState::new(settings),
            renderer,
            notifier,
            accumulator: 0.0,
            winner: None,
        })
    }

    /// Swap in a new configuration; the match starts over
    pub fn reconfigure(&mut self, config: Config, seed: u64) -> Result<(), ConfigError> {
        self.state = GameState::new(&config, seed)?;
        log::info!(
            "Match reconfigured (difficulty {}, seed {})",
            config.difficulty.as_str(),
            self.state.seed
        );
        self.config = config;
        self.accumulator = 0.0;
        self.winner = None;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn queue(&mut self, command: Command) {
        self.input.queue(command);
    }

    /// Run exactly one tick and forward its events to the notifier
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let input = self.input.snapshot(self.state.left.y, &self.config);

        // A won match has already ended the session, so the next start
        // begins a new match from 0-0
        if input.command == Some(Command::Start) && self.winner.take().is_some() {
            self.state.score.reset();
        }

        let mut events = step(&mut self.state, &input, &self.config);

        if self.winner.is_none() {
            if let Some(side) = self.state.score.winner(self.config.winning_score) {
                log::info!(
                    "{} wins {}-{}",
                    side.as_str(),
                    self.state.score.left,
                    self.state.score.right
                );
                self.winner = Some(side);
                events.push(GameEvent::MatchWon { side });
                if let Some(event) = apply_command(&mut self.state, Command::Stop, &self.config) {
                    events.push(event);
                }
            }
        }

        if input.command == Some(Command::Reset) {
            self.winner = None;
        }

        for event in &events {
            self.notifier.notify(event);
        }
        events
    }

    /// Accumulate `elapsed` seconds, run the ticks that fit, then render.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            self.tick();
            self.accumulator -= TICK_DT;
            substeps += 1;
        }

        self.render();
        substeps
    }

    pub fn render(&mut self) {
        let frame = Frame::capture(&self.state, self.winner);
        self.renderer.render(&frame);
    }
}
