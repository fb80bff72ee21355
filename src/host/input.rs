//! Input sampling
//!
//! Event handlers write into `InputState` whenever the platform delivers
//! something; the driver reads one `TickInput` snapshot per tick.

use crate::settings::Settings;
use crate::sim::{Command, Config, TickInput};

/// Held keys that move the player paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct InputState {
    /// Last pointer y in arena units
    pointer_y: Option<f32>,
    up_held: bool,
    down_held: bool,
    pending: Option<Command>,
    key_speed: f32,
    pointer_control: bool,
    /// AI drives the player paddle
    pub autopilot: bool,
}

impl InputState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pointer_y: None,
            up_held: false,
            down_held: false,
            pending: None,
            key_speed: settings.key_speed,
            pointer_control: settings.pointer_control,
            autopilot: false,
        }
    }

    /// Pointer moved to `y` (arena units)
    pub fn pointer_moved(&mut self, y: f32) {
        if self.pointer_control {
            self.pointer_y = Some(y);
        }
    }

    pub fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up_held = held,
            Key::Down => self.down_held = held,
        }
        // Keys take over from the pointer until it moves again
        if held {
            self.pointer_y = None;
        }
    }

    /// Queue a one-shot command; a later command replaces an unsent one
    pub fn queue(&mut self, command: Command) {
        self.pending = Some(command);
    }

    /// Build the input for the next tick and consume one-shot commands
    pub fn snapshot(&mut self, player_y: f32, config: &Config) -> TickInput {
        let key_dir = match (self.up_held, self.down_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        let target_y = if key_dir != 0.0 {
            Some(player_y + key_dir * self.key_speed)
        } else {
            self.pointer_y.map(|y| y - config.paddle_height / 2.0)
        };

        TickInput {
            target_y,
            command: self.pending.take(),
            autopilot: self.autopilot,
        }
    }
}
