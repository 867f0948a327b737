//! Held-direction input state
//!
//! Host events only flip flags here; the simulation reads them at the start
//! of the next step, so a step always sees a stable snapshot.

use serde::{Deserialize, Serialize};

/// A discrete control direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    /// Jump. Instantaneous impulse with no held state.
    Up,
}

/// Host-independent input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Direction),
    Release(Direction),
}

/// Which directions are currently held, plus latched jump presses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_right: bool,
    pub move_left: bool,
    /// Jump presses received since the last step
    jumps: u32,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(Direction::Right) => self.move_right = true,
            InputEvent::Press(Direction::Left) => self.move_left = true,
            InputEvent::Press(Direction::Up) => self.jumps = self.jumps.saturating_add(1),
            InputEvent::Release(Direction::Right) => self.move_right = false,
            InputEvent::Release(Direction::Left) => self.move_left = false,
            InputEvent::Release(Direction::Up) => {}
        }
    }

    /// Consume latched jump presses
    pub fn take_jumps(&mut self) -> u32 {
        std::mem::take(&mut self.jumps)
    }
}
