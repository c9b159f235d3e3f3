//! Manual/automatic mode arbiter.
//!
//! Owns the mode flag and the mode-button debounce. The button is the
//! push switch on encoder 1 (active-low); a detected press flips the mode
//! and then holds the whole loop for a fixed debounce period. That hold
//! is the one intentional mid-cycle blocking wait in the system — it goes
//! through the [`Clock`] port so tests can observe it instead of sleeping.

use crate::app::ports::Clock;

/// Which path produces the lit-pixel count this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pixel count follows the sampled brightness bands; averages are
    /// published to the broker.
    Automatic,
    /// Pixel count follows encoder 1; publishing is suppressed.
    Manual,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Self::Automatic => Self::Manual,
            Self::Manual => Self::Automatic,
        }
    }
}

/// Tracks the current mode and debounces the toggle button.
#[derive(Debug)]
pub struct ModeArbiter {
    mode: Mode,
    debounce_ms: u32,
}

impl ModeArbiter {
    /// Starts in automatic mode, as at power-on.
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            mode: Mode::Automatic,
            debounce_ms,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Poll the button level for this cycle. On a press the mode flips
    /// and the arbiter blocks for the debounce period; returns the new
    /// mode so the caller can report it.
    pub fn poll(&mut self, pressed: bool, clock: &mut impl Clock) -> Option<Mode> {
        if !pressed {
            return None;
        }
        self.mode = self.mode.toggled();
        clock.delay_ms(self.debounce_ms);
        Some(self.mode)
    }
}
