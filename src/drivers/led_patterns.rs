//! Status indicator blink scheduler.
//!
//! Produces a free-running asymmetric square wave whose on/off durations are
//! selected by the current [`HeaterState`]:
//!
//! | State                                 | Profile        |
//! |---------------------------------------|----------------|
//! | Idle                                  | off, no blink  |
//! | Heating / Stabilizing / TargetReached | 500 on / 2500 off |
//! | Overheat                              | 250 on / 250 off  |
//!
//! The profile is looked up on every call, never cached, so a state change
//! takes effect on the very next cycle. Entering Idle forces the phase off
//! and moves the timing reference to `now`, so the next blinking state
//! starts with a clean off phase.
//!
//! All elapsed-time math uses wrapping subtraction on `u32` milliseconds.

use embedded_hal::digital::PinState;
use serde::{Deserialize, Serialize};

use crate::config::{ALARM_BLINK, NORMAL_BLINK};
use crate::fsm::HeaterState;

/// On/off durations of one blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkProfile {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl BlinkProfile {
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }
}

/// Indicator half-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    On,
    Off,
}

impl Phase {
    pub fn pin_state(self) -> PinState {
        match self {
            Self::On => PinState::High,
            Self::Off => PinState::Low,
        }
    }
}

/// Blink scheduler. Stack-allocated, owns only its phase and timer.
pub struct BlinkScheduler {
    normal: BlinkProfile,
    alarm: BlinkProfile,
    phase: Phase,
    last_toggle_ms: u32,
}

impl Default for BlinkScheduler {
    fn default() -> Self {
        Self::new(NORMAL_BLINK, ALARM_BLINK)
    }
}

impl BlinkScheduler {
    /// Start in the off phase with the timing reference at 0.
    pub fn new(normal: BlinkProfile, alarm: BlinkProfile) -> Self {
        Self {
            normal,
            alarm,
            phase: Phase::Off,
            last_toggle_ms: 0,
        }
    }

    /// Blink profile for `state`, or `None` when the indicator stays dark.
    pub fn profile_for(&self, state: HeaterState) -> Option<BlinkProfile> {
        match state {
            HeaterState::Idle => None,
            HeaterState::Heating | HeaterState::Stabilizing | HeaterState::TargetReached => {
                Some(self.normal)
            }
            HeaterState::Overheat => Some(self.alarm),
        }
    }

    /// Advance the blink timer and return the indicator level.
    pub fn step(&mut self, state: HeaterState, now_ms: u32) -> PinState {
        let Some(profile) = self.profile_for(state) else {
            self.phase = Phase::Off;
            self.last_toggle_ms = now_ms;
            return PinState::Low;
        };

        let elapsed = now_ms.wrapping_sub(self.last_toggle_ms);
        match self.phase {
            Phase::On if elapsed >= profile.on_ms => {
                self.phase = Phase::Off;
                self.last_toggle_ms = now_ms;
            }
            Phase::Off if elapsed >= profile.off_ms => {
                self.phase = Phase::On;
                self.last_toggle_ms = now_ms;
            }
            _ => {}
        }
        self.phase.pin_state()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_toggle_ms(&self) -> u32 {
        self.last_toggle_ms
    }
}
