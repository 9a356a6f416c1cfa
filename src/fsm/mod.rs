//! Thermal state machine.
//!
//! The decision is a pure function of `(state, temperature)`:
//!
//! ```text
//!              temperature ≥ overheat?
//!                 │yes            │no
//!                 ▼               ▼
//!         (Overheat, Off)   STATE_TABLE[state].on_sample(th, t)
//!                                 │
//!                                 ▼
//!                    (next, HeaterCommand::for_state(next))
//! ```
//!
//! The overheat override runs before the per-state table and cannot be
//! bypassed by any row. The heater command is never chosen by a handler;
//! it is derived from the successor state, so `Overheat` always maps to
//! `Off`. Writing the command to the pin is the caller's job and happens
//! once per step (see [`crate::app::service::Controller`]).

pub mod states;

use core::fmt;

use embedded_hal::digital::PinState;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use states::STATE_TABLE;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Operating state of the controller.
/// Must stay in sync with [`states::STATE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HeaterState {
    Idle = 0,
    Heating = 1,
    Stabilizing = 2,
    TargetReached = 3,
    Overheat = 4,
}

impl HeaterState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Heating,
        Self::Stabilizing,
        Self::TargetReached,
        Self::Overheat,
    ];

    /// Convert an index back to `HeaterState`. Panics on out-of-range in
    /// debug builds; returns `Overheat` in release, which keeps the heater off.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Heating,
            2 => Self::Stabilizing,
            3 => Self::TargetReached,
            4 => Self::Overheat,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Overheat
            }
        }
    }

    /// Console name, e.g. `TARGET_REACHED`.
    pub fn name(self) -> &'static str {
        STATE_TABLE[self as usize].name
    }

    /// Heater command this state implies.
    pub fn heater_command(self) -> HeaterCommand {
        HeaterCommand::for_state(self)
    }
}

impl fmt::Display for HeaterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Heater command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaterCommand {
    On,
    Off,
}

impl HeaterCommand {
    pub const fn for_state(state: HeaterState) -> Self {
        match state {
            HeaterState::Idle | HeaterState::Overheat => Self::Off,
            HeaterState::Heating | HeaterState::Stabilizing | HeaterState::TargetReached => {
                Self::On
            }
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// Pin level for an active-high heater output.
    pub fn pin_state(self) -> PinState {
        match self {
            Self::On => PinState::High,
            Self::Off => PinState::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// State table
// ---------------------------------------------------------------------------

/// Signature of a per-state sample handler.
pub type SampleFn = fn(&Thresholds, f32) -> HeaterState;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: HeaterState,
    pub name: &'static str,
    pub on_sample: SampleFn,
}

// ---------------------------------------------------------------------------
// Pure transition
// ---------------------------------------------------------------------------

/// Result of one state machine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: HeaterState,
    pub command: HeaterCommand,
}

impl Transition {
    /// Move to (or stay in) `next` with the command it implies.
    pub const fn to(next: HeaterState) -> Self {
        Self {
            next,
            command: HeaterCommand::for_state(next),
        }
    }
}

/// [`transition_with`] using the default thresholds.
pub fn transition(state: HeaterState, temperature_c: f32) -> Transition {
    transition_with(&Thresholds::DEFAULT, state, temperature_c)
}

/// Decide the successor state and heater command for one sample.
///
/// Total over every `(state, temperature)` pair. A NaN temperature matches
/// no threshold and is handled like a missing sample: the state is kept.
pub fn transition_with(th: &Thresholds, state: HeaterState, temperature_c: f32) -> Transition {
    if temperature_c >= th.overheat_c {
        return Transition::to(HeaterState::Overheat);
    }
    if temperature_c.is_nan() {
        return Transition::to(state);
    }
    Transition::to((STATE_TABLE[state as usize].on_sample)(th, temperature_c))
}

// ---------------------------------------------------------------------------
// State owner
// ---------------------------------------------------------------------------

/// Owns the current state. The only writer of it.
pub struct ThermalFsm {
    thresholds: Thresholds,
    current: HeaterState,
}

impl ThermalFsm {
    /// Construct in `Idle`.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current: HeaterState::Idle,
        }
    }

    /// Advance by one sample, or by a no-reading tick when `sample` is `None`.
    ///
    /// A no-reading tick keeps the state and returns its command again so
    /// the caller re-writes the output.
    pub fn step(&mut self, sample: Option<f32>) -> Transition {
        let t = match sample {
            Some(temp_c) => transition_with(&self.thresholds, self.current, temp_c),
            None => Transition::to(self.current),
        };
        if t.next != self.current {
            info!("FSM transition: {} -> {}", self.current, t.next);
            self.current = t.next;
        }
        t
    }

    /// Jump straight to `state` (bring-up and tests).
    pub fn force_state(&mut self, state: HeaterState) {
        if state != self.current {
            info!("FSM forced: {} -> {}", self.current, state);
            self.current = state;
        }
    }

    pub fn state(&self) -> HeaterState {
        self.current
    }

    pub fn command(&self) -> HeaterCommand {
        self.current.heater_command()
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
