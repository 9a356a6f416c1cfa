//! Overheat interlock.
//!
//! The transition function already maps `Overheat` to `Off`. The interlock
//! sits between the state machine and the heater driver and enforces the
//! same rule on the write path itself: whatever command arrives, the pin is
//! never driven on while the state is `Overheat`.
//!
//! It also latches the overheat condition so trips and recoveries are
//! logged once per edge instead of once per sample.

use log::{error, info};

use crate::fsm::{HeaterCommand, HeaterState};

/// Edge seen by the interlock on one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockEdge {
    Tripped,
    Cleared,
}

#[derive(Debug, Default)]
pub struct OverheatInterlock {
    latched: bool,
    trips: u32,
}

impl OverheatInterlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate `command` for `state` and update the latch.
    ///
    /// Returns the command to write and the latch edge, if any.
    pub fn gate(
        &mut self,
        state: HeaterState,
        command: HeaterCommand,
        temperature_c: Option<f32>,
    ) -> (HeaterCommand, Option<InterlockEdge>) {
        let overheat = state == HeaterState::Overheat;
        let edge = match (self.latched, overheat) {
            (false, true) => {
                self.trips = self.trips.saturating_add(1);
                match temperature_c {
                    Some(t) => error!("SAFETY: overheat at {:.2} C, heater cut", t),
                    None => error!("SAFETY: overheat, heater cut"),
                }
                Some(InterlockEdge::Tripped)
            }
            (true, false) => {
                info!("SAFETY: overheat cleared, resuming in {}", state);
                Some(InterlockEdge::Cleared)
            }
            _ => None,
        };
        self.latched = overheat;

        let gated = if overheat { HeaterCommand::Off } else { command };
        (gated, edge)
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Number of times the interlock has tripped since boot.
    pub fn trips(&self) -> u32 {
        self.trips
    }
}
