//! Outbound control events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::error::SensorError;
use crate::fsm::HeaterState;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The controller has started (carries initial state).
    Started(HeaterState),

    /// An accepted sample and the state it produced. Emitted once per
    /// successful acquisition.
    Sample { temperature_c: f32, state: HeaterState },

    /// Acquisition was due but produced no reading.
    SampleMissed { error: SensorError, state: HeaterState },

    /// The state machine moved.
    StateChanged { from: HeaterState, to: HeaterState },

    /// The overheat interlock latched.
    OverheatTripped { temperature_c: Option<f32> },

    /// The interlock released; `state` is where the machine recovered to.
    OverheatCleared { state: HeaterState },
}
