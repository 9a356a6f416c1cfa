//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing control events through the `log`
//! facade (UART / USB-CDC on target). One line per accepted sample:
//!
//! ```text
//! Temperature: 27.00 °C | State: STABILIZING
//! ```

use log::{debug, info, warn};

use crate::app::events::ControlEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControlEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Sample {
                temperature_c,
                state,
            } => {
                info!("{}", format_sample(*temperature_c, *state));
            }
            ControlEvent::SampleMissed { error, state } => {
                warn!("SENSOR | {} | holding {}", error, state);
            }
            ControlEvent::StateChanged { from, to } => {
                debug!("STATE | {} -> {}", from, to);
            }
            ControlEvent::OverheatTripped { temperature_c } => match temperature_c {
                Some(t) => warn!("OVERHEAT | tripped at {:.2} \u{00b0}C", t),
                None => warn!("OVERHEAT | tripped"),
            },
            ControlEvent::OverheatCleared { state } => {
                info!("OVERHEAT | cleared, now {}", state);
            }
            ControlEvent::Started(state) => {
                info!("Heater Control System Initialized | initial_state={}", state);
            }
        }
    }
}

/// Console status line for one sample.
pub fn format_sample(temperature_c: f32, state: crate::fsm::HeaterState) -> String {
    format!("Temperature: {temperature_c:.2} \u{00b0}C | State: {state}")
}
