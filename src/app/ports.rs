//! Port traits — the boundary between control logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (clock, sensor, outputs, observers) implement these
//! traits. The [`Controller`](super::service::Controller) consumes them via
//! generics, so the control core never touches hardware directly.

use embedded_hal::digital::PinState;

use crate::error::{ActuatorError, SensorError};
use crate::fsm::HeaterCommand;

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX`; callers compare
/// instants with wrapping subtraction only.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One blocking, bounded-latency temperature acquisition.
pub trait TemperatureSource {
    /// Degrees Celsius, or the reason no reading is available.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port. Fire-and-forget: an error is reported for bookkeeping
/// but the controller never retries within a cycle.
pub trait ActuatorPort {
    fn set_heater(&mut self, command: HeaterCommand) -> Result<(), ActuatorError>;

    fn set_indicator(&mut self, level: PinState) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// Observers of the control loop. Purely informational; nothing an
/// observer does feeds back into control.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControlEvent);
}
