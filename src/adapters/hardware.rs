//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the temperature source and both output drivers, exposing them
//! through [`TemperatureSource`] and [`ActuatorPort`]. Pins are anything
//! implementing `embedded_hal::digital::OutputPin`, so the same adapter
//! drives ESP-IDF `PinDriver`s on target and recording pins in tests.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::{ActuatorPort, TemperatureSource};
use crate::drivers::heater::HeaterDriver;
use crate::drivers::status_led::StatusLed;
use crate::error::{ActuatorError, SensorError};
use crate::fsm::HeaterCommand;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, H, L> {
    sensor: S,
    heater: HeaterDriver<H>,
    led: StatusLed<L>,
}

impl<S, H: OutputPin, L: OutputPin> HardwareAdapter<S, H, L> {
    pub fn new(sensor: S, heater_pin: H, led_pin: L) -> Self {
        Self {
            sensor,
            heater: HeaterDriver::new(heater_pin),
            led: StatusLed::new(led_pin),
        }
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn heater(&self) -> &HeaterDriver<H> {
        &self.heater
    }

    pub fn led(&self) -> &StatusLed<L> {
        &self.led
    }

    /// Tear down and return the pins.
    pub fn release(self) -> (S, H, L) {
        (self.sensor, self.heater.release(), self.led.release())
    }
}

// ── TemperatureSource implementation ──────────────────────────

impl<S: TemperatureSource, H, L> TemperatureSource for HardwareAdapter<S, H, L> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.sensor.read_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, H: OutputPin, L: OutputPin> ActuatorPort for HardwareAdapter<S, H, L> {
    fn set_heater(&mut self, command: HeaterCommand) -> Result<(), ActuatorError> {
        self.heater.apply(command)
    }

    fn set_indicator(&mut self, level: PinState) -> Result<(), ActuatorError> {
        self.led.set_level(level)
    }
}
