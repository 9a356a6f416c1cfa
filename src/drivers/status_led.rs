//! Single-colour status LED on a digital output (active HIGH).

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::error::ActuatorError;

pub struct StatusLed<P> {
    pin: P,
    current: PinState,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            current: PinState::Low,
        }
    }

    pub fn set_level(&mut self, level: PinState) -> Result<(), ActuatorError> {
        self.current = level;
        self.pin.set_state(level).map_err(|e| {
            warn!("Status LED write failed: {:?}", e);
            ActuatorError::GpioWriteFailed
        })
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_level(PinState::Low)
    }

    pub fn current_level(&self) -> PinState {
        self.current
    }

    pub fn release(self) -> P {
        self.pin
    }
}
