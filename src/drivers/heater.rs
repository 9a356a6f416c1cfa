//! Heater output driver (relay / SSR enable, active HIGH).
//!
//! The pin is written on every [`HeaterDriver::apply`], even when the
//! command has not changed. Anything that flipped the output out of band
//! is corrected on the next control step.
//!
//! Writes are fire-and-forget: a failed write is logged and counted, and
//! the next step tries again.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;
use crate::fsm::HeaterCommand;

pub struct HeaterDriver<P> {
    pin: P,
    commanded: HeaterCommand,
    write_failures: u32,
}

impl<P: OutputPin> HeaterDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            commanded: HeaterCommand::Off,
            write_failures: 0,
        }
    }

    /// Drive the pin to match `command`.
    pub fn apply(&mut self, command: HeaterCommand) -> Result<(), ActuatorError> {
        self.commanded = command;
        if let Err(e) = self.pin.set_state(command.pin_state()) {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("Heater pin write failed ({:?}): {:?}", command, e);
            return Err(ActuatorError::GpioWriteFailed);
        }
        Ok(())
    }

    /// Last command passed to [`apply`](Self::apply).
    pub fn commanded(&self) -> HeaterCommand {
        self.commanded
    }

    pub fn is_on(&self) -> bool {
        self.commanded.is_on()
    }

    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    /// Give the pin back (tests, shutdown).
    pub fn release(self) -> P {
        self.pin
    }
}
