//! Unified error types for the heater controller.
//!
//! A single `Error` enum that every subsystem converts into. All variants
//! are `Copy` so they can be passed through the control cycle and recorded
//! in diagnostics without allocation.
//!
//! None of these are fatal to the control loop. A [`SensorError`] of any
//! kind degrades to a no-reading tick; an [`ActuatorError`] is logged and the
//! write is retried on the next cycle.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature source produced no usable reading.
    Sensor(SensorError),
    /// An output pin write failed.
    Actuator(ActuatorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Reasons a sample could not be taken. The state machine does not
/// distinguish between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Conversion not finished yet.
    NotReady,
    /// Bus or ADC read failed, or the input sits on a supply rail
    /// (open or shorted probe).
    ReadFailed,
    /// Value is not a finite temperature within the probe's range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "sensor not ready"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
