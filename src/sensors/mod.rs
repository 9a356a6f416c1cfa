//! Sensor drivers.
//!
//! Each driver implements [`TemperatureSource`](crate::app::ports::TemperatureSource)
//! and is owned by the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter).

pub mod temperature;
