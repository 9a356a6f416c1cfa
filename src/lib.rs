//! Heater controller firmware library.
//!
//! Exposes the control logic for host-side testing. Everything that needs
//! ESP-IDF lives behind the `espidf` feature.
//!
//! ```text
//!  SampleGate ──▶ TemperatureSource ──▶ ThermalFsm ──▶ OverheatInterlock ──▶ heater pin
//!                                           │
//!                                           └── state ──▶ BlinkScheduler ──▶ status LED
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod safety;
pub mod scheduler;
pub mod sensors;
