//! Application core — control orchestration, zero direct I/O.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
