//! Output drivers and the indicator blink scheduler.

pub mod heater;
pub mod led_patterns;
pub mod status_led;
