//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth — the firmware entry point references this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Heater relay / SSR enable (active HIGH).
pub const HEATER_GPIO: i32 = 12;
/// Status LED (active HIGH).
pub const STATUS_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor divider. ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 2;
