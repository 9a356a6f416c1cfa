//! Controller configuration parameters.
//!
//! Defaults are the compile-time constants below; nothing is reconfigured
//! at runtime. The struct exists so tests and bench setups can build a
//! controller with alternate values, and [`ControllerConfig::validate`]
//! guards those against orderings that would break the transition table.

use serde::{Deserialize, Serialize};

use crate::drivers::led_patterns::BlinkProfile;
use crate::error::{Error, Result};

// --- Timing ---
/// Period between temperature acquisitions.
pub const SAMPLE_INTERVAL_MS: u32 = 2000;
/// Sleep between control cycles on target.
pub const LOOP_PERIOD_MS: u32 = 10;
/// Diagnostics status line cadence.
pub const STATUS_REPORT_INTERVAL_MS: u32 = 60_000;

// --- Temperature thresholds (°C) ---
/// At or below this no heating is needed.
pub const IDLE_FLOOR_C: f32 = 5.0;
pub const ON_THRESHOLD_C: f32 = 25.0;
pub const OFF_THRESHOLD_C: f32 = 30.0;
/// At or above this the heater is cut regardless of state.
pub const OVERHEAT_C: f32 = 40.0;

// --- Indicator blink profiles ---
pub const NORMAL_BLINK: BlinkProfile = BlinkProfile::new(500, 2500);
pub const ALARM_BLINK: BlinkProfile = BlinkProfile::new(250, 250);

/// The four temperature boundaries of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub idle_floor_c: f32,
    pub on_c: f32,
    pub off_c: f32,
    pub overheat_c: f32,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        idle_floor_c: IDLE_FLOOR_C,
        on_c: ON_THRESHOLD_C,
        off_c: OFF_THRESHOLD_C,
        overheat_c: OVERHEAT_C,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Core controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Sensor read interval (milliseconds)
    pub sample_interval_ms: u32,
    /// Delay between control cycles (milliseconds)
    pub loop_period_ms: u32,
    /// Diagnostics report interval (milliseconds)
    pub status_report_interval_ms: u32,

    // --- Thermal ---
    pub thresholds: Thresholds,

    // --- Indicator ---
    /// Blink profile for Heating, Stabilizing and TargetReached.
    pub normal_blink: BlinkProfile,
    /// Blink profile for Overheat.
    pub alarm_blink: BlinkProfile,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            loop_period_ms: LOOP_PERIOD_MS,
            status_report_interval_ms: STATUS_REPORT_INTERVAL_MS,
            thresholds: Thresholds::DEFAULT,
            normal_blink: NORMAL_BLINK,
            alarm_blink: ALARM_BLINK,
        }
    }
}

impl ControllerConfig {
    /// Reject values the control cycle cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let all_finite = [t.idle_floor_c, t.on_c, t.off_c, t.overheat_c]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(Error::Config("thresholds must be finite"));
        }
        if !(t.idle_floor_c < t.on_c && t.on_c < t.off_c && t.off_c < t.overheat_c) {
            return Err(Error::Config(
                "thresholds must satisfy idle_floor < on < off < overheat",
            ));
        }
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be non-zero"));
        }
        for profile in [self.normal_blink, self.alarm_blink] {
            if profile.on_ms == 0 || profile.off_ms == 0 {
                return Err(Error::Config("blink durations must be non-zero"));
            }
        }
        Ok(())
    }
}
