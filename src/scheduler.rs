//! Sampling gate.
//!
//! The control loop spins far faster than the sensor should be read. The
//! gate admits one acquisition per interval; everything else in the cycle
//! (indicator timing) runs regardless.
//!
//! ```text
//!  now ──▶ SampleGate::poll ──yes──▶ read sensor ──▶ ThermalFsm::step
//!                 │no
//!                 └────────────────▶ (indicator only)
//! ```
//!
//! The reference starts at 0, so the first sample is taken one full
//! interval after boot.

/// Fixed-interval gate on a wrapping millisecond clock.
#[derive(Debug, Clone)]
pub struct SampleGate {
    interval_ms: u32,
    last_sample_ms: u32,
}

impl SampleGate {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_sample_ms: 0,
        }
    }

    /// Returns `true` (and rearms) when a full interval has elapsed.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_sample_ms) >= self.interval_ms {
            self.last_sample_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Milliseconds until the next acquisition is due.
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.interval_ms
            .saturating_sub(now_ms.wrapping_sub(self.last_sample_ms))
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
