//! Clock adapters.
//!
//! - **`espidf` feature** — wraps `esp_timer_get_time()` from the ESP-IDF
//!   high-resolution timer (microsecond precision, monotonic).
//! - otherwise — uses `std::time::Instant` for host runs.
//!
//! Both truncate to a wrapping `u32` millisecond count (~49.7 days per
//! wrap); consumers only ever subtract with wrapping arithmetic.

use core::cell::Cell;

use crate::app::ports::Clock;

/// Monotonic system clock.
pub struct SystemClock {
    #[cfg(not(feature = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(feature = "espidf")]
    fn now_ms(&self) -> u32 {
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1000) as u32
    }

    #[cfg(not(feature = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

/// Hand-driven clock for simulations and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get().wrapping_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
