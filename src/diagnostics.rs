//! Runtime counters and recent transition history.
//!
//! Everything lives in RAM and resets on power cycle. The firmware logs a
//! [`DiagnosticsReport`] as a JSON line at a slow cadence so field logs
//! show what the controller has been doing between state changes.

use heapless::HistoryBuffer;
use serde::Serialize;

use crate::fsm::HeaterState;

/// Number of transitions kept in the history ring.
pub const HISTORY_LEN: usize = 16;

/// One state change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionRecord {
    pub at_ms: u32,
    pub from: HeaterState,
    pub to: HeaterState,
    /// `None` only for transitions not driven by a sample.
    pub temperature_c: Option<f32>,
}

pub struct Diagnostics {
    cycles: u64,
    samples_accepted: u32,
    samples_missed: u32,
    transitions: u32,
    overheat_trips: u32,
    write_failures: u32,
    history: HistoryBuffer<TransitionRecord, HISTORY_LEN>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            cycles: 0,
            samples_accepted: 0,
            samples_missed: 0,
            transitions: 0,
            overheat_trips: 0,
            write_failures: 0,
            history: HistoryBuffer::new(),
        }
    }

    pub fn record_cycle(&mut self) {
        self.cycles = self.cycles.wrapping_add(1);
    }

    pub fn record_sample(&mut self) {
        self.samples_accepted = self.samples_accepted.saturating_add(1);
    }

    pub fn record_missed(&mut self) {
        self.samples_missed = self.samples_missed.saturating_add(1);
    }

    pub fn record_overheat_trip(&mut self) {
        self.overheat_trips = self.overheat_trips.saturating_add(1);
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures = self.write_failures.saturating_add(1);
    }

    pub fn record_transition(&mut self, record: TransitionRecord) {
        self.transitions = self.transitions.saturating_add(1);
        self.history.write(record);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn samples_accepted(&self) -> u32 {
        self.samples_accepted
    }

    pub fn samples_missed(&self) -> u32 {
        self.samples_missed
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn overheat_trips(&self) -> u32 {
        self.overheat_trips
    }

    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    /// Most recent transition, if any.
    pub fn last_transition(&self) -> Option<&TransitionRecord> {
        self.history.recent()
    }

    /// Transitions oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.history.oldest_ordered()
    }

    pub fn report(&self, state: HeaterState) -> DiagnosticsReport {
        let mut recent = heapless::Vec::new();
        for record in self.history.oldest_ordered() {
            // Capacities match, so this never drops.
            let _ = recent.push(*record);
        }
        DiagnosticsReport {
            state,
            cycles: self.cycles,
            samples_accepted: self.samples_accepted,
            samples_missed: self.samples_missed,
            transitions: self.transitions,
            overheat_trips: self.overheat_trips,
            write_failures: self.write_failures,
            recent,
        }
    }
}

/// Point-in-time snapshot suitable for logging.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub state: HeaterState,
    pub cycles: u64,
    pub samples_accepted: u32,
    pub samples_missed: u32,
    pub transitions: u32,
    pub overheat_trips: u32,
    pub write_failures: u32,
    pub recent: heapless::Vec<TransitionRecord, HISTORY_LEN>,
}

impl DiagnosticsReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
