//! Per-state sample handlers and the state table.
//!
//! Each handler receives the thresholds and a finite temperature strictly
//! below the overheat line (the override in [`super::transition_with`] has
//! already run) and returns the successor state. Handlers are pure; the
//! heater command is derived from the successor by the caller.
//!
//! Boundary operators differ between states on purpose. Each handler's
//! branches partition the temperature axis with no gaps or overlaps, and
//! the asymmetries (e.g. Idle leaves only above the floor, TargetReached
//! drops to Idle only strictly below it) are the anti-chatter band.

use super::{HeaterState, StateDescriptor};
use crate::config::Thresholds;

/// State table indexed by `HeaterState as usize`.
pub const STATE_TABLE: [StateDescriptor; HeaterState::COUNT] = [
    StateDescriptor {
        id: HeaterState::Idle,
        name: "IDLE",
        on_sample: idle_sample,
    },
    StateDescriptor {
        id: HeaterState::Heating,
        name: "HEATING",
        on_sample: heating_sample,
    },
    StateDescriptor {
        id: HeaterState::Stabilizing,
        name: "STABILIZING",
        on_sample: stabilizing_sample,
    },
    StateDescriptor {
        id: HeaterState::TargetReached,
        name: "TARGET_REACHED",
        on_sample: target_reached_sample,
    },
    StateDescriptor {
        id: HeaterState::Overheat,
        name: "OVERHEAT",
        on_sample: overheat_sample,
    },
];

// ═══════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════

fn idle_sample(th: &Thresholds, temp_c: f32) -> HeaterState {
    if temp_c <= th.idle_floor_c {
        HeaterState::Idle
    } else if temp_c <= th.on_c {
        HeaterState::Heating
    } else if temp_c <= th.off_c {
        HeaterState::Stabilizing
    } else {
        // (off, overheat)
        HeaterState::TargetReached
    }
}

// ═══════════════════════════════════════════════════════════════
//  HEATING
// ═══════════════════════════════════════════════════════════════

fn heating_sample(th: &Thresholds, temp_c: f32) -> HeaterState {
    if temp_c <= th.idle_floor_c {
        HeaterState::Idle
    } else if temp_c >= th.on_c && temp_c <= th.off_c {
        HeaterState::Stabilizing
    } else if temp_c > th.off_c {
        HeaterState::TargetReached
    } else {
        HeaterState::Heating
    }
}

// ═══════════════════════════════════════════════════════════════
//  STABILIZING
// ═══════════════════════════════════════════════════════════════

/// No path to Idle from here; a cold reading falls back to Heating.
fn stabilizing_sample(th: &Thresholds, temp_c: f32) -> HeaterState {
    if temp_c < th.on_c {
        HeaterState::Heating
    } else if temp_c > th.off_c {
        HeaterState::TargetReached
    } else {
        HeaterState::Stabilizing
    }
}

// ═══════════════════════════════════════════════════════════════
//  TARGET_REACHED
// ═══════════════════════════════════════════════════════════════

fn target_reached_sample(th: &Thresholds, temp_c: f32) -> HeaterState {
    if temp_c < th.idle_floor_c {
        HeaterState::Idle
    } else if temp_c < th.on_c {
        HeaterState::Heating
    } else if temp_c <= th.off_c {
        HeaterState::Stabilizing
    } else {
        HeaterState::TargetReached
    }
}

// ═══════════════════════════════════════════════════════════════
//  OVERHEAT
// ═══════════════════════════════════════════════════════════════

/// Recovery once the reading is back below the overheat line.
fn overheat_sample(th: &Thresholds, temp_c: f32) -> HeaterState {
    if temp_c < th.idle_floor_c {
        HeaterState::Idle
    } else if temp_c < th.on_c {
        HeaterState::Heating
    } else if temp_c <= th.off_c {
        HeaterState::Stabilizing
    } else {
        HeaterState::TargetReached
    }
}
