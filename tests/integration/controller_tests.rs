//! Controller integration tests.
//!
//! Drive full control cycles through `Controller` with a mock hardware
//! adapter and a manual clock, then assert on the command history and the
//! emitted events.

use embedded_hal::digital::PinState;
use heatctl::adapters::time::ManualClock;
use heatctl::app::events::ControlEvent;
use heatctl::app::ports::Clock;
use heatctl::app::service::Controller;
use heatctl::config::ControllerConfig;
use heatctl::drivers::led_patterns::BlinkProfile;
use heatctl::error::SensorError;
use heatctl::fsm::HeaterCommand::{Off, On};
use heatctl::fsm::HeaterState;

use crate::mock_hw::{ActuatorCall, MockHardware, VecSink};

// ── Helpers ───────────────────────────────────────────────────

struct Rig {
    controller: Controller,
    clock: ManualClock,
    hw: MockHardware,
    sink: VecSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    fn with_config(config: ControllerConfig) -> Self {
        let mut rig = Self {
            controller: Controller::new(config).unwrap(),
            clock: ManualClock::new(0),
            hw: MockHardware::new(),
            sink: VecSink::new(),
        };
        rig.controller.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    /// Single cycle at an absolute time.
    fn tick_at(&mut self, now_ms: u32) {
        self.clock.set(now_ms);
        self.controller.tick(&self.clock, &mut self.hw, &mut self.sink);
    }

    /// Cycle every 10 ms until `until_ms` (inclusive).
    fn run_until(&mut self, until_ms: u32) {
        while self.clock.now_ms() < until_ms {
            self.clock.advance(10);
            self.controller.tick(&self.clock, &mut self.hw, &mut self.sink);
        }
    }

    /// Set the temperature and run the next sample.
    fn sample(&mut self, now_ms: u32, celsius: f32) -> HeaterState {
        self.hw.set_temperature(celsius);
        self.tick_at(now_ms);
        self.controller.state()
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_writes_both_outputs_low() {
    let rig = Rig::new();
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::Heater(Off),
            ActuatorCall::Indicator(PinState::Low)
        ]
    );
    assert_eq!(rig.sink.events, vec![ControlEvent::Started(HeaterState::Idle)]);
    assert_eq!(rig.controller.state(), HeaterState::Idle);
}

#[test]
fn no_acquisition_before_first_interval() {
    let mut rig = Rig::new();
    rig.hw.set_temperature(20.0);
    rig.run_until(1990);
    assert_eq!(rig.hw.reads, 0);
    assert_eq!(rig.controller.state(), HeaterState::Idle);

    rig.run_until(2000);
    assert_eq!(rig.hw.reads, 1);
    assert_eq!(rig.controller.state(), HeaterState::Heating);
}

#[test]
fn acquires_once_per_interval() {
    let mut rig = Rig::new();
    rig.hw.set_temperature(20.0);
    rig.run_until(10_000);
    assert_eq!(rig.hw.reads, 5);
    assert_eq!(rig.sink.samples(), 5);
    assert_eq!(rig.controller.diagnostics().cycles(), 1000);
}

// ── Heat-up / cool-down cycle ─────────────────────────────────

#[test]
fn full_heating_cycle() {
    let mut rig = Rig::new();

    assert_eq!(rig.sample(2000, 3.0), HeaterState::Idle);
    assert_eq!(rig.hw.last_heater(), Some(Off));

    assert_eq!(rig.sample(4000, 20.0), HeaterState::Heating);
    assert_eq!(rig.hw.last_heater(), Some(On));

    assert_eq!(rig.sample(6000, 27.0), HeaterState::Stabilizing);
    assert_eq!(rig.hw.last_heater(), Some(On));

    // TargetReached keeps the element energised; only Idle and Overheat cut it.
    assert_eq!(rig.sample(8000, 31.0), HeaterState::TargetReached);
    assert_eq!(rig.hw.last_heater(), Some(On));

    assert_eq!(rig.sample(10_000, 28.0), HeaterState::Stabilizing);
    assert_eq!(rig.hw.last_heater(), Some(On));

    // Stabilizing only knows "too cold", so a sharp drop lands in Heating.
    assert_eq!(rig.sample(12_000, 4.0), HeaterState::Heating);
    assert_eq!(rig.sample(14_000, 4.0), HeaterState::Idle);
    assert_eq!(rig.hw.last_heater(), Some(Off));

    // Start-up write plus one per sample.
    assert_eq!(rig.hw.heater_writes().len(), 8);
    assert_eq!(rig.controller.diagnostics().transitions(), 6);
}

#[test]
fn heater_is_rewritten_every_sample_even_without_change() {
    let mut rig = Rig::new();
    for n in 1..=4u32 {
        rig.sample(n * 2000, 20.0);
    }
    assert_eq!(rig.hw.heater_writes(), vec![Off, On, On, On, On]);
}

#[test]
fn sample_line_follows_state_change() {
    let mut rig = Rig::new();
    rig.sink.events.clear();
    rig.sample(2000, 27.0);
    assert_eq!(
        rig.sink.events,
        vec![
            ControlEvent::StateChanged {
                from: HeaterState::Idle,
                to: HeaterState::Stabilizing,
            },
            ControlEvent::Sample {
                temperature_c: 27.0,
                state: HeaterState::Stabilizing,
            },
        ]
    );
}

// ── Overheat ──────────────────────────────────────────────────

#[test]
fn overheat_trips_from_any_state_and_recovers() {
    let mut rig = Rig::new();
    assert_eq!(rig.sample(2000, 20.0), HeaterState::Heating);

    rig.sink.events.clear();
    assert_eq!(rig.sample(4000, 40.0), HeaterState::Overheat);
    assert_eq!(rig.hw.last_heater(), Some(Off));
    assert_eq!(
        rig.sink.events,
        vec![
            ControlEvent::StateChanged {
                from: HeaterState::Heating,
                to: HeaterState::Overheat,
            },
            ControlEvent::OverheatTripped {
                temperature_c: Some(40.0)
            },
            ControlEvent::Sample {
                temperature_c: 40.0,
                state: HeaterState::Overheat,
            },
        ]
    );

    // Still hot: stays put, no second trip.
    assert_eq!(rig.sample(6000, 55.0), HeaterState::Overheat);
    assert_eq!(rig.controller.diagnostics().overheat_trips(), 1);

    // Cooling below overheat re-enters the normal bands.
    rig.sink.events.clear();
    assert_eq!(rig.sample(8000, 35.0), HeaterState::TargetReached);
    assert_eq!(rig.hw.last_heater(), Some(On));
    assert!(rig.sink.events.contains(&ControlEvent::OverheatCleared {
        state: HeaterState::TargetReached
    }));

    assert_eq!(rig.sample(10_000, 22.0), HeaterState::Heating);
    assert_eq!(rig.hw.last_heater(), Some(On));
}

#[test]
fn overheat_straight_to_idle_when_cold() {
    let mut rig = Rig::new();
    rig.sample(2000, 41.0);
    assert_eq!(rig.sample(4000, 4.0), HeaterState::Idle);
}

// ── Missing readings ──────────────────────────────────────────

#[test]
fn missed_reading_holds_state_and_reissues_command() {
    let mut rig = Rig::new();
    rig.sample(2000, 20.0);
    assert_eq!(rig.controller.state(), HeaterState::Heating);

    rig.sink.events.clear();
    rig.hw.fail_reads(SensorError::NotReady);
    rig.tick_at(4000);

    assert_eq!(rig.controller.state(), HeaterState::Heating);
    assert_eq!(rig.hw.heater_writes(), vec![Off, On, On]);
    assert_eq!(
        rig.sink.events,
        vec![ControlEvent::SampleMissed {
            error: SensorError::NotReady,
            state: HeaterState::Heating,
        }]
    );
    assert_eq!(rig.controller.diagnostics().samples_missed(), 1);
    assert_eq!(rig.controller.diagnostics().samples_accepted(), 1);
}

#[test]
fn missed_reading_in_overheat_keeps_heater_off() {
    let mut rig = Rig::new();
    rig.sample(2000, 45.0);
    rig.hw.fail_reads(SensorError::OutOfRange);
    rig.tick_at(4000);
    rig.tick_at(6000);
    assert_eq!(rig.controller.state(), HeaterState::Overheat);
    assert_eq!(rig.hw.heater_writes(), vec![Off, Off, Off, Off]);
    assert_eq!(rig.controller.diagnostics().overheat_trips(), 1);
}

#[test]
fn nan_reading_is_treated_like_no_reading() {
    let mut rig = Rig::new();
    rig.sample(2000, 27.0);
    assert_eq!(rig.sample(4000, f32::NAN), HeaterState::Stabilizing);
    assert_eq!(rig.hw.last_heater(), Some(On));
}

// ── Indicator ─────────────────────────────────────────────────

#[test]
fn indicator_dark_while_idle() {
    let mut rig = Rig::new();
    rig.hw.set_temperature(3.0);
    rig.run_until(10_000);
    assert!(
        rig.hw
            .calls
            .iter()
            .all(|c| !matches!(c, ActuatorCall::Indicator(PinState::High)))
    );
}

#[test]
fn heating_blink_off_phase_starts_at_last_idle_cycle() {
    let mut rig = Rig::new();
    rig.hw.set_temperature(20.0);

    // Sample at 2000 enters Heating; last Idle cycle was at 1990.
    rig.run_until(4480);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
    rig.run_until(4490);
    assert_eq!(rig.controller.indicator_level(), PinState::High);
    rig.run_until(4980);
    assert_eq!(rig.controller.indicator_level(), PinState::High);
    rig.run_until(4990);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
}

#[test]
fn overheat_uses_fast_blink() {
    let mut rig = Rig::new();
    rig.hw.set_temperature(50.0);
    rig.run_until(2000);
    assert_eq!(rig.controller.state(), HeaterState::Overheat);

    // Reference is the last Idle cycle at 1990: toggles every 250 ms from there.
    rig.run_until(2230);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
    rig.run_until(2240);
    assert_eq!(rig.controller.indicator_level(), PinState::High);
    rig.run_until(2490);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
}

#[test]
fn entering_idle_mid_on_phase_forces_indicator_off() {
    let mut config = ControllerConfig::default();
    config.normal_blink = BlinkProfile::new(2000, 2500);
    let mut rig = Rig::with_config(config);

    rig.sample(2000, 35.0);
    assert_eq!(rig.controller.state(), HeaterState::TargetReached);
    rig.tick_at(2500);
    assert_eq!(rig.controller.indicator_level(), PinState::High);

    rig.sample(4000, 3.0);
    assert_eq!(rig.controller.state(), HeaterState::Idle);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
    assert_eq!(rig.hw.last_indicator(), Some(PinState::Low));

    // Back to Heating: a full off period must elapse before the next flash.
    rig.sample(6000, 20.0);
    assert_eq!(rig.controller.indicator_level(), PinState::Low);
}

// ── Diagnostics ───────────────────────────────────────────────

#[test]
fn report_serialises_history() {
    let mut rig = Rig::new();
    rig.sample(2000, 20.0);
    rig.sample(4000, 27.0);
    rig.sample(6000, 45.0);

    let report = rig.controller.report();
    assert_eq!(report.state, HeaterState::Overheat);
    assert_eq!(report.transitions, 3);
    assert_eq!(report.recent.len(), 3);
    assert_eq!(report.recent[2].from, HeaterState::Stabilizing);
    assert_eq!(report.recent[2].at_ms, 6000);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"state\":\"Overheat\""), "{json}");
    assert!(json.contains("\"overheat_trips\":1"), "{json}");
}
