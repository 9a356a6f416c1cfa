//! Controller service — one control cycle, end to end.
//!
//! [`Controller`] owns the state machine, indicator scheduler, sample
//! gate, overheat interlock and diagnostics. All I/O flows through port
//! traits passed in at call sites, so the whole service runs against mock
//! adapters in tests.
//!
//! ```text
//!              Clock ──▶ ┌───────────────────────────────┐
//!  TemperatureSource ──▶ │ SampleGate → ThermalFsm       │ ──▶ ActuatorPort
//!                        │   → OverheatInterlock         │     (heater, indicator)
//!                        │ BlinkScheduler (every cycle)  │ ──▶ EventSink
//!                        └───────────────────────────────┘
//! ```

use embedded_hal::digital::PinState;
use log::{debug, info};

use crate::config::ControllerConfig;
use crate::diagnostics::{Diagnostics, DiagnosticsReport, TransitionRecord};
use crate::drivers::led_patterns::BlinkScheduler;
use crate::error::Result;
use crate::fsm::{HeaterCommand, HeaterState, ThermalFsm};
use crate::safety::{InterlockEdge, OverheatInterlock};
use crate::scheduler::SampleGate;

use super::events::ControlEvent;
use super::ports::{ActuatorPort, Clock, EventSink, TemperatureSource};

/// The control loop core.
pub struct Controller {
    config: ControllerConfig,
    fsm: ThermalFsm,
    indicator: BlinkScheduler,
    gate: SampleGate,
    interlock: OverheatInterlock,
    diagnostics: Diagnostics,
    /// Last heater command written to the port.
    heater_command: HeaterCommand,
    /// Last indicator level written to the port.
    indicator_level: PinState,
}

impl Controller {
    /// Validate `config` and build a controller in `Idle`.
    ///
    /// Does **not** touch outputs — call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fsm: ThermalFsm::new(config.thresholds),
            indicator: BlinkScheduler::new(config.normal_blink, config.alarm_blink),
            gate: SampleGate::new(config.sample_interval_ms),
            interlock: OverheatInterlock::new(),
            diagnostics: Diagnostics::new(),
            heater_command: HeaterCommand::Off,
            indicator_level: PinState::Low,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive both outputs to their power-on level (off).
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.write_heater(hw, HeaterCommand::Off);
        self.write_indicator(hw, PinState::Low);
        sink.emit(&ControlEvent::Started(self.fsm.state()));
        info!(
            "Controller started in {} (sample every {} ms)",
            self.fsm.state(),
            self.config.sample_interval_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle: gate → sample → FSM → heater, then indicator.
    ///
    /// `hw` provides both the [`TemperatureSource`] and the
    /// [`ActuatorPort`], which avoids a double mutable borrow of the
    /// hardware adapter while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        clock: &impl Clock,
        hw: &mut (impl TemperatureSource + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        let now_ms = clock.now_ms();
        self.diagnostics.record_cycle();

        if self.gate.poll(now_ms) {
            self.sample_step(now_ms, hw, sink);
        }

        let level = self.indicator.step(self.fsm.state(), now_ms);
        self.write_indicator(hw, level);
    }

    fn sample_step(
        &mut self,
        now_ms: u32,
        hw: &mut (impl TemperatureSource + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.state();

        let sample = match hw.read_celsius() {
            Ok(temp_c) => Some(temp_c),
            Err(error) => {
                debug!("No reading ({error}); holding {prev}");
                self.diagnostics.record_missed();
                sink.emit(&ControlEvent::SampleMissed { error, state: prev });
                None
            }
        };

        let step = self.fsm.step(sample);
        let (command, edge) = self.interlock.gate(step.next, step.command, sample);
        self.write_heater(hw, command);

        if step.next != prev {
            self.diagnostics.record_transition(TransitionRecord {
                at_ms: now_ms,
                from: prev,
                to: step.next,
                temperature_c: sample,
            });
            sink.emit(&ControlEvent::StateChanged {
                from: prev,
                to: step.next,
            });
        }

        match edge {
            Some(InterlockEdge::Tripped) => {
                self.diagnostics.record_overheat_trip();
                sink.emit(&ControlEvent::OverheatTripped {
                    temperature_c: sample,
                });
            }
            Some(InterlockEdge::Cleared) => {
                sink.emit(&ControlEvent::OverheatCleared { state: step.next });
            }
            None => {}
        }

        if let Some(temperature_c) = sample {
            self.diagnostics.record_sample();
            sink.emit(&ControlEvent::Sample {
                temperature_c,
                state: step.next,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> HeaterState {
        self.fsm.state()
    }

    /// Last heater command written to the hardware.
    pub fn heater_command(&self) -> HeaterCommand {
        self.heater_command
    }

    /// Last indicator level written to the hardware.
    pub fn indicator_level(&self) -> PinState {
        self.indicator_level
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn report(&self) -> DiagnosticsReport {
        self.diagnostics.report(self.fsm.state())
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn write_heater(&mut self, hw: &mut impl ActuatorPort, command: HeaterCommand) {
        self.heater_command = command;
        if hw.set_heater(command).is_err() {
            self.diagnostics.record_write_failure();
        }
    }

    fn write_indicator(&mut self, hw: &mut impl ActuatorPort, level: PinState) {
        self.indicator_level = level;
        if hw.set_indicator(level).is_err() {
            self.diagnostics.record_write_failure();
        }
    }
}
