//! Heater controller firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter          LogEventSink     SystemClock   │
//! │  (Temperature+Actuator)   (EventSink)      (Clock)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ───────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          Controller (pure logic)               │      │
//! │  │  SampleGate · ThermalFsm · Interlock · Blink   │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::sys::EspError;
use log::{info, warn};

use heatctl::adapters::hardware::HardwareAdapter;
use heatctl::adapters::log_sink::LogEventSink;
use heatctl::adapters::time::SystemClock;
use heatctl::app::ports::Clock;
use heatctl::app::service::Controller;
use heatctl::config::ControllerConfig;
use heatctl::error::SensorError;
use heatctl::pins;
use heatctl::sensors::temperature::{AdcChannel, ThermistorSensor};

// ── ADC bridge ────────────────────────────────────────────────
//
// The oneshot channel driver borrows the ADC unit, so the read is
// captured in a closure and handed to the thermistor as an AdcChannel.

struct EspAdc<F>(F);

impl<F: FnMut() -> Result<u16, EspError>> AdcChannel for EspAdc<F> {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        (self.0)().map_err(|e| {
            warn!("ADC read failed: {}", e);
            SensorError::ReadFailed
        })
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("heatctl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = ControllerConfig::default();
    let loop_period = std::time::Duration::from_millis(u64::from(config.loop_period_ms));
    let report_interval_ms = config.status_report_interval_ms;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    info!(
        "Pins: heater=GPIO{} led=GPIO{} thermistor=GPIO{}",
        pins::HEATER_GPIO,
        pins::STATUS_LED_GPIO,
        pins::TEMP_ADC_GPIO
    );

    let adc = AdcDriver::new(peripherals.adc1)?;
    let mut channel = AdcChannelDriver::new(
        &adc,
        peripherals.pins.gpio2,
        &AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        },
    )?;
    let sensor = ThermistorSensor::new(EspAdc(move || channel.read_raw()));

    let heater_pin = PinDriver::output(peripherals.pins.gpio12)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio13)?;

    // ── 4. Construct adapters + controller ────────────────────
    let mut hw = HardwareAdapter::new(sensor, heater_pin, led_pin);
    let mut sink = LogEventSink::new();
    let clock = SystemClock::new();

    let mut controller = Controller::new(config)?;
    controller.start(&mut hw, &mut sink);

    // ── 5. Control loop ───────────────────────────────────────
    let mut last_report_ms = clock.now_ms();
    loop {
        controller.tick(&clock, &mut hw, &mut sink);

        let now = clock.now_ms();
        if now.wrapping_sub(last_report_ms) >= report_interval_ms {
            last_report_ms = now;
            match controller.report().to_json() {
                Ok(json) => info!("STATUS | {}", json),
                Err(e) => warn!("STATUS | report serialisation failed: {}", e),
            }
        }

        std::thread::sleep(loop_period);
    }
}
