//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor on the high
//! side and read through a 12-bit ADC. The simplified Beta equation
//! converts resistance to temperature.
//!
//! Every reading passes a plausibility check before it reaches the control
//! loop. A probe stuck on a supply rail (open or shorted) reads as
//! `ReadFailed`; a non-finite value or one outside the probe's rated range
//! reads as `OutOfRange`. Either way the state machine sees a no-reading
//! tick instead of a bogus temperature.

use crate::app::ports::TemperatureSource;
use crate::error::SensorError;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Readings within this many volts of either rail are treated as a fault.
const RAIL_MARGIN_V: f32 = 0.01;

/// Rated probe range. Also rejects the -127 C "disconnected" value some
/// digital probes report.
pub const MIN_PLAUSIBLE_C: f32 = -55.0;
pub const MAX_PLAUSIBLE_C: f32 = 125.0;

/// Raw ADC access, implemented by the platform (or a simulation).
pub trait AdcChannel {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

/// Reject values that cannot be a real probe temperature.
pub fn check_plausible(celsius: f32) -> Result<f32, SensorError> {
    if celsius.is_finite() && (MIN_PLAUSIBLE_C..=MAX_PLAUSIBLE_C).contains(&celsius) {
        Ok(celsius)
    } else {
        Err(SensorError::OutOfRange)
    }
}

/// Convert a raw 12-bit ADC count to degrees Celsius.
pub fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return Err(SensorError::ReadFailed);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::ReadFailed);
    }
    Ok((1.0 / inv_t) - 273.15)
}

/// Inverse of [`adc_to_celsius`], for simulations and bench fixtures.
pub fn celsius_to_adc(celsius: f32) -> u16 {
    let t_k = celsius + 273.15;
    let r_ntc = R25 * (BETA * (1.0 / t_k - 1.0 / T25_K)).exp();
    let voltage = V_REF * r_ntc / (R_DIVIDER + r_ntc);
    ((voltage / V_REF) * ADC_MAX).round().clamp(0.0, ADC_MAX) as u16
}

pub struct ThermistorSensor<A> {
    adc: A,
}

impl<A: AdcChannel> ThermistorSensor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

impl<A: AdcChannel> TemperatureSource for ThermistorSensor<A> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read_raw()?;
        check_plausible(adc_to_celsius(raw)?)
    }
}

/// In-memory ADC for host runs: returns whatever was last injected.
#[derive(Debug, Clone, Default)]
pub struct SimAdc {
    raw: Option<u16>,
}

impl SimAdc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, raw: u16) {
        self.raw = Some(raw);
    }

    pub fn set_celsius(&mut self, celsius: f32) {
        self.raw = Some(celsius_to_adc(celsius));
    }

    /// Make the next reads fail as if the conversion were not done.
    pub fn disconnect(&mut self) {
        self.raw = None;
    }
}

impl AdcChannel for SimAdc {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.raw.ok_or(SensorError::NotReady)
    }
}
