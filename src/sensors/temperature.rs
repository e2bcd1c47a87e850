//! Linear analog temperature sensor.
//!
//! The sensor output spans the full ADC range and maps linearly onto
//! `offset .. offset + span` Celsius (−20 … +80 °C with the defaults):
//!
//! ```text
//!   celsius = raw * span / max_raw + offset
//! ```
//!
//! Out-of-range raw values are not clamped; they extrapolate along the
//! same line.
//!
//! Reads go through `hw_init::adc1_read`, which is the oneshot ADC on
//! ESP-IDF and an injectable simulated channel on the host.

use crate::config::MonitorConfig;
use crate::drivers::hw_init;

/// Convert a raw sample to Celsius.
pub fn raw_to_celsius(raw: u16, max_raw: u16, span_c: f32, offset_c: f32) -> f32 {
    raw as f32 * span_c / max_raw as f32 + offset_c
}

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: f32,
}

pub struct TemperatureSensor {
    max_raw: u16,
    span_c: f32,
    offset_c: f32,
    adc_channel: u32,
}

impl TemperatureSensor {
    pub fn new(adc_channel: u32, config: &MonitorConfig) -> Self {
        Self {
            max_raw: config.adc_max_raw,
            span_c: config.sensor_span_c,
            offset_c: config.sensor_offset_c,
            adc_channel,
        }
    }

    pub fn read(&self) -> TemperatureReading {
        let raw = self.read_adc();
        TemperatureReading {
            raw,
            celsius: self.convert(raw),
        }
    }

    pub fn convert(&self, raw: u16) -> f32 {
        raw_to_celsius(raw, self.max_raw, self.span_c, self.offset_c)
    }

    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc_channel)
    }
}
