//! System configuration parameters
//!
//! All tunable parameters for the Firewatch monitor.  Thresholds, timing and
//! the audible alert signature live here; pin numbers live in `pins`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on pulses in one audible burst.
pub const MAX_BUZZER_PULSES: u8 = 50;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Classification thresholds ---
    /// Temperature (Celsius) at which the system enters Attention
    pub attention_threshold_c: f32,
    /// Temperature (Celsius) at which the system enters Critical
    pub critical_threshold_c: f32,

    // --- Sensor conversion ---
    /// Full-scale raw ADC value
    pub adc_max_raw: u16,
    /// Temperature span covered by the full ADC range (Celsius)
    pub sensor_span_c: f32,
    /// Temperature reported at raw = 0 (Celsius)
    pub sensor_offset_c: f32,

    // --- Inputs ---
    /// Minimum quiet interval between two accepted button edges (milliseconds)
    pub debounce_ms: u32,

    // --- Timing ---
    /// Main loop interval (milliseconds)
    pub loop_interval_ms: u32,
    /// Status snapshot interval (milliseconds)
    pub report_interval_ms: u32,

    // --- Alert signature ---
    /// Countdown start value shown on the indicator matrix (0-9)
    pub countdown_start: u8,
    /// Pulses per audible burst (1-50)
    pub buzzer_pulses: u8,
    /// Buzzer on-time per pulse (microseconds)
    pub buzzer_on_us: u32,
    /// Silence between pulses (microseconds)
    pub buzzer_off_us: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            attention_threshold_c: 40.0,
            critical_threshold_c: 60.0,

            // Sensor: 0..4095 maps linearly onto -20..+80 C
            adc_max_raw: 4095,
            sensor_span_c: 100.0,
            sensor_offset_c: -20.0,

            // Inputs
            debounce_ms: 200,

            // Timing
            loop_interval_ms: 100,    // 10 Hz
            report_interval_ms: 1000, // 1 Hz

            // Alert signature
            countdown_start: 9,
            buzzer_pulses: 5,
            buzzer_on_us: 5_000,
            buzzer_off_us: 10_000,
        }
    }
}

impl MonitorConfig {
    /// Reject out-of-range values.  Never clamps.
    pub fn validate(&self) -> Result<()> {
        let ordered = self
            .attention_threshold_c
            .partial_cmp(&self.critical_threshold_c)
            == Some(core::cmp::Ordering::Less);
        if !ordered {
            return Err(Error::Config(
                "attention threshold must be below critical threshold",
            ));
        }
        if self.adc_max_raw == 0 {
            return Err(Error::Config("adc_max_raw must be non-zero"));
        }
        if self.countdown_start > 9 {
            return Err(Error::Config("countdown_start must fit a single digit"));
        }
        if self.buzzer_pulses == 0 || self.buzzer_pulses > MAX_BUZZER_PULSES {
            return Err(Error::Config("buzzer_pulses must be within 1..=50"));
        }
        if self.loop_interval_ms == 0 || self.report_interval_ms == 0 {
            return Err(Error::Config("loop and report intervals must be non-zero"));
        }
        if self.report_interval_ms < self.loop_interval_ms {
            return Err(Error::Config(
                "report interval must not be shorter than the loop interval",
            ));
        }
        Ok(())
    }

    /// Number of main-loop iterations between two status snapshots.
    pub fn report_every_ticks(&self) -> u32 {
        (self.report_interval_ms / self.loop_interval_ms.max(1)).max(1)
    }
}
