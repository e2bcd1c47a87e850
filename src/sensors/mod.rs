//! Sensor subsystem — the temperature channel, the auxiliary position
//! channel, and the aggregating [`SensorHub`].
//!
//! The hub produces one [`SensorSample`] per main-loop iteration.  The
//! temperature channel doubles as the X axis of the on-board joystick; the
//! Y axis only positions the display marker.

pub mod temperature;

use crate::config::MonitorConfig;
use crate::drivers::hw_init;
use crate::pins;
use temperature::TemperatureSensor;

/// Decode an active-low digital input: a LOW level means asserted.
pub fn active_low(level_high: bool) -> bool {
    !level_high
}

/// One raw sampling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSample {
    /// Raw temperature / X-axis ADC value.
    pub raw_x: u16,
    /// Raw Y-axis ADC value.
    pub raw_y: u16,
    /// Converted temperature (°C).
    pub temperature_c: f32,
    /// Joystick push button currently held.
    pub joystick_pressed: bool,
}

/// Aggregates the analog channels and produces a unified sample.
pub struct SensorHub {
    pub temperature: TemperatureSensor,
    y_channel: u32,
}

impl SensorHub {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            temperature: TemperatureSensor::new(hw_init::ADC1_CH_SENSOR_X, config),
            y_channel: hw_init::ADC1_CH_SENSOR_Y,
        }
    }

    pub fn read_all(&mut self) -> SensorSample {
        let t = self.temperature.read();
        SensorSample {
            raw_x: t.raw,
            raw_y: hw_init::adc1_read(self.y_channel),
            temperature_c: t.celsius,
            joystick_pressed: active_low(hw_init::gpio_read(pins::LED_TOGGLE_GPIO)),
        }
    }
}
