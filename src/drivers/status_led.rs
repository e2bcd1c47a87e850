//! RGB status LED driver.
//!
//! Three LEDC PWM channels (CH0-2) drive discrete R/G/B LEDs (or a
//! common-cathode RGB LED). Green while the string box may stay energised,
//! red once the alert path has escalated, dark while the operator has the
//! LED output switched off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::alert::{Rgb, COLOUR_OFF};
use crate::drivers::hw_init;
use crate::error::PeripheralError;

pub struct StatusLed {
    current: Rgb,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: COLOUR_OFF }
    }

    /// Write all three duties. The cached colour is updated only when
    /// every channel accepted its duty.
    pub fn set_colour(&mut self, (r, g, b): Rgb) -> Result<(), PeripheralError> {
        let ok = hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r)
            & hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g)
            & hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
        if !ok {
            return Err(PeripheralError::PwmWriteFailed);
        }
        self.current = (r, g, b);
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), PeripheralError> {
        self.set_colour(COLOUR_OFF)
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}
