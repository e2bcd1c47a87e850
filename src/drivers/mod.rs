//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod buzzer;
pub mod display;
pub mod hw_init;
pub mod led_matrix;
pub mod status_led;
