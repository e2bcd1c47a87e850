//! Interrupt-driven operator inputs.
//!
//! ## Hardware
//!
//! Four active-low momentary switches with pull-ups, each on its own
//! falling-edge interrupt.  The ISR calls [`InputEventSource::on_edge`]
//! with the pin's [`InputId`] and the current time; the matching
//! [`DebounceGate`] decides whether the edge counts.
//!
//! | Input          | Accepted edge does                          |
//! |----------------|---------------------------------------------|
//! | `Reset`        | latches a reset request for the main loop   |
//! | `Hazard`       | toggles the hazard-override flag            |
//! | `LedToggle`    | toggles the RGB output enable flag          |
//! | `Mode`         | toggles the display border style            |
//!
//! Handlers only flip flags in [`SharedStatus`].  Anything slow (buzzer,
//! display, the reset itself) happens in the main loop.

use crate::debounce::DebounceGate;
use crate::status::{BorderStyle, SharedStatus};

/// Identity of a monitored digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    Reset,
    Hazard,
    LedToggle,
    Mode,
}

impl InputId {
    pub const ALL: [InputId; 4] = [Self::Reset, Self::Hazard, Self::LedToggle, Self::Mode];

    /// Map a GPIO number to its input, if it is one of ours.
    pub fn from_gpio(gpio: i32) -> Option<Self> {
        match gpio {
            crate::pins::RESET_BUTTON_GPIO => Some(Self::Reset),
            crate::pins::HAZARD_BUTTON_GPIO => Some(Self::Hazard),
            crate::pins::LED_TOGGLE_GPIO => Some(Self::LedToggle),
            crate::pins::MODE_BUTTON_GPIO => Some(Self::Mode),
            _ => None,
        }
    }
}

/// What an accepted edge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    ResetRequested,
    HazardChanged(bool),
    LedsChanged(bool),
    BorderChanged(BorderStyle),
}

/// Debounce gates for every input plus a handle to the status record.
pub struct InputEventSource<'a> {
    status: &'a SharedStatus,
    reset: DebounceGate,
    hazard: DebounceGate,
    led_toggle: DebounceGate,
    mode: DebounceGate,
}

impl<'a> InputEventSource<'a> {
    pub const fn new(status: &'a SharedStatus, debounce_ms: u32) -> Self {
        Self {
            status,
            reset: DebounceGate::new(debounce_ms),
            hazard: DebounceGate::new(debounce_ms),
            led_toggle: DebounceGate::new(debounce_ms),
            mode: DebounceGate::new(debounce_ms),
        }
    }

    /// ISR entry point.  Returns `None` when the edge was bounce.
    pub fn on_edge(&self, input: InputId, now_ms: u32) -> Option<InputAction> {
        if !self.gate(input).should_fire(now_ms) {
            return None;
        }
        let action = match input {
            InputId::Reset => {
                self.status.request_reset();
                InputAction::ResetRequested
            }
            InputId::Hazard => InputAction::HazardChanged(self.status.toggle_hazard()),
            InputId::LedToggle => InputAction::LedsChanged(self.status.toggle_leds()),
            InputId::Mode => InputAction::BorderChanged(self.status.toggle_border()),
        };
        Some(action)
    }

    pub fn gate(&self, input: InputId) -> &DebounceGate {
        match input {
            InputId::Reset => &self.reset,
            InputId::Hazard => &self.hazard,
            InputId::LedToggle => &self.led_toggle,
            InputId::Mode => &self.mode,
        }
    }
}
