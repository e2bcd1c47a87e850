//! Shared system status record.
//!
//! One [`SharedStatus`] exists per device.  It is handed by reference both to
//! the main loop and to the GPIO interrupt handlers, so every field is an
//! atomic scalar and each has a documented writer:
//!
//! | Field            | Writer                          | Readers            |
//! |------------------|---------------------------------|--------------------|
//! | `state`          | `StatusClassifier` (main loop)  | service, reporter  |
//! | `temperature`    | sampling step (main loop)       | everyone           |
//! | `hazard`         | hazard-button ISR               | main loop          |
//! | `leds_enabled`   | joystick-button ISR             | main loop          |
//! | `border`         | mode-button ISR                 | main loop          |
//! | `reset_request`  | reset-button ISR (set), main loop (take) | main loop |
//!
//! No locks.  A reader can only ever observe the old or the new value of a
//! field; multi-field consistency is not promised and not needed.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use serde::Serialize;

/// Discrete risk tier derived from the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum SystemState {
    /// Below the attention threshold.
    Normal = 0,
    /// Between the attention and critical thresholds.
    Attention = 1,
    /// At or above the critical threshold.
    Critical = 2,
}

impl SystemState {
    /// Convert a stored discriminant back.  Unknown values decode as
    /// `Critical` so a corrupted word errs on the loud side.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Attention,
            _ => Self::Critical,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Attention => "ATTENTION",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Bitmap-display border thickness, toggled by the mode button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum BorderStyle {
    Thin = 1,
    Thick = 2,
}

impl BorderStyle {
    pub fn toggled(self) -> Self {
        match self {
            Self::Thin => Self::Thick,
            Self::Thick => Self::Thin,
        }
    }

    fn from_u8(raw: u8) -> Self {
        if raw == Self::Thick as u8 { Self::Thick } else { Self::Thin }
    }
}

/// Point-in-time copy of the status record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub state: SystemState,
    pub temperature_c: f32,
    pub hazard: bool,
    pub leds_enabled: bool,
    pub border: BorderStyle,
}

/// The process-wide status record.  `const`-constructible so it can live in
/// a `static` reachable from ISRs.
pub struct SharedStatus {
    state: AtomicU8,
    /// `f32` bit pattern.
    temperature: AtomicU32,
    hazard: AtomicBool,
    leds_enabled: AtomicBool,
    border: AtomicU8,
    reset_request: AtomicBool,
}

impl SharedStatus {
    /// Boot values: Normal, 0.0 C, no hazard, LEDs on, thin border.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(SystemState::Normal as u8),
            temperature: AtomicU32::new(0),
            hazard: AtomicBool::new(false),
            leds_enabled: AtomicBool::new(true),
            border: AtomicU8::new(BorderStyle::Thin as u8),
            reset_request: AtomicBool::new(false),
        }
    }

    // ── state ────────────────────────────────────────────────

    pub fn state(&self) -> SystemState {
        SystemState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Only the classifier calls this.
    pub(crate) fn store_state(&self, state: SystemState) {
        self.state.store(state as u8, Ordering::Release);
    }

    // ── temperature ──────────────────────────────────────────

    pub fn temperature_c(&self) -> f32 {
        f32::from_bits(self.temperature.load(Ordering::Acquire))
    }

    pub fn set_temperature_c(&self, celsius: f32) {
        self.temperature.store(celsius.to_bits(), Ordering::Release);
    }

    // ── operator flags (ISR writers) ─────────────────────────

    pub fn hazard(&self) -> bool {
        self.hazard.load(Ordering::Acquire)
    }

    pub fn set_hazard(&self, present: bool) {
        self.hazard.store(present, Ordering::Release);
    }

    /// Flip the hazard flag; returns the new value.
    pub fn toggle_hazard(&self) -> bool {
        !self.hazard.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn leds_enabled(&self) -> bool {
        self.leds_enabled.load(Ordering::Acquire)
    }

    /// Flip the LED enable flag; returns the new value.
    pub fn toggle_leds(&self) -> bool {
        !self.leds_enabled.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn border(&self) -> BorderStyle {
        BorderStyle::from_u8(self.border.load(Ordering::Acquire))
    }

    /// Flip the border style; returns the new style.  Only the mode-button
    /// ISR writes this field, so load-then-store cannot lose an update.
    pub fn toggle_border(&self) -> BorderStyle {
        let next = self.border().toggled();
        self.border.store(next as u8, Ordering::Release);
        next
    }

    // ── reset request ────────────────────────────────────────

    pub fn request_reset(&self) {
        self.reset_request.store(true, Ordering::Release);
    }

    /// Consume a pending reset request.
    pub fn take_reset_request(&self) -> bool {
        self.reset_request.swap(false, Ordering::AcqRel)
    }

    // ── snapshot ─────────────────────────────────────────────

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state(),
            temperature_c: self.temperature_c(),
            hazard: self.hazard(),
            leds_enabled: self.leds_enabled(),
            border: self.border(),
        }
    }
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}
