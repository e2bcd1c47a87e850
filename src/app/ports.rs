//! Port traits — the boundary between the monitor core and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, alert outputs, display, event sinks) implement
//! these traits.  [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the core never touches hardware directly.
//!
//! Output ports return `()`: writes are fire-and-forget from the core's
//! point of view.  Adapters log their own failures.

use crate::alert::{MatrixCommand, Rgb};
use crate::display::Frame;
use crate::sensors::SensorSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per loop iteration.
pub trait SensorPort {
    /// Sample every analog channel and convert the temperature.
    fn read_sample(&mut self) -> SensorSample;
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → LED matrix, RGB, buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for everything the alert sequencer drives.
pub trait AlertPort {
    /// Send one command to the indicator matrix.
    fn show_matrix(&mut self, cmd: MatrixCommand);

    /// Set the secondary RGB output.
    fn set_rgb(&mut self, rgb: Rgb);

    /// Play one audible burst.  Blocks for the length of the pattern, so it
    /// must only be called from the main loop.
    fn sound_burst(&mut self);

    /// Request a device-level reset.  Does not return on real hardware.
    fn request_reset(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → bitmap display)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Redraw the whole screen.
    fn draw(&mut self, frame: &Frame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / report output)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
