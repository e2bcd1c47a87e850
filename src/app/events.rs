//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::report::{EventReport, StatusReport};
use crate::status::SystemState;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the initial state).
    Started(SystemState),

    /// The classified tier changed.
    StateChanged { from: SystemState, to: SystemState },

    /// The hazard flag was flipped by the operator since the last tick.
    HazardChanged(bool),

    /// Periodic status snapshot.
    Status(StatusReport),

    /// One-shot alarm report, once per alarm episode.
    Alarm(EventReport),

    /// The shutdown countdown ran out in the current alarm stretch.
    CountdownExhausted { temperature_c: f32, hazard: bool },

    /// The reset button was pressed; the device is about to restart.
    ResetRequested,
}
