//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Alarm reports additionally go out as one JSON line so a host-side
//! collector can pick them out of the console stream.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::report::{EventReport, StatusReport};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    alarms: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { alarms: 0 }
    }

    /// Alarm reports written since boot.
    pub fn alarms_written(&self) -> u32 {
        self.alarms
    }
}

/// Serialise an alarm report as a single JSON object.
pub fn alarm_json(report: &EventReport) -> Option<String> {
    serde_json::to_string(report).ok()
}

fn log_status(s: &StatusReport) {
    info!(
        "STATUS | {} | T={:.1}\u{00b0}C | hazard={} | risk={:?} | action=\"{}\" | \
         X={:4} Y={:4} pressed={} | rgb={} | countdown={}",
        s.state.name(),
        s.temperature_c,
        if s.hazard { "YES" } else { "NO" },
        s.risk,
        s.recommended_action,
        s.raw_x,
        s.raw_y,
        if s.joystick_pressed { "YES" } else { "NO" },
        if s.system_on { "GREEN (system on)" } else { "RED (system off)" },
        s.countdown,
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => log_status(s),
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::HazardChanged(present) => {
                info!("HAZARD | {}", if *present { "detected" } else { "cleared" });
            }
            AppEvent::Alarm(report) => {
                self.alarms = self.alarms.wrapping_add(1);
                warn!(
                    "ALARM | T={:.1}\u{00b0}C | hazard={} | cause={:?} | action=\"{}\" | final={}",
                    report.temperature_c,
                    report.hazard,
                    report.cause,
                    report.recommended_action,
                    report.final_state.name(),
                );
                match alarm_json(report) {
                    Some(json) => info!("ALARM-JSON | {}", json),
                    None => warn!("ALARM-JSON | serialisation failed"),
                }
            }
            AppEvent::CountdownExhausted {
                temperature_c,
                hazard,
            } => {
                warn!(
                    "COUNTDOWN | exhausted at {:.1}\u{00b0}C (hazard={})",
                    temperature_c, hazard
                );
            }
            AppEvent::ResetRequested => {
                error!("RESET | operator request");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}
