//! Status reporting and the one-shot alarm report latch.
//!
//! Two kinds of output leave the reporter:
//!
//! - a periodic [`StatusReport`] (the live status screen), and
//! - at most one [`EventReport`] per alarm episode.
//!
//! ## Latch lifecycle
//!
//! 1. Boot: latch clear.
//! 2. First report call that sees the alarm condition (critical temperature
//!    or hazard) with the latch clear emits an `EventReport` and sets it.
//! 3. Later calls inside the same episode emit nothing.
//! 4. The latch is cleared only when the temperature drops below the
//!    attention threshold.  Hovering in Attention keeps the episode open.

use log::{info, warn};
use serde::Serialize;

use crate::classifier::Thresholds;
use crate::sensors::SensorSample;
use crate::status::{StatusSnapshot, SystemState};

pub const ACTION_SAFE: &str = "Safe operation";
pub const ACTION_MONITOR: &str = "Monitor (string box energised)";
pub const ACTION_SHUT_DOWN: &str = "Shut down string box";
pub const ACTION_INSPECT: &str = "Inspect sensors";

/// Fire risk wording shown alongside each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    None,
    Low,
    High,
}

impl RiskLevel {
    pub fn for_state(state: SystemState) -> Self {
        match state {
            SystemState::Normal => Self::None,
            SystemState::Attention => Self::Low,
            SystemState::Critical => Self::High,
        }
    }
}

/// Recommended operator action for a tier.
pub fn recommended_action(state: SystemState) -> &'static str {
    match state {
        SystemState::Normal => ACTION_SAFE,
        SystemState::Attention => ACTION_MONITOR,
        SystemState::Critical => ACTION_SHUT_DOWN,
    }
}

/// Why an alarm report was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlarmCause {
    /// Hazard input asserted and temperature critical.
    HazardAndTemperature,
    /// Hazard input asserted, temperature below critical.
    HazardOnly,
    /// Temperature critical, hazard input clear.
    TemperatureOnly,
    /// Neither condition holds; the caller reported without a reason.
    Unknown,
}

impl AlarmCause {
    pub fn infer(thresholds: &Thresholds, temperature_c: f32, hazard: bool) -> Self {
        let hot = temperature_c >= thresholds.critical_c;
        match (hazard, hot) {
            (true, true) => Self::HazardAndTemperature,
            (true, false) => Self::HazardOnly,
            (false, true) => Self::TemperatureOnly,
            (false, false) => Self::Unknown,
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            Self::Unknown => ACTION_INSPECT,
            _ => ACTION_SHUT_DOWN,
        }
    }
}

/// One-per-episode alarm record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventReport {
    pub temperature_c: f32,
    pub hazard: bool,
    pub cause: AlarmCause,
    pub recommended_action: &'static str,
    pub final_state: SystemState,
}

/// Periodic status screen contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    pub state: SystemState,
    pub temperature_c: f32,
    pub hazard: bool,
    pub risk: RiskLevel,
    pub recommended_action: &'static str,
    pub raw_x: u16,
    pub raw_y: u16,
    pub joystick_pressed: bool,
    /// RGB verdict: false once the temperature is critical (string box off).
    pub system_on: bool,
    pub countdown: u8,
}

impl StatusReport {
    pub fn build(
        thresholds: &Thresholds,
        snap: &StatusSnapshot,
        sample: &SensorSample,
        countdown: u8,
    ) -> Self {
        Self {
            state: snap.state,
            temperature_c: snap.temperature_c,
            hazard: snap.hazard,
            risk: RiskLevel::for_state(snap.state),
            recommended_action: recommended_action(snap.state),
            raw_x: sample.raw_x,
            raw_y: sample.raw_y,
            joystick_pressed: sample.joystick_pressed,
            system_on: snap.temperature_c < thresholds.critical_c,
            countdown,
        }
    }
}

/// Guards at-most-one [`EventReport`] per alarm episode.
#[derive(Debug, Default)]
pub struct ReportLatch {
    emitted: bool,
}

impl ReportLatch {
    pub fn new() -> Self {
        Self { emitted: false }
    }

    pub fn is_set(&self) -> bool {
        self.emitted
    }

    /// Run the latch against the current status.
    pub fn maybe_report(
        &mut self,
        thresholds: &Thresholds,
        snap: &StatusSnapshot,
    ) -> Option<EventReport> {
        maybe_report(thresholds, snap, &mut self.emitted)
    }
}

/// Latch decision over an explicit flag.
pub fn maybe_report(
    thresholds: &Thresholds,
    snap: &StatusSnapshot,
    latch: &mut bool,
) -> Option<EventReport> {
    if snap.temperature_c < thresholds.attention_c {
        if *latch {
            info!(
                "report: alarm episode closed at {:.1}\u{00b0}C, latch re-armed",
                snap.temperature_c
            );
        }
        *latch = false;
        return None;
    }

    if *latch || !thresholds.alarm_active(snap.temperature_c, snap.hazard) {
        return None;
    }

    let cause = AlarmCause::infer(thresholds, snap.temperature_c, snap.hazard);
    *latch = true;
    warn!(
        "report: alarm episode opened, cause={:?} at {:.1}\u{00b0}C",
        cause, snap.temperature_c
    );
    Some(EventReport {
        temperature_c: snap.temperature_c,
        hazard: snap.hazard,
        cause,
        recommended_action: cause.recommended_action(),
        final_state: snap.state,
    })
}
