//! Three-tier temperature classifier.
//!
//! ```text
//!   t <  attention            → Normal
//!   attention <= t < critical → Attention
//!   t >= critical             → Critical
//! ```
//!
//! The hazard flag never changes the tier; it is OR-ed into the alert
//! decision instead (see `alert`).  There is no hysteresis band, so a
//! reading hovering on a threshold can change the tier on every sample.

use log::info;

use crate::config::MonitorConfig;
use crate::status::{SharedStatus, SystemState};

/// The two classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub attention_c: f32,
    pub critical_c: f32,
}

impl Thresholds {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            attention_c: config.attention_threshold_c,
            critical_c: config.critical_threshold_c,
        }
    }

    /// True while the alert path must escalate.
    pub fn alarm_active(&self, temperature_c: f32, hazard: bool) -> bool {
        temperature_c >= self.critical_c || hazard
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            attention_c: 40.0,
            critical_c: 60.0,
        }
    }
}

/// Pure classification.  `hazard` is accepted for symmetry with the alert
/// path but does not influence the tier.
pub fn classify(thresholds: &Thresholds, temperature_c: f32, _hazard: bool) -> SystemState {
    if temperature_c >= thresholds.critical_c {
        SystemState::Critical
    } else if temperature_c >= thresholds.attention_c {
        SystemState::Attention
    } else {
        SystemState::Normal
    }
}

/// Sole writer of `SharedStatus::state`.
pub struct StatusClassifier {
    thresholds: Thresholds,
}

impl StatusClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify the current reading and overwrite the stored state.
    /// Returns `(previous, current)`.
    pub fn update(&self, status: &SharedStatus) -> (SystemState, SystemState) {
        let prev = status.state();
        let next = classify(&self.thresholds, status.temperature_c(), status.hazard());
        status.store_state(next);
        if next != prev {
            info!(
                "classifier: {} -> {} at {:.1}\u{00b0}C",
                prev.name(),
                next.name(),
                status.temperature_c()
            );
        }
        (prev, next)
    }
}
