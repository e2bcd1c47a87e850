//! Alert sequencer — escalation outputs for each loop iteration.
//!
//! Evaluated once per main-loop iteration, in order:
//!
//! | Condition                         | Matrix               | RGB     | Buzzer | Countdown     |
//! |-----------------------------------|----------------------|---------|--------|---------------|
//! | `t >= critical` **or** hazard     | digit N, or Danger at 0 | danger | burst | N → N-1, held at 0 |
//! | `attention <= t < critical`       | Caution              | —       | —      | untouched     |
//! | otherwise                         | Safe                 | safe    | —      | reset to start |
//!
//! The countdown is the shutdown timer: each iteration of sustained alarm
//! shows the current digit and steps it down once.  With a start of 9 the
//! tenth alarm iteration finds it at 0 and shows the exhausted pattern.
//! It is only re-armed on a full return to Normal, never in Attention.

use log::{debug, warn};

use crate::classifier::Thresholds;
use crate::status::StatusSnapshot;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_SAFE: Rgb = (0, 255, 0);
pub const COLOUR_CAUTION: Rgb = (255, 200, 0);
pub const COLOUR_DANGER: Rgb = (255, 0, 0);
pub const COLOUR_OFF: Rgb = (0, 0, 0);

/// Closed command set understood by the indicator-matrix driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixCommand {
    /// Single numeral 0–9.
    Digit(u8),
    Safe,
    Caution,
    /// Danger / countdown exhausted.
    Danger,
    Clear,
}

/// Bounded shutdown countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    value: u8,
    start: u8,
}

impl Countdown {
    pub fn new(start: u8) -> Self {
        let start = start.min(9);
        Self { value: start, start }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn is_exhausted(&self) -> bool {
        self.value == 0
    }

    /// Take one step.  Returns the digit to show, or `None` once exhausted.
    pub fn step(&mut self) -> Option<u8> {
        if self.value == 0 {
            return None;
        }
        let shown = self.value;
        self.value -= 1;
        Some(shown)
    }

    pub fn reset(&mut self) {
        self.value = self.start;
    }
}

/// Everything one alert cycle wants the outputs to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertAction {
    pub matrix: MatrixCommand,
    /// `None` leaves the RGB output as it is.
    pub rgb: Option<Rgb>,
    /// Play the configured audible burst.
    pub sound_burst: bool,
    /// Countdown value after this cycle.
    pub countdown: u8,
}

/// Stateless decision table over an explicit countdown.
pub fn run_alert_cycle(
    thresholds: &Thresholds,
    temperature_c: f32,
    hazard: bool,
    countdown: &mut Countdown,
) -> AlertAction {
    if thresholds.alarm_active(temperature_c, hazard) {
        let matrix = match countdown.step() {
            Some(digit) => MatrixCommand::Digit(digit),
            None => MatrixCommand::Danger,
        };
        AlertAction {
            matrix,
            rgb: Some(COLOUR_DANGER),
            sound_burst: true,
            countdown: countdown.value(),
        }
    } else if temperature_c >= thresholds.attention_c {
        AlertAction {
            matrix: MatrixCommand::Caution,
            rgb: None,
            sound_burst: false,
            countdown: countdown.value(),
        }
    } else {
        countdown.reset();
        AlertAction {
            matrix: MatrixCommand::Safe,
            rgb: Some(COLOUR_SAFE),
            sound_burst: false,
            countdown: countdown.value(),
        }
    }
}

/// Owns the countdown and remembers whether exhaustion was already
/// announced in the current alarm stretch.
pub struct AlertSequencer {
    thresholds: Thresholds,
    countdown: Countdown,
    exhaustion_announced: bool,
}

/// Result of [`AlertSequencer::run_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub action: AlertAction,
    /// True on the first cycle that shows the exhausted pattern.
    pub newly_exhausted: bool,
}

impl AlertSequencer {
    pub fn new(thresholds: Thresholds, countdown_start: u8) -> Self {
        Self {
            thresholds,
            countdown: Countdown::new(countdown_start),
            exhaustion_announced: false,
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn run_cycle(&mut self, snap: &StatusSnapshot) -> CycleOutcome {
        let action = run_alert_cycle(
            &self.thresholds,
            snap.temperature_c,
            snap.hazard,
            &mut self.countdown,
        );

        let exhausted_shown = action.sound_burst && action.matrix == MatrixCommand::Danger;
        let newly_exhausted = exhausted_shown && !self.exhaustion_announced;
        if newly_exhausted {
            self.exhaustion_announced = true;
            warn!(
                "alert: countdown exhausted ({:.1}\u{00b0}C, hazard={})",
                snap.temperature_c, snap.hazard
            );
        }
        // Only a return to Normal closes the episode; with a start of 0 the
        // countdown is exhausted again right after the reset.
        if action.matrix == MatrixCommand::Safe {
            self.exhaustion_announced = false;
        }

        debug!("alert: {:?}", action);
        CycleOutcome {
            action,
            newly_exhausted,
        }
    }
}
