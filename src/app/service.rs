//! Monitor service — the per-iteration orchestration.
//!
//! [`MonitorService`] owns the classifier, the alert sequencer and the
//! report latch, and borrows the shared [`SharedStatus`] record that the
//! input ISRs also write.  All I/O flows through port traits passed in at
//! call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        MonitorService         │
//!  AlertPort  ◀── │ Classifier · Alert · Reporter │
//!  DisplayPort ◀──└──────────────────────────────┘
//! ```
//!
//! One call to [`MonitorService::tick`] is one main-loop iteration:
//!
//! 1. honour a pending reset request
//! 2. sample, store the temperature, classify
//! 3. redraw the display frame
//! 4. run the alert cycle and drive matrix / RGB / buzzer
//! 5. report latch; every `report_interval_ms` also a status snapshot

use log::{error, info};

use crate::alert::{AlertSequencer, MatrixCommand, COLOUR_OFF};
use crate::classifier::{StatusClassifier, Thresholds};
use crate::config::MonitorConfig;
use crate::display::compose_frame;
use crate::error::Result;
use crate::report::{ReportLatch, StatusReport};
use crate::sensors::SensorSample;
use crate::status::{SharedStatus, StatusSnapshot, SystemState};

use super::events::AppEvent;
use super::ports::{AlertPort, DisplayPort, EventSink, SensorPort};

/// The service orchestrates all domain logic for one device.
pub struct MonitorService<'a> {
    status: &'a SharedStatus,
    config: MonitorConfig,
    classifier: StatusClassifier,
    sequencer: AlertSequencer,
    latch: ReportLatch,
    report_every: u32,
    tick_count: u64,
    last_sample: SensorSample,
    last_hazard: bool,
}

impl<'a> MonitorService<'a> {
    /// Validate the configuration and build the service.
    pub fn new(config: MonitorConfig, status: &'a SharedStatus) -> Result<Self> {
        config.validate()?;
        let thresholds = Thresholds::from_config(&config);
        Ok(Self {
            status,
            classifier: StatusClassifier::new(thresholds),
            sequencer: AlertSequencer::new(thresholds, config.countdown_start),
            latch: ReportLatch::new(),
            report_every: config.report_every_ticks(),
            tick_count: 0,
            last_sample: SensorSample::default(),
            last_hazard: status.hazard(),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Blank the indicator matrix and announce the initial state.
    pub fn start(&mut self, hw: &mut impl AlertPort, sink: &mut impl EventSink) {
        hw.show_matrix(MatrixCommand::Clear);
        let state = self.status.state();
        sink.emit(&AppEvent::Started(state));
        info!("MonitorService started in {}", state.name());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one main-loop iteration.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + AlertPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Reset requests are latched by the ISR and served here.
        if self.status.take_reset_request() {
            error!("Reset requested by operator");
            sink.emit(&AppEvent::ResetRequested);
            hw.request_reset();
        }

        // 2. Sample and classify.
        let sample = hw.read_sample();
        self.last_sample = sample;
        self.status.set_temperature_c(sample.temperature_c);
        let (prev, now) = self.classifier.update(self.status);
        if prev != now {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: now,
            });
        }

        let snap = self.status.snapshot();
        if snap.hazard != self.last_hazard {
            self.last_hazard = snap.hazard;
            info!("Hazard override {}", if snap.hazard { "SET" } else { "CLEARED" });
            sink.emit(&AppEvent::HazardChanged(snap.hazard));
        }

        // 3. Display.
        hw.draw(&compose_frame(sample.raw_x, sample.raw_y, snap.border));

        // 4. Alert outputs.
        self.apply_alerts(&snap, hw, sink);

        // 5. Status at the slower cadence; the alarm latch sees every tick
        //    so a short episode is still reported when it opens.
        if (self.tick_count - 1) % u64::from(self.report_every) == 0 {
            self.report_status(&snap, sink);
        }
        let thresholds = *self.classifier.thresholds();
        if let Some(report) = self.latch.maybe_report(&thresholds, &snap) {
            sink.emit(&AppEvent::Alarm(report));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current classified state.
    pub fn state(&self) -> SystemState {
        self.status.state()
    }

    /// Current countdown value.
    pub fn countdown(&self) -> u8 {
        self.sequencer.countdown().value()
    }

    /// Whether an alarm report was already emitted in this episode.
    pub fn report_latched(&self) -> bool {
        self.latch.is_set()
    }

    /// Total iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Build a status snapshot from the last sample without emitting it.
    pub fn build_status(&self) -> StatusReport {
        StatusReport::build(
            self.classifier.thresholds(),
            &self.status.snapshot(),
            &self.last_sample,
            self.countdown(),
        )
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_alerts(
        &mut self,
        snap: &StatusSnapshot,
        hw: &mut impl AlertPort,
        sink: &mut impl EventSink,
    ) {
        let outcome = self.sequencer.run_cycle(snap);
        let action = outcome.action;

        hw.show_matrix(action.matrix);

        // The LED-enable flag only gates the RGB output.
        if !snap.leds_enabled {
            hw.set_rgb(COLOUR_OFF);
        } else if let Some(rgb) = action.rgb {
            hw.set_rgb(rgb);
        }

        if action.sound_burst {
            hw.sound_burst();
        }

        if outcome.newly_exhausted {
            sink.emit(&AppEvent::CountdownExhausted {
                temperature_c: snap.temperature_c,
                hazard: snap.hazard,
            });
        }
    }

    fn report_status(&self, snap: &StatusSnapshot, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Status(StatusReport::build(
            self.classifier.thresholds(),
            snap,
            &self.last_sample,
            self.countdown(),
        )));
    }
}
