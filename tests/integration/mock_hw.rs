//! Mock hardware adapter for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.  The sensor side
//! replays whatever raw axis values the test sets.

use firewatch::alert::{MatrixCommand, Rgb};
use firewatch::app::events::AppEvent;
use firewatch::app::ports::{AlertPort, DisplayPort, EventSink, SensorPort};
use firewatch::display::Frame;
use firewatch::sensors::temperature::raw_to_celsius;
use firewatch::sensors::SensorSample;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Matrix(MatrixCommand),
    Rgb(Rgb),
    Burst,
    Reset,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub raw_x: u16,
    pub raw_y: u16,
    pub joystick_pressed: bool,
    pub calls: Vec<OutputCall>,
    pub frames: Vec<Frame>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            raw_x: 0,
            raw_y: 2048,
            joystick_pressed: false,
            calls: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Set the temperature channel so it converts to roughly `celsius`.
    pub fn set_temperature(&mut self, celsius: f32) {
        self.raw_x = ((celsius + 20.0) * 4095.0 / 100.0).round().clamp(0.0, 4095.0) as u16;
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.frames.clear();
    }

    pub fn last_matrix(&self) -> Option<MatrixCommand> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Matrix(m) => Some(*m),
            _ => None,
        })
    }

    pub fn last_rgb(&self) -> Option<Rgb> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Rgb(rgb) => Some(*rgb),
            _ => None,
        })
    }

    pub fn bursts(&self) -> usize {
        self.calls.iter().filter(|c| **c == OutputCall::Burst).count()
    }

    pub fn resets(&self) -> usize {
        self.calls.iter().filter(|c| **c == OutputCall::Reset).count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_sample(&mut self) -> SensorSample {
        SensorSample {
            raw_x: self.raw_x,
            raw_y: self.raw_y,
            temperature_c: raw_to_celsius(self.raw_x, 4095, 100.0, -20.0),
            joystick_pressed: self.joystick_pressed,
        }
    }
}

impl AlertPort for MockHardware {
    fn show_matrix(&mut self, cmd: MatrixCommand) {
        self.calls.push(OutputCall::Matrix(cmd));
    }

    fn set_rgb(&mut self, rgb: Rgb) {
        self.calls.push(OutputCall::Rgb(rgb));
    }

    fn sound_burst(&mut self) {
        self.calls.push(OutputCall::Burst);
    }

    fn request_reset(&mut self) {
        self.calls.push(OutputCall::Reset);
    }
}

impl DisplayPort for MockHardware {
    fn draw(&mut self, frame: &Frame) {
        self.frames.push(*frame);
    }
}

// ── Recording event sink ─────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn alarms(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Alarm(_)))
            .count()
    }

    pub fn statuses(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Status(_)))
            .count()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
