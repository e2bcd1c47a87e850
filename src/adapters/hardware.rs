//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all output drivers, exposing them through
//! [`SensorPort`], [`AlertPort`] and [`DisplayPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.
//!
//! Output failures are logged by the drivers and swallowed here: the
//! monitor keeps sampling and classifying even if one output is dead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::{error, warn};

use crate::alert::{MatrixCommand, Rgb};
use crate::app::ports::{AlertPort, DisplayPort, SensorPort};
use crate::display::Frame;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::display::OledDisplay;
use crate::drivers::hw_init;
use crate::drivers::led_matrix::{LedMatrix, MatrixWriter};
use crate::drivers::status_led::StatusLed;
use crate::sensors::{SensorHub, SensorSample};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, D, W, I> {
    sensor_hub: SensorHub,
    led: StatusLed,
    matrix: LedMatrix<W>,
    buzzer: Buzzer<P, D>,
    display: Option<OledDisplay<I>>,
}

impl<P, D, W, I> HardwareAdapter<P, D, W, I>
where
    P: OutputPin,
    D: DelayNs,
    W: MatrixWriter,
    I: I2c,
{
    /// `display` is optional: a missing panel must not stop the monitor.
    pub fn new(
        sensor_hub: SensorHub,
        led: StatusLed,
        matrix: LedMatrix<W>,
        buzzer: Buzzer<P, D>,
        display: Option<OledDisplay<I>>,
    ) -> Self {
        if display.is_none() {
            warn!("HardwareAdapter: running without display");
        }
        Self {
            sensor_hub,
            led,
            matrix,
            buzzer,
            display,
        }
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }

    pub fn matrix(&self) -> &LedMatrix<W> {
        &self.matrix
    }

    pub fn buzzer(&self) -> &Buzzer<P, D> {
        &self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D, W, I> SensorPort for HardwareAdapter<P, D, W, I> {
    fn read_sample(&mut self) -> SensorSample {
        self.sensor_hub.read_all()
    }
}

// ── AlertPort implementation ──────────────────────────────────

impl<P, D, W, I> AlertPort for HardwareAdapter<P, D, W, I>
where
    P: OutputPin,
    D: DelayNs,
    W: MatrixWriter,
{
    fn show_matrix(&mut self, cmd: MatrixCommand) {
        let _ = self.matrix.show(cmd);
    }

    fn set_rgb(&mut self, rgb: Rgb) {
        if let Err(e) = self.led.set_colour(rgb) {
            warn!("status LED: {}", e);
        }
    }

    fn sound_burst(&mut self) {
        let _ = self.buzzer.burst();
    }

    fn request_reset(&mut self) {
        error!("HardwareAdapter: restarting");
        let _ = self.buzzer.off();
        let _ = self.led.off();
        let _ = self.matrix.show(MatrixCommand::Clear);
        hw_init::restart();
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<P, D, W, I> DisplayPort for HardwareAdapter<P, D, W, I>
where
    I: I2c,
{
    fn draw(&mut self, frame: &Frame) {
        if let Some(display) = self.display.as_mut() {
            let _ = display.show(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::COLOUR_DANGER;
    use crate::config::MonitorConfig;
    use crate::drivers::buzzer::BuzzerPattern;
    use crate::drivers::led_matrix::MatrixFrame;
    use crate::error::PeripheralError;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::i2c::{ErrorType as I2cErrorType, Operation, SevenBitAddress};

    struct NullPin;
    impl ErrorType for NullPin {
        type Error = Infallible;
    }
    impl OutputPin for NullPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoDelay;
    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    struct NullWriter;
    impl MatrixWriter for NullWriter {
        fn write(&mut self, _frame: &MatrixFrame) -> Result<(), PeripheralError> {
            Ok(())
        }
    }

    struct NullI2c;
    impl I2cErrorType for NullI2c {
        type Error = Infallible;
    }
    impl I2c<SevenBitAddress> for NullI2c {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            Ok(())
        }
    }

    fn adapter() -> HardwareAdapter<NullPin, NoDelay, NullWriter, NullI2c> {
        let config = MonitorConfig::default();
        HardwareAdapter::new(
            SensorHub::new(&config),
            StatusLed::new(),
            LedMatrix::new(NullWriter),
            Buzzer::new(NullPin, NoDelay, BuzzerPattern::from_config(&config)),
            None,
        )
    }

    #[test]
    fn alert_port_drives_outputs() {
        let mut hw = adapter();
        hw.show_matrix(MatrixCommand::Digit(4));
        hw.set_rgb(COLOUR_DANGER);
        hw.sound_burst();
        assert_eq!(hw.matrix().last_command(), Some(MatrixCommand::Digit(4)));
        assert_eq!(hw.led().current_colour(), COLOUR_DANGER);
        assert_eq!(hw.buzzer().burst_count(), 1);
    }

    #[test]
    fn reset_darkens_outputs() {
        let mut hw = adapter();
        hw.set_rgb(COLOUR_DANGER);
        hw.request_reset();
        assert_eq!(hw.led().current_colour(), (0, 0, 0));
        assert_eq!(hw.matrix().last_command(), Some(MatrixCommand::Clear));
    }

    #[test]
    fn draws_without_panel() {
        let mut hw = adapter();
        hw.draw(&crate::display::compose_frame(0, 0, crate::status::BorderStyle::Thin));
    }

    #[test]
    fn display_over_i2c() {
        let mut display = OledDisplay::new(NullI2c).unwrap();
        let frame = crate::display::compose_frame(100, 100, crate::status::BorderStyle::Thick);
        assert!(display.show(&frame).is_ok());
        assert!(display.show(&frame).is_ok());
    }
}
