//! 5×5 addressable indicator matrix.
//!
//! Each [`MatrixCommand`] is rendered into a 25-pixel frame, row-major from
//! the top-left LED, and handed to a [`MatrixWriter`]. The device writer
//! encodes the frame as WS2812 pulses on an RMT channel; tests plug in a
//! recording writer.
//!
//! | Command    | Pattern                          |
//! |------------|----------------------------------|
//! | `Digit(n)` | numeral glyph in red             |
//! | `Safe`     | all green                        |
//! | `Caution`  | all amber                        |
//! | `Danger`   | all red                          |
//! | `Clear`    | all off                          |

use log::warn;

use crate::alert::{MatrixCommand, Rgb, COLOUR_CAUTION, COLOUR_DANGER, COLOUR_OFF, COLOUR_SAFE};
use crate::error::PeripheralError;

pub const MATRIX_SIDE: usize = 5;
pub const MATRIX_PIXELS: usize = MATRIX_SIDE * MATRIX_SIDE;

/// Full-brightness WS2812s are blinding at arm's length.
const MATRIX_BRIGHTNESS: u8 = 32;

pub type MatrixFrame = [Rgb; MATRIX_PIXELS];

/// Sink for rendered frames.
pub trait MatrixWriter {
    fn write(&mut self, frame: &MatrixFrame) -> Result<(), PeripheralError>;
}

// One row per byte, bit 4 = leftmost column.
const GLYPHS: [[u8; MATRIX_SIDE]; 10] = [
    [0b01110, 0b10001, 0b10001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b01110], // 1
    [0b11110, 0b00001, 0b01110, 0b10000, 0b11111], // 2
    [0b11110, 0b00001, 0b00110, 0b00001, 0b11110], // 3
    [0b10010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b11110], // 5
    [0b01110, 0b10000, 0b11110, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b00100], // 7
    [0b01110, 0b10001, 0b01110, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b01111, 0b00001, 0b01110], // 9
];

fn dim((r, g, b): Rgb) -> Rgb {
    let scale = |c: u8| ((u16::from(c) * u16::from(MATRIX_BRIGHTNESS)) / 255) as u8;
    (scale(r), scale(g), scale(b))
}

/// Render a command into a frame at display brightness.
pub fn render(command: MatrixCommand) -> MatrixFrame {
    let fill = |colour: Rgb| [dim(colour); MATRIX_PIXELS];
    match command {
        MatrixCommand::Digit(d) => {
            let glyph = &GLYPHS[usize::from(d.min(9))];
            let on = dim(COLOUR_DANGER);
            let mut frame = [COLOUR_OFF; MATRIX_PIXELS];
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..MATRIX_SIDE {
                    if bits & (0b10000 >> col) != 0 {
                        frame[row * MATRIX_SIDE + col] = on;
                    }
                }
            }
            frame
        }
        MatrixCommand::Safe => fill(COLOUR_SAFE),
        MatrixCommand::Caution => fill(COLOUR_CAUTION),
        MatrixCommand::Danger => fill(COLOUR_DANGER),
        MatrixCommand::Clear => fill(COLOUR_OFF),
    }
}

pub struct LedMatrix<W> {
    writer: W,
    last: Option<MatrixCommand>,
}

impl<W: MatrixWriter> LedMatrix<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last: None }
    }

    /// Show a command. Repeating the current command skips the transfer.
    pub fn show(&mut self, command: MatrixCommand) -> Result<(), PeripheralError> {
        if self.last == Some(command) {
            return Ok(());
        }
        match self.writer.write(&render(command)) {
            Ok(()) => {
                self.last = Some(command);
                Ok(())
            }
            Err(e) => {
                // Force a rewrite next time.
                self.last = None;
                warn!("led_matrix: {:?} not shown: {}", command, e);
                Err(e)
            }
        }
    }

    pub fn last_command(&self) -> Option<MatrixCommand> {
        self.last
    }
}

// ── WS2812 over RMT (device) ─────────────────────────────────

#[cfg(target_os = "espidf")]
pub use ws2812::RmtWs2812;

#[cfg(target_os = "espidf")]
mod ws2812 {
    use core::time::Duration;

    use esp_idf_svc::hal::gpio::OutputPin;
    use esp_idf_svc::hal::peripheral::Peripheral;
    use esp_idf_svc::hal::rmt::config::TransmitConfig;
    use esp_idf_svc::hal::rmt::{PinState, Pulse, RmtChannel, TxRmtDriver, VariableLengthSignal};
    use esp_idf_sys::EspError;

    use super::{MatrixFrame, MatrixWriter};
    use crate::error::PeripheralError;

    /// WS2812 chain driven by one RMT TX channel, GRB byte order.
    pub struct RmtWs2812<'d> {
        tx: TxRmtDriver<'d>,
        bit0: (Pulse, Pulse),
        bit1: (Pulse, Pulse),
    }

    impl<'d> RmtWs2812<'d> {
        pub fn new<C: RmtChannel>(
            channel: impl Peripheral<P = C> + 'd,
            pin: impl Peripheral<P = impl OutputPin> + 'd,
        ) -> Result<Self, EspError> {
            let config = TransmitConfig::new().clock_divider(1);
            let tx = TxRmtDriver::new(channel, pin, &config)?;
            let hz = tx.counter_clock()?;
            let pulse = |state, ns| Pulse::new_with_duration(hz, state, &Duration::from_nanos(ns));
            Ok(Self {
                bit0: (pulse(PinState::High, 350)?, pulse(PinState::Low, 800)?),
                bit1: (pulse(PinState::High, 700)?, pulse(PinState::Low, 600)?),
                tx,
            })
        }
    }

    impl MatrixWriter for RmtWs2812<'_> {
        fn write(&mut self, frame: &MatrixFrame) -> Result<(), PeripheralError> {
            let mut signal = VariableLengthSignal::new();
            for &(r, g, b) in frame {
                let grb = (u32::from(g) << 16) | (u32::from(r) << 8) | u32::from(b);
                for bit in (0..24).rev() {
                    let (high, low) = if grb & (1 << bit) != 0 { &self.bit1 } else { &self.bit0 };
                    signal
                        .push([high, low])
                        .map_err(|_| PeripheralError::MatrixWriteFailed)?;
                }
            }
            self.tx
                .start_blocking(&signal)
                .map_err(|_| PeripheralError::MatrixWriteFailed)
        }
    }
}
