//! SSD1306 OLED display driver.
//!
//! [`draw_frame`] paints a composed [`Frame`] onto any monochrome
//! `embedded-graphics` target; [`OledDisplay`] wraps the buffered SSD1306
//! driver and flushes after each redraw.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use log::{info, warn};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::display::Frame;
use crate::error::PeripheralError;

/// Clear `target` and draw the border rings and the marker.
pub fn draw_frame<T>(target: &mut T, frame: &Frame) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    for (x, y, w, h) in frame.border_rects() {
        Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(stroke)
            .draw(target)?;
    }

    let side = u32::from(frame.marker_size);
    Rectangle::new(Point::new(frame.marker_x, frame.marker_y), Size::new(side, side))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)
}

type Buffered<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledDisplay<I2C> {
    inner: Buffered<I2C>,
    last: Option<Frame>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and blank it.
    pub fn new(i2c: I2C) -> Result<Self, PeripheralError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut inner = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        inner.init().map_err(|_| PeripheralError::DisplayWriteFailed)?;
        inner.clear_buffer();
        inner.flush().map_err(|_| PeripheralError::DisplayWriteFailed)?;
        info!("display: SSD1306 128x64 ready");
        Ok(Self { inner, last: None })
    }

    /// Redraw and flush. An unchanged frame skips the I2C transfer.
    pub fn show(&mut self, frame: &Frame) -> Result<(), PeripheralError> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        self.last = None;
        if draw_frame(&mut self.inner, frame).is_err() || self.inner.flush().is_err() {
            warn!("display: frame transfer failed");
            return Err(PeripheralError::DisplayWriteFailed);
        }
        self.last = Some(*frame);
        Ok(())
    }
}
