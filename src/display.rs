//! Bitmap display frame composition.
//!
//! The display driver receives a complete [`Frame`] every loop iteration
//! and redraws from scratch.  A frame is a filled square marker placed by
//! the two joystick axes inside a border whose thickness follows the mode
//! button.
//!
//! ```text
//!   x = raw_y * (W - 24) / 4095 + 8        clamped to [8, W - 16]
//!   y = H - 16 - raw_x * (H - 24) / 4095   clamped to [8, H - 16]
//! ```
//!
//! Raising the X axis (which is also the temperature channel) moves the
//! marker up the screen.

use crate::status::BorderStyle;

pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;
pub const MARKER_SIZE: u8 = 8;

const AXIS_FULL_SCALE: i32 = 4095;
const EDGE_MARGIN: i32 = 8;

/// One full-screen redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Top-left corner of the marker.
    pub marker_x: i32,
    pub marker_y: i32,
    pub marker_size: u8,
    pub border: BorderStyle,
}

impl Frame {
    /// Border rectangles to stroke, outermost first, as `(x, y, w, h)`.
    pub fn border_rects(&self) -> impl Iterator<Item = (i32, i32, i32, i32)> {
        let rings = self.border as i32;
        (0..rings).map(|i| (i, i, DISPLAY_WIDTH - 2 * i, DISPLAY_HEIGHT - 2 * i))
    }
}

/// Build the frame for the given raw axis readings.
pub fn compose_frame(raw_x: u16, raw_y: u16, border: BorderStyle) -> Frame {
    let raw_x = i32::from(raw_x);
    let raw_y = i32::from(raw_y);

    let x = raw_y * (DISPLAY_WIDTH - 24) / AXIS_FULL_SCALE + EDGE_MARGIN;
    let y = DISPLAY_HEIGHT - 16 - raw_x * (DISPLAY_HEIGHT - 24) / AXIS_FULL_SCALE;

    Frame {
        marker_x: x.clamp(EDGE_MARGIN, DISPLAY_WIDTH - 16),
        marker_y: y.clamp(EDGE_MARGIN, DISPLAY_HEIGHT - 16),
        marker_size: MARKER_SIZE,
        border,
    }
}
