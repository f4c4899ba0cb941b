//! Golden-ratio layout of the time, date and steps labels.
//!
//! The time block is the anchor: it is placed at the golden point of the
//! container, the date hangs directly above it and the steps label is centered
//! in whatever space is left below. Every rectangle spans the full container
//! width; labels center their text horizontally themselves.
//!
//! Measured sizes change with content ("9K" vs "12K" vs "?"), so the layout
//! is recomputed after every text update.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use micromath::F32Ext;

use crate::config::{DATE_TIME_PADDING, GOLDEN, STEPS_HEIGHT_COMPENSATION, TIME_HEIGHT_COMPENSATION};

/// Frames for the three labels, derived from the container and text metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutRects {
    pub time: Rectangle,
    pub date: Rectangle,
    pub steps: Rectangle,
}

impl LayoutRects {
    /// All-zero frames, used before the first layout pass.
    pub const fn zero() -> Self {
        Self {
            time: Rectangle::zero(),
            date: Rectangle::zero(),
            steps: Rectangle::zero(),
        }
    }
}

impl Default for LayoutRects {
    fn default() -> Self { Self::zero() }
}

/// Compute the label frames for `container` given each label's natural size.
///
/// Widths of the measured sizes are ignored: all frames take the container
/// width. Pure function of its inputs.
pub fn compute_layout(
    container: Rectangle,
    time_size: Size,
    date_size: Size,
    steps_size: Size,
) -> LayoutRects {
    let x = container.top_left.x;
    let top = container.top_left.y;
    let width = container.size.width;
    let container_height = container.size.height as i32;

    let time_height = time_size.height as i32 + TIME_HEIGHT_COMPENSATION;
    let free = (container_height - time_height) as f32;
    let time_y = top + F32Ext::round((1.0 - GOLDEN) * free) as i32;
    let time = frame(x, time_y, width, time_height);

    let date_height = date_size.height as i32;
    let date = frame(x, time_y - date_height - DATE_TIME_PADDING, width, date_height);

    // Center between the visible bottom of the time glyphs and the container bottom
    let steps_height = steps_size.height as i32 + STEPS_HEIGHT_COMPENSATION;
    let time_bottom = time_y + time_height - TIME_HEIGHT_COMPENSATION;
    let bottom = top + container_height;
    let steps = frame(
        x,
        time_bottom + (bottom - time_bottom - steps_height) / 2,
        width,
        steps_height,
    );

    LayoutRects { time, date, steps }
}

fn frame(
    x: i32,
    y: i32,
    width: u32,
    height: i32,
) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height.max(0) as u32))
}

// =============================================================================
// Unit Tests
// =============================================================================
