//! Vibration motor stand-in: logs the pulse and lights a screen border.

use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use watchface_common::colors::HAPTIC_FLASH;
use watchface_common::platform::Haptics;

use crate::config::HAPTIC_BORDER_WIDTH;
use crate::timing::HAPTIC_FLASH_DURATION;

#[derive(Debug, Default)]
pub struct SimHaptics {
    pulses: u32,
    started: Option<Instant>,
}

impl SimHaptics {
    pub const fn new() -> Self {
        Self {
            pulses: 0,
            started: None,
        }
    }

    pub const fn pulses(&self) -> u32 { self.pulses }

    /// Whether the last pulse is still running at `now`.
    pub fn is_active(
        &self,
        now: Instant,
    ) -> bool {
        self.started
            .is_some_and(|start| now.saturating_duration_since(start) < HAPTIC_FLASH_DURATION)
    }

    /// Draw the pulse border inside `area` while the pulse runs.
    pub fn draw<D>(
        &self,
        target: &mut D,
        area: Rectangle,
        now: Instant,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.is_active(now) {
            return Ok(());
        }
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(HAPTIC_FLASH)
            .stroke_width(HAPTIC_BORDER_WIDTH)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        area.into_styled(style).draw(target)
    }
}

impl Haptics for SimHaptics {
    fn long_pulse(&mut self) {
        self.pulses += 1;
        self.started = Some(Instant::now());
        log::info!("bzzzzz (long pulse #{})", self.pulses);
    }
}
