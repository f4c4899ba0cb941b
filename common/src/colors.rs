//! Color constants for the watchface.
//!
//! Colors are `Rgb565` values built from the `RgbColor` trait constants where
//! possible so they map 1:1 onto 16-bit panels without conversion.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Window background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Time label text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Base color for the date and steps labels.
pub const CYAN: Rgb565 = Rgb565::CYAN;

/// Steps label when today is more than 10% above the average.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Steps label when today is more than 10% below the average.
pub const RED: Rgb565 = Rgb565::RED;

// =============================================================================
// Simulator Chrome
// =============================================================================

/// Border flashed by hosts without a vibration motor.
/// RGB565: (31, 32, 0), a dark orange that stands out from the label colors.
pub const HAPTIC_FLASH: Rgb565 = Rgb565::new(31, 32, 0);
