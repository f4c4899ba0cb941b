//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Target frame time (~20 FPS). The watchface only changes on events, so the
/// loop mostly sleeps.
pub const FRAME_TIME: Duration = Duration::from_millis(50);

/// How long the border stays lit after a long vibration pulse.
pub const HAPTIC_FLASH_DURATION: Duration = Duration::from_millis(500);
