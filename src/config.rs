//! Simulator window and host configuration.

use std::env;
use std::path::PathBuf;

/// Pebble Time display width.
pub const SCREEN_WIDTH: u32 = 144;

/// Pebble Time display height.
pub const SCREEN_HEIGHT: u32 = 168;

/// Window pixel scale.
pub const WINDOW_SCALE: u32 = 3;

pub const WINDOW_TITLE: &str = "Golden Steps";

/// Thickness of the border drawn while the haptic pulse is active.
pub const HAPTIC_BORDER_WIDTH: u32 = 3;

/// Environment variable holding the log filter, `env_logger` syntax.
pub const LOG_ENV: &str = "WATCHFACE_LOG";

/// Environment variable overriding the persistent store location.
pub const STORE_ENV: &str = "WATCHFACE_STORE";

/// Default store file name, placed in the system temp directory.
const STORE_FILE_NAME: &str = "golden-steps-watchface.bin";

// =============================================================================
// Health Simulation
// =============================================================================

/// Steps added by the "significant update" key.
pub const SIGNIFICANT_STEP_INCREMENT: i32 = 1000;

/// Steps added by the "movement update" key.
pub const MOVEMENT_STEP_INCREMENT: i32 = 100;

/// Averages cycled through by the average key. Index 0 is "no history".
pub const AVERAGE_PRESETS: [i32; 5] = [0, 800, 4000, 8000, 12000];

/// Preset selected at startup.
pub const DEFAULT_AVERAGE_PRESET: usize = 2;

/// Location of the persistent store file.
pub fn store_path() -> PathBuf {
    env::var_os(STORE_ENV).map_or_else(|| env::temp_dir().join(STORE_FILE_NAME), PathBuf::from)
}
