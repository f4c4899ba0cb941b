//! Centralized watchface configuration.
//!
//! All values are compile-time constants. Groups that depend on each other
//! carry `const` assertions so an inconsistent edit fails the build instead
//! of producing a broken layout or a classifier that never fires.

// =============================================================================
// Layout
// =============================================================================

/// Golden ratio split used to place the time block.
/// The time block sits `(1 - GOLDEN) * free_height` below the container top.
pub const GOLDEN: f32 = 0.618;

/// Extra height added to the measured time block.
/// The 42px numeric font reports glyph bounds without its ascent padding.
pub const TIME_HEIGHT_COMPENSATION: i32 = 13;

/// Extra height added to the measured steps block (30px font ascent padding).
pub const STEPS_HEIGHT_COMPENSATION: i32 = 9;

/// Vertical gap between the bottom of the date block and the top of the time block.
pub const DATE_TIME_PADDING: i32 = 0;

const _: () = assert!(GOLDEN > 0.5 && GOLDEN < 1.0);
const _: () = assert!(TIME_HEIGHT_COMPENSATION >= 0);
const _: () = assert!(STEPS_HEIGHT_COMPENSATION >= 0);

// =============================================================================
// Steps Classification
// =============================================================================

/// Relative deviation from the average that switches the steps color.
/// `> +10%` is above average, `< -10%` is below.
pub const DIFFERENCE_THRESHOLD: f32 = 0.1;

/// Minimum magnitude before the classifier runs at all.
/// Low activity days would otherwise swing wildly on a few hundred steps.
pub const MIN_STEPS_TO_COLORIZE: u32 = 1000;

/// Divisor for the "<N>K" steps label.
pub const STEPS_PER_UNIT: u32 = 1000;

const _: () = assert!(DIFFERENCE_THRESHOLD > 0.0 && DIFFERENCE_THRESHOLD < 1.0);
const _: () = assert!(MIN_STEPS_TO_COLORIZE > 0);

// =============================================================================
// Persistence
// =============================================================================

/// Key of the persisted `StepsComparisonState` integer.
pub const STEPS_STATE_KEY: u32 = 0x0001;

// =============================================================================
// Text
// =============================================================================

/// Maximum visible characters per label (16 byte buffers including the terminator).
pub const LABEL_LEN: usize = 15;

/// Placeholder shown when the step count cannot be read.
pub const STEPS_PLACEHOLDER: &str = "?";

const _: () = assert!(LABEL_LEN >= "HH:MM".len());
const _: () = assert!(LABEL_LEN >= "DD MON".len());

// =============================================================================
// Unit Tests
// =============================================================================
