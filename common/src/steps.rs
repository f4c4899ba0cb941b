//! Daily step count classification.
//!
//! Compares today's cumulative steps with the host's weekday/weekend scoped
//! average and decides:
//!
//! - the steps label ("12K", or "?" when the count cannot be read)
//! - the label color (base, above-average accent, below-average accent)
//! - the new persisted [`StepsComparisonState`] and the side effects of
//!   switching to it (persist, and vibrate on entering `BelowAverage`)
//!
//! [`classify`] is pure. Side effects are returned as data and performed by
//! [`apply_side_effects`], so the decision logic is testable without a host.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{CYAN, RED, YELLOW};
use crate::config::{
    DIFFERENCE_THRESHOLD,
    LABEL_LEN,
    MIN_STEPS_TO_COLORIZE,
    STEPS_PER_UNIT,
    STEPS_PLACEHOLDER,
    STEPS_STATE_KEY,
};
use crate::platform::{
    Clock,
    Haptics,
    HealthMetric,
    HealthService,
    KeyValueStore,
    PlatformError,
    TimeScope,
};

// =============================================================================
// Comparison State
// =============================================================================

/// How today's step count compares with the historical average.
///
/// Stored as an integer under [`STEPS_STATE_KEY`] so a restart does not
/// re-trigger the below-average alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum StepsComparisonState {
    #[default]
    Normal = 0,
    BelowAverage = 1,
    AboveAverage = 2,
}

impl StepsComparisonState {
    /// Decode a stored value. Missing or unknown values read as `Normal`.
    pub const fn from_persisted(raw: Option<i32>) -> Self {
        match raw {
            Some(1) => Self::BelowAverage,
            Some(2) => Self::AboveAverage,
            _ => Self::Normal,
        }
    }

    /// Integer written to the store.
    #[inline]
    pub const fn as_persisted(self) -> i32 { self as i32 }

    /// Read the last persisted state.
    pub fn load<S: KeyValueStore>(store: &S) -> Self { Self::from_persisted(store.read_i32(STEPS_STATE_KEY)) }
}

// =============================================================================
// Inputs
// =============================================================================

/// Colors used for the steps label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepsPalette {
    /// Normal, unavailable, or not enough activity to compare.
    pub base: Rgb565,
    pub above: Rgb565,
    pub below: Rgb565,
}

impl Default for StepsPalette {
    fn default() -> Self {
        Self {
            base: CYAN,
            above: YELLOW,
            below: RED,
        }
    }
}

/// Step values read from the health service, `None` when inaccessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepsSample {
    pub today: Option<u32>,
    pub average: Option<u32>,
}

impl StepsSample {
    /// Read today's total and the scoped average for `[start of today, now]`.
    ///
    /// Each value is only fetched when the host reports it accessible;
    /// negative host values are treated as unavailable.
    pub fn query<H, C>(
        health: &H,
        clock: &C,
    ) -> Self
    where
        H: HealthService,
        C: Clock,
    {
        let start = clock.start_of_today();
        let end = clock.now();
        let metric = HealthMetric::StepCount;
        let scope = TimeScope::DailyWeekdayOrWeekend;

        let average = if health
            .metric_averaged_accessible(metric, start, end, scope)
            .is_available()
        {
            u32::try_from(health.sum_averaged(metric, start, end, scope)).ok()
        } else {
            None
        };

        let today = if health.metric_accessible(metric, start, end).is_available() {
            u32::try_from(health.sum_today(metric)).ok()
        } else {
            None
        };

        Self { today, average }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Side effects of a classification, performed by [`apply_side_effects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideEffects {
    /// New state to write, only set when it differs from the persisted one.
    pub persist: Option<StepsComparisonState>,
    /// Fire one long vibration pulse.
    pub alert: bool,
}

impl SideEffects {
    pub const NONE: Self = Self {
        persist: None,
        alert: false,
    };

    #[inline]
    pub const fn is_empty(&self) -> bool { self.persist.is_none() && !self.alert }
}

/// Result of classifying one steps sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Label text, "<N>K" or "?".
    pub text: String<LABEL_LEN>,
    pub color: Rgb565,
    /// Newly computed state, `None` when the comparison did not run.
    pub state: Option<StepsComparisonState>,
    pub effects: SideEffects,
}

/// Compare today's steps with the average.
///
/// Returns `None` when the comparison is suppressed: a zero average, or a
/// day where neither value reaches [`MIN_STEPS_TO_COLORIZE`] (today counts
/// from the threshold inclusive, the average only strictly above it).
pub fn compare(
    today: u32,
    average: u32,
) -> Option<StepsComparisonState> {
    if average == 0 || (today < MIN_STEPS_TO_COLORIZE && average <= MIN_STEPS_TO_COLORIZE) {
        return None;
    }

    let difference = (i64::from(today) - i64::from(average)) as f32 / average as f32;
    let state = if difference > DIFFERENCE_THRESHOLD {
        StepsComparisonState::AboveAverage
    } else if difference < -DIFFERENCE_THRESHOLD {
        StepsComparisonState::BelowAverage
    } else {
        StepsComparisonState::Normal
    };
    Some(state)
}

/// Side effects of moving from `persisted` to `next`.
///
/// Only a change is persisted, and only a change into `BelowAverage` alerts.
pub const fn transition(
    persisted: StepsComparisonState,
    next: StepsComparisonState,
) -> SideEffects {
    if persisted as i32 == next as i32 {
        return SideEffects::NONE;
    }
    SideEffects {
        persist: Some(next),
        alert: matches!(next, StepsComparisonState::BelowAverage),
    }
}

/// Decide label text, color, state and side effects for a steps sample.
pub fn classify(
    today: Option<u32>,
    average: Option<u32>,
    persisted: StepsComparisonState,
    palette: &StepsPalette,
) -> Classification {
    let mut text: String<LABEL_LEN> = String::new();
    match today {
        Some(steps) => {
            write!(text, "{}K", steps / STEPS_PER_UNIT).ok();
        }
        None => {
            text.push_str(STEPS_PLACEHOLDER).ok();
        }
    }

    let state = match (today, average) {
        (Some(steps), Some(avg)) => compare(steps, avg),
        _ => None,
    };

    let color = match state {
        Some(StepsComparisonState::AboveAverage) => palette.above,
        Some(StepsComparisonState::BelowAverage) => palette.below,
        Some(StepsComparisonState::Normal) | None => palette.base,
    };

    let effects = match state {
        Some(next) => transition(persisted, next),
        None => SideEffects::NONE,
    };

    Classification {
        text,
        color,
        state,
        effects,
    }
}

/// Persist the new state and fire the alert.
///
/// The pulse fires even when the write fails; the write error is returned
/// for the caller to log.
pub fn apply_side_effects<S, V>(
    effects: SideEffects,
    store: &mut S,
    haptics: &mut V,
) -> Result<(), PlatformError>
where
    S: KeyValueStore,
    V: Haptics,
{
    let written = match effects.persist {
        Some(state) => store.write_i32(STEPS_STATE_KEY, state.as_persisted()),
        None => Ok(()),
    };
    if effects.alert {
        haptics.long_pulse();
    }
    written
}

// =============================================================================
// Unit Tests
// =============================================================================
