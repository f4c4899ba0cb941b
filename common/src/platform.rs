//! Host service abstractions.
//!
//! The watchface never talks to a display, sensor or flash directly. Every
//! collaborator is a trait implemented by the host: real firmware, the desktop
//! simulator, or the recording mocks used in tests.
//!
//! ```text
//! Watchface (app)      layout / steps / text
//!        ↓
//! Platform traits (this module)
//!        ↓
//! Host: window manager, health service, RTC, flash, vibration motor
//! ```

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use thiserror_no_std::Error;
use time::PrimitiveDateTime;

/// Seconds since the Unix epoch, as reported by the host clock.
pub type Timestamp = i64;

/// Raw health value. Hosts report failures as negative values.
pub type HealthValue = i32;

// =============================================================================
// Errors
// =============================================================================

/// Failures reported by host services.
///
/// None of these are fatal: the watchface logs them and keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// The host refused the health event subscription.
    #[error("health event subscription rejected")]
    SubscriptionRejected,
    /// A persistent write did not reach storage.
    #[error("persistent write failed for key {key:#06x}")]
    StoreWrite { key: u32 },
}

// =============================================================================
// Windowing / Text Layers
// =============================================================================

/// Window and text layer service.
///
/// Layers are addressed by an opaque copyable handle. Frames are absolute
/// within the window's root layer.
pub trait TextLayers {
    /// Layer handle.
    type Layer: Copy;
    /// Font handle accepted by [`TextLayers::set_font`].
    type Font: Copy;

    /// Bounds of the window's root layer.
    fn bounds(&self) -> Rectangle;

    /// Fill color of the window behind all layers.
    fn set_window_background(
        &mut self,
        color: Rgb565,
    );

    /// Create a text layer with an initial frame.
    fn create(
        &mut self,
        frame: Rectangle,
    ) -> Self::Layer;

    /// Remove a layer from the window and release it.
    fn destroy(
        &mut self,
        layer: Self::Layer,
    );

    /// Layer fill color, `None` for a transparent background.
    fn set_background_color(
        &mut self,
        layer: Self::Layer,
        color: Option<Rgb565>,
    );

    fn set_text_color(
        &mut self,
        layer: Self::Layer,
        color: Rgb565,
    );

    fn set_alignment(
        &mut self,
        layer: Self::Layer,
        alignment: Alignment,
    );

    fn set_font(
        &mut self,
        layer: Self::Layer,
        font: Self::Font,
    );

    fn set_frame(
        &mut self,
        layer: Self::Layer,
        frame: Rectangle,
    );

    /// Replace the layer's text. Hosts copy the string.
    fn set_text(
        &mut self,
        layer: Self::Layer,
        text: &str,
    );

    /// Natural size of the layer's current text in its current font.
    fn content_size(
        &self,
        layer: Self::Layer,
    ) -> Size;
}

// =============================================================================
// Fonts
// =============================================================================

/// Identifier of a font bundled with the watchface resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u32);

/// Key of a font built into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontKey(pub &'static str);

/// Font and resource loader.
pub trait FontLoader {
    type Font: Copy;

    /// Load a bundled font. Hosts fall back to a system font if the resource is missing.
    fn load_custom(
        &mut self,
        resource: ResourceId,
    ) -> Self::Font;

    fn system_font(
        &self,
        key: FontKey,
    ) -> Self::Font;

    /// Release a font obtained from [`FontLoader::load_custom`].
    fn unload_custom(
        &mut self,
        font: Self::Font,
    );
}

// =============================================================================
// Health
// =============================================================================

/// Health metrics the watchface reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthMetric {
    StepCount,
}

/// Which historical days an averaged metric is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeScope {
    /// Weekdays averaged with weekdays, weekend days with weekend days.
    DailyWeekdayOrWeekend,
}

/// Host-reported availability of a health metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessibilityMask(pub u8);

impl AccessibilityMask {
    /// The metric can be read for the requested range.
    pub const AVAILABLE: Self = Self(1 << 0);
    /// The user denied health permission.
    pub const NO_PERMISSION: Self = Self(1 << 1);
    /// The host does not track this metric at all.
    pub const NOT_SUPPORTED: Self = Self(1 << 2);
    /// No data recorded for the requested range.
    pub const NOT_AVAILABLE: Self = Self(1 << 3);

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_available(self) -> bool { self.contains(Self::AVAILABLE) }
}

impl core::ops::BitOr for AccessibilityMask {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Health service notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthEvent {
    /// Large batch of new data, e.g. after a sync or at midnight.
    SignificantUpdate,
    /// Step or activity data changed.
    MovementUpdate,
    SleepUpdate,
    MetricAlert,
    HeartRateUpdate,
}

/// Health data service.
pub trait HealthService {
    /// Whether `metric` can be summed over `[start, end]`.
    fn metric_accessible(
        &self,
        metric: HealthMetric,
        start: Timestamp,
        end: Timestamp,
    ) -> AccessibilityMask;

    /// Whether the historical average of `metric` over `[start, end]` can be read.
    fn metric_averaged_accessible(
        &self,
        metric: HealthMetric,
        start: Timestamp,
        end: Timestamp,
        scope: TimeScope,
    ) -> AccessibilityMask;

    /// Cumulative value of `metric` since midnight.
    fn sum_today(
        &self,
        metric: HealthMetric,
    ) -> HealthValue;

    /// Historical average of `metric` over the same time-of-day range.
    fn sum_averaged(
        &self,
        metric: HealthMetric,
        start: Timestamp,
        end: Timestamp,
        scope: TimeScope,
    ) -> HealthValue;

    /// Start delivering [`HealthEvent`]s to the host event loop.
    fn subscribe(&mut self) -> Result<(), PlatformError>;

    fn unsubscribe(&mut self);
}

// =============================================================================
// Time
// =============================================================================

/// Wall clock and minute tick source.
pub trait Clock {
    /// Local wall-clock time.
    fn local_now(&self) -> PrimitiveDateTime;

    /// Current time as a Unix timestamp.
    fn now(&self) -> Timestamp;

    /// Timestamp of local midnight of the current day.
    fn start_of_today(&self) -> Timestamp;

    /// Start delivering one tick per wall-clock minute.
    fn subscribe_minute_tick(&mut self);

    fn unsubscribe_tick(&mut self);
}

// =============================================================================
// Persistence & Haptics
// =============================================================================

/// Durable integer storage that survives restarts.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn read_i32(
        &self,
        key: u32,
    ) -> Option<i32>;

    fn write_i32(
        &mut self,
        key: u32,
        value: i32,
    ) -> Result<(), PlatformError>;
}

/// Vibration motor.
pub trait Haptics {
    /// One long vibration pulse.
    fn long_pulse(&mut self);
}

// =============================================================================
// Service Bundle
// =============================================================================

/// Ties a concrete set of host services together.
pub trait Platform {
    type Layers: TextLayers<Font = <Self::Fonts as FontLoader>::Font>;
    type Fonts: FontLoader;
    type Health: HealthService;
    type Clock: Clock;
    type Store: KeyValueStore;
    type Haptics: Haptics;
}

/// Layer handle type of a platform.
pub type LayerOf<P> = <<P as Platform>::Layers as TextLayers>::Layer;

/// Font handle type of a platform.
pub type FontOf<P> = <<P as Platform>::Fonts as FontLoader>::Font;

/// Owned host services handed to every watchface handler.
pub struct Services<P: Platform> {
    pub layers: P::Layers,
    pub fonts: P::Fonts,
    pub health: P::Health,
    pub clock: P::Clock,
    pub store: P::Store,
    pub haptics: P::Haptics,
}

// =============================================================================
// Unit Tests
// =============================================================================
