//! Recording mock implementations of the host traits for unit tests.

use core::cell::Cell;
use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::colors::BLACK;
use crate::platform::{
    AccessibilityMask,
    Clock,
    FontKey,
    FontLoader,
    HealthMetric,
    HealthService,
    HealthValue,
    Haptics,
    KeyValueStore,
    Platform,
    PlatformError,
    ResourceId,
    Services,
    TextLayers,
    TimeScope,
    Timestamp,
};
use crate::theme::{FONT_KEY_LECO_42_NUMBERS, RESOURCE_ID_LECO_20, RESOURCE_ID_LECO_30};

// =============================================================================
// Layers & Fonts
// =============================================================================

/// Monospace font metrics: every character is `char_width` x `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFont {
    pub char_width: u32,
    pub height: u32,
}

impl MockFont {
    pub const LECO_20: Self = Self {
        char_width: 10,
        height: 20,
    };
    pub const LECO_30: Self = Self {
        char_width: 15,
        height: 18,
    };
    pub const LECO_42: Self = Self {
        char_width: 20,
        height: 34,
    };
    pub const FALLBACK: Self = Self {
        char_width: 6,
        height: 10,
    };
}

#[derive(Debug, Clone)]
pub struct MockSlot {
    pub frame: Rectangle,
    pub text: String,
    pub color: Rgb565,
    pub background: Option<Rgb565>,
    pub alignment: Alignment,
    pub font: Option<MockFont>,
}

#[derive(Debug)]
pub struct MockLayers {
    pub bounds: Rectangle,
    pub window_background: Option<Rgb565>,
    slots: Vec<Option<MockSlot>>,
}

impl Default for MockLayers {
    fn default() -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(144, 168)),
            window_background: None,
            slots: Vec::new(),
        }
    }
}

impl MockLayers {
    pub fn slot(
        &self,
        layer: usize,
    ) -> &MockSlot {
        self.slots[layer].as_ref().expect("layer destroyed")
    }

    fn slot_mut(
        &mut self,
        layer: usize,
    ) -> &mut MockSlot {
        self.slots[layer].as_mut().expect("layer destroyed")
    }

    pub fn text(
        &self,
        layer: usize,
    ) -> &str {
        &self.slot(layer).text
    }

    pub fn live_layers(&self) -> usize { self.slots.iter().filter(|slot| slot.is_some()).count() }
}

impl TextLayers for MockLayers {
    type Layer = usize;
    type Font = MockFont;

    fn bounds(&self) -> Rectangle { self.bounds }

    fn set_window_background(
        &mut self,
        color: Rgb565,
    ) {
        self.window_background = Some(color);
    }

    fn create(
        &mut self,
        frame: Rectangle,
    ) -> usize {
        self.slots.push(Some(MockSlot {
            frame,
            text: String::new(),
            color: BLACK,
            background: Some(BLACK),
            alignment: Alignment::Left,
            font: None,
        }));
        self.slots.len() - 1
    }

    fn destroy(
        &mut self,
        layer: usize,
    ) {
        self.slots[layer] = None;
    }

    fn set_background_color(
        &mut self,
        layer: usize,
        color: Option<Rgb565>,
    ) {
        self.slot_mut(layer).background = color;
    }

    fn set_text_color(
        &mut self,
        layer: usize,
        color: Rgb565,
    ) {
        self.slot_mut(layer).color = color;
    }

    fn set_alignment(
        &mut self,
        layer: usize,
        alignment: Alignment,
    ) {
        self.slot_mut(layer).alignment = alignment;
    }

    fn set_font(
        &mut self,
        layer: usize,
        font: MockFont,
    ) {
        self.slot_mut(layer).font = Some(font);
    }

    fn set_frame(
        &mut self,
        layer: usize,
        frame: Rectangle,
    ) {
        self.slot_mut(layer).frame = frame;
    }

    fn set_text(
        &mut self,
        layer: usize,
        text: &str,
    ) {
        self.slot_mut(layer).text = String::from(text);
    }

    fn content_size(
        &self,
        layer: usize,
    ) -> Size {
        let slot = self.slot(layer);
        let font = slot.font.unwrap_or(MockFont::FALLBACK);
        if slot.text.is_empty() {
            return Size::zero();
        }
        Size::new(font.char_width * slot.text.chars().count() as u32, font.height)
    }
}

#[derive(Debug, Default)]
pub struct MockFonts {
    pub loaded: u32,
    pub unloaded: u32,
}

impl FontLoader for MockFonts {
    type Font = MockFont;

    fn load_custom(
        &mut self,
        resource: ResourceId,
    ) -> MockFont {
        self.loaded += 1;
        match resource {
            RESOURCE_ID_LECO_20 => MockFont::LECO_20,
            RESOURCE_ID_LECO_30 => MockFont::LECO_30,
            _ => MockFont::FALLBACK,
        }
    }

    fn system_font(
        &self,
        key: FontKey,
    ) -> MockFont {
        if key == FONT_KEY_LECO_42_NUMBERS {
            MockFont::LECO_42
        } else {
            MockFont::FALLBACK
        }
    }

    fn unload_custom(
        &mut self,
        _font: MockFont,
    ) {
        self.unloaded += 1;
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug)]
pub struct MockHealth {
    pub today: HealthValue,
    pub average: HealthValue,
    pub today_mask: AccessibilityMask,
    pub average_mask: AccessibilityMask,
    pub subscribed: bool,
    pub reject_subscription: bool,
    pub unsubscribe_calls: u32,
    pub sum_calls: Cell<u32>,
    pub last_range: Cell<Option<(Timestamp, Timestamp)>>,
    pub last_scope: Cell<Option<TimeScope>>,
}

impl MockHealth {
    pub fn with_steps(
        today: HealthValue,
        average: HealthValue,
    ) -> Self {
        Self {
            today,
            average,
            ..Self::default()
        }
    }
}

impl Default for MockHealth {
    fn default() -> Self {
        Self {
            today: 0,
            average: 0,
            today_mask: AccessibilityMask::AVAILABLE,
            average_mask: AccessibilityMask::AVAILABLE,
            subscribed: false,
            reject_subscription: false,
            unsubscribe_calls: 0,
            sum_calls: Cell::new(0),
            last_range: Cell::new(None),
            last_scope: Cell::new(None),
        }
    }
}

impl HealthService for MockHealth {
    fn metric_accessible(
        &self,
        _metric: HealthMetric,
        start: Timestamp,
        end: Timestamp,
    ) -> AccessibilityMask {
        self.last_range.set(Some((start, end)));
        self.today_mask
    }

    fn metric_averaged_accessible(
        &self,
        _metric: HealthMetric,
        start: Timestamp,
        end: Timestamp,
        scope: TimeScope,
    ) -> AccessibilityMask {
        self.last_range.set(Some((start, end)));
        self.last_scope.set(Some(scope));
        self.average_mask
    }

    fn sum_today(
        &self,
        _metric: HealthMetric,
    ) -> HealthValue {
        self.sum_calls.set(self.sum_calls.get() + 1);
        self.today
    }

    fn sum_averaged(
        &self,
        _metric: HealthMetric,
        _start: Timestamp,
        _end: Timestamp,
        _scope: TimeScope,
    ) -> HealthValue {
        self.sum_calls.set(self.sum_calls.get() + 1);
        self.average
    }

    fn subscribe(&mut self) -> Result<(), PlatformError> {
        if self.reject_subscription {
            return Err(PlatformError::SubscriptionRejected);
        }
        self.subscribed = true;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.unsubscribe_calls += 1;
    }
}

// =============================================================================
// Clock, Store, Haptics
// =============================================================================

#[derive(Debug)]
pub struct MockClock {
    pub local: PrimitiveDateTime,
    pub timestamp: Timestamp,
    pub midnight: Timestamp,
    pub tick_subscribed: bool,
}

impl MockClock {
    fn at(
        local: PrimitiveDateTime,
        tick_subscribed: bool,
    ) -> Self {
        let utc = local.assume_utc();
        Self {
            local,
            timestamp: utc.unix_timestamp(),
            midnight: utc.replace_time(Time::MIDNIGHT).unix_timestamp(),
            tick_subscribed,
        }
    }

    pub fn set_local(
        &mut self,
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
        minute: u8,
    ) {
        let local = PrimitiveDateTime::new(
            Date::from_calendar_date(year, month, day).expect("valid date"),
            Time::from_hms(hour, minute, 0).expect("valid time"),
        );
        *self = Self::at(local, self.tick_subscribed);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        let local = PrimitiveDateTime::new(
            Date::from_calendar_date(2024, Month::March, 5).expect("valid date"),
            Time::from_hms(7, 3, 0).expect("valid time"),
        );
        Self::at(local, false)
    }
}

impl Clock for MockClock {
    fn local_now(&self) -> PrimitiveDateTime { self.local }

    fn now(&self) -> Timestamp { self.timestamp }

    fn start_of_today(&self) -> Timestamp { self.midnight }

    fn subscribe_minute_tick(&mut self) { self.tick_subscribed = true; }

    fn unsubscribe_tick(&mut self) { self.tick_subscribed = false; }
}

#[derive(Debug, Default)]
pub struct MockStore {
    pub values: BTreeMap<u32, i32>,
    pub writes: u32,
    pub fail_writes: bool,
}

impl KeyValueStore for MockStore {
    fn read_i32(
        &self,
        key: u32,
    ) -> Option<i32> {
        self.values.get(&key).copied()
    }

    fn write_i32(
        &mut self,
        key: u32,
        value: i32,
    ) -> Result<(), PlatformError> {
        if self.fail_writes {
            return Err(PlatformError::StoreWrite { key });
        }
        self.values.insert(key, value);
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockHaptics {
    pub pulses: u32,
}

impl Haptics for MockHaptics {
    fn long_pulse(&mut self) { self.pulses += 1; }
}

// =============================================================================
// Platform
// =============================================================================

pub struct MockPlatform;

impl Platform for MockPlatform {
    type Layers = MockLayers;
    type Fonts = MockFonts;
    type Health = MockHealth;
    type Clock = MockClock;
    type Store = MockStore;
    type Haptics = MockHaptics;
}

pub fn mock_services() -> Services<MockPlatform> {
    Services {
        layers: MockLayers::default(),
        fonts: MockFonts::default(),
        health: MockHealth::default(),
        clock: MockClock::default(),
        store: MockStore::default(),
        haptics: MockHaptics::default(),
    }
}
