//! Watchface lifecycle and event handling.
//!
//! [`Watchface`] owns every handle the face needs (layers, fonts, current
//! text, layout, diagnostics). It is created by [`Watchface::load`] when the
//! host window appears and consumed by [`Watchface::unload`]; there is no
//! global state.
//!
//! The host event loop delivers [`Event`]s through [`Watchface::dispatch`],
//! which looks the handler up in a [`DispatchTable`]. Handlers run to
//! completion before the next event, so the read-then-write of the persisted
//! steps state needs no locking.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use heapless::String;
use log::Level;

use crate::diagnostics::{DIAGNOSTICS_LINE_LENGTH, DiagnosticsLog};
use crate::layout::{LayoutRects, compute_layout};
use crate::platform::{
    Clock,
    FontLoader,
    FontOf,
    HealthEvent,
    HealthService,
    LayerOf,
    Platform,
    Services,
    TextLayers,
};
use crate::steps::{StepsComparisonState, StepsSample, apply_side_effects, classify};
use crate::text::DisplayState;
use crate::theme::{FontSource, Theme};

// =============================================================================
// Events
// =============================================================================

/// Event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Wall-clock minute changed.
    Tick,
    /// Health service notification.
    Health(HealthEvent),
}

/// Key of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Tick = 0,
    Health = 1,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 2;
}

impl Event {
    #[inline]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Tick => EventKind::Tick,
            Self::Health(_) => EventKind::Health,
        }
    }
}

/// Event handler signature.
pub type Handler<P> = fn(&mut Watchface<P>, &mut Services<P>, Event);

/// Maps each [`EventKind`] to its handler.
pub struct DispatchTable<P: Platform> {
    handlers: [Handler<P>; EventKind::COUNT],
}

impl<P: Platform> DispatchTable<P> {
    /// Table with the default tick and health handlers.
    pub fn new() -> Self {
        Self {
            handlers: [on_tick::<P>, on_health::<P>],
        }
    }

    #[inline]
    pub fn handler(
        &self,
        kind: EventKind,
    ) -> Handler<P> {
        self.handlers[kind as usize]
    }

    /// Replace the handler for `kind`.
    pub fn set(
        &mut self,
        kind: EventKind,
        handler: Handler<P>,
    ) {
        self.handlers[kind as usize] = handler;
    }
}

impl<P: Platform> Default for DispatchTable<P> {
    fn default() -> Self { Self::new() }
}

/// Minute tick: time, date, steps and layout.
fn on_tick<P: Platform>(
    face: &mut Watchface<P>,
    services: &mut Services<P>,
    _event: Event,
) {
    face.refresh(services);
}

/// Step data changed: steps and layout only.
fn on_health<P: Platform>(
    face: &mut Watchface<P>,
    services: &mut Services<P>,
    event: Event,
) {
    match event {
        Event::Health(HealthEvent::SignificantUpdate) => {
            log::debug!("health: significant update");
            face.refresh_steps(services);
        }
        Event::Health(HealthEvent::MovementUpdate) => {
            log::debug!("health: movement update");
            face.refresh_steps(services);
        }
        _ => {}
    }
}

// =============================================================================
// Watchface Context
// =============================================================================

/// Layer handles of the three labels.
#[derive(Debug, Clone, Copy)]
pub struct Labels<L> {
    pub time: L,
    pub date: L,
    pub steps: L,
}

/// Fonts in use, with the source they came from so custom ones can be released.
struct LoadedFonts<F> {
    time: (F, FontSource),
    date: (F, FontSource),
    steps: (F, FontSource),
}

/// Owned state of a loaded watchface.
pub struct Watchface<P: Platform> {
    labels: Labels<LayerOf<P>>,
    fonts: LoadedFonts<FontOf<P>>,
    theme: Theme,
    display: DisplayState,
    layout: LayoutRects,
    steps_color: Rgb565,
    steps_state: Option<StepsComparisonState>,
    health_subscribed: bool,
    diagnostics: DiagnosticsLog,
    dispatch: DispatchTable<P>,
}

impl<P: Platform> Watchface<P> {
    /// Build the window contents, render once and subscribe to events.
    ///
    /// A rejected health subscription is logged; the face then updates on
    /// minute ticks only.
    pub fn load(
        services: &mut Services<P>,
        theme: Theme,
    ) -> Self {
        services.layers.set_window_background(theme.background);

        let fonts = LoadedFonts {
            time: (theme.time_font.resolve(&mut services.fonts), theme.time_font),
            date: (theme.date_font.resolve(&mut services.fonts), theme.date_font),
            steps: (theme.steps_font.resolve(&mut services.fonts), theme.steps_font),
        };

        let labels = Labels {
            time: create_label(&mut services.layers, fonts.time.0, theme.time_color),
            date: create_label(&mut services.layers, fonts.date.0, theme.date_color),
            steps: create_label(&mut services.layers, fonts.steps.0, theme.steps.base),
        };

        let mut face = Self {
            labels,
            fonts,
            theme,
            display: DisplayState::new(),
            layout: LayoutRects::zero(),
            steps_color: theme.steps.base,
            steps_state: None,
            health_subscribed: false,
            diagnostics: DiagnosticsLog::new(),
            dispatch: DispatchTable::new(),
        };

        face.refresh(services);

        services.clock.subscribe_minute_tick();
        match services.health.subscribe() {
            Ok(()) => face.health_subscribed = true,
            Err(err) => face.report(Level::Error, format_args!("Cannot subscribe to the health service: {err}")),
        }

        face.diagnostics.record(Level::Info, "Done initializing");
        face
    }

    /// Route `event` to its handler.
    pub fn dispatch(
        &mut self,
        services: &mut Services<P>,
        event: Event,
    ) {
        let handler = self.dispatch.handler(event.kind());
        handler(self, services, event);
    }

    /// Override the handler for one event kind.
    pub fn set_handler(
        &mut self,
        kind: EventKind,
        handler: Handler<P>,
    ) {
        self.dispatch.set(kind, handler);
    }

    /// Full refresh: time and date text, steps classification, layout.
    pub fn refresh(
        &mut self,
        services: &mut Services<P>,
    ) {
        let now = services.clock.local_now();
        self.display.set_clock(&now);
        services.layers.set_text(self.labels.time, &self.display.time);
        services.layers.set_text(self.labels.date, &self.display.date);

        self.update_steps(services);
        self.relayout(&mut services.layers);
    }

    /// Steps classification and layout, leaving time and date untouched.
    pub fn refresh_steps(
        &mut self,
        services: &mut Services<P>,
    ) {
        self.update_steps(services);
        self.relayout(&mut services.layers);
    }

    /// Unsubscribe from events and release layers and custom fonts.
    pub fn unload(
        self,
        services: &mut Services<P>,
    ) {
        if self.health_subscribed {
            services.health.unsubscribe();
        }
        services.clock.unsubscribe_tick();

        services.layers.destroy(self.labels.time);
        services.layers.destroy(self.labels.date);
        services.layers.destroy(self.labels.steps);

        for (font, source) in [self.fonts.time, self.fonts.date, self.fonts.steps] {
            if source.is_custom() {
                services.fonts.unload_custom(font);
            }
        }
        log::info!("watchface unloaded");
    }

    fn update_steps(
        &mut self,
        services: &mut Services<P>,
    ) {
        let sample = StepsSample::query(&services.health, &services.clock);
        let persisted = StepsComparisonState::load(&services.store);
        let result = classify(sample.today, sample.average, persisted, &self.theme.steps);

        if let Some(state) = result.effects.persist {
            log::info!("steps state {:?} -> {:?}", persisted, state);
        }
        if result.effects.alert {
            log::info!("steps fell below average");
        }
        if let Err(err) = apply_side_effects(result.effects, &mut services.store, &mut services.haptics) {
            self.report(Level::Warn, format_args!("{err}"));
        }

        self.display.steps = result.text;
        self.steps_color = result.color;
        if result.state.is_some() {
            self.steps_state = result.state;
        }

        services.layers.set_text(self.labels.steps, &self.display.steps);
        services.layers.set_text_color(self.labels.steps, self.steps_color);
    }

    fn relayout(
        &mut self,
        layers: &mut P::Layers,
    ) {
        self.layout = compute_layout(
            layers.bounds(),
            layers.content_size(self.labels.time),
            layers.content_size(self.labels.date),
            layers.content_size(self.labels.steps),
        );
        layers.set_frame(self.labels.time, self.layout.time);
        layers.set_frame(self.labels.date, self.layout.date);
        layers.set_frame(self.labels.steps, self.layout.steps);
    }

    fn report(
        &mut self,
        level: Level,
        args: core::fmt::Arguments<'_>,
    ) {
        let mut line: String<DIAGNOSTICS_LINE_LENGTH> = String::new();
        // Overflow only truncates the line
        line.write_fmt(args).ok();
        self.diagnostics.record(level, &line);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn display(&self) -> &DisplayState { &self.display }

    #[inline]
    pub const fn layout(&self) -> &LayoutRects { &self.layout }

    #[inline]
    pub const fn labels(&self) -> &Labels<LayerOf<P>> { &self.labels }

    /// Current steps label color.
    #[inline]
    pub const fn steps_color(&self) -> Rgb565 { self.steps_color }

    /// Last evaluated comparison state, `None` until a comparison has run.
    #[inline]
    pub const fn steps_state(&self) -> Option<StepsComparisonState> { self.steps_state }

    #[inline]
    pub const fn health_subscribed(&self) -> bool { self.health_subscribed }

    #[inline]
    pub const fn theme(&self) -> &Theme { &self.theme }

    #[inline]
    pub const fn diagnostics(&self) -> &DiagnosticsLog { &self.diagnostics }
}

/// Create a transparent, centered text label.
fn create_label<L: TextLayers>(
    layers: &mut L,
    font: L::Font,
    color: Rgb565,
) -> L::Layer {
    let layer = layers.create(Rectangle::zero());
    layers.set_background_color(layer, None);
    layers.set_alignment(layer, Alignment::Center);
    layers.set_font(layer, font);
    layers.set_text_color(layer, color);
    layer
}

// =============================================================================
// Unit Tests
// =============================================================================
