//! Golden steps watchface simulator for desktop.
//!
//! Runs the watchface core against simulated host services in an
//! embedded-graphics-simulator window.
//!
//! # Keys
//!
//! | Key | Action                                   |
//! |-----|------------------------------------------|
//! | S   | +1000 steps (significant health update)  |
//! | M   | +100 steps (movement health update)      |
//! | R   | reset today's steps                      |
//! | A   | cycle the historical average             |
//! | H   | toggle step data permission              |
//! | Q   | quit                                     |
//!
//! Run with `--reject-health` to simulate a host that refuses the health
//! subscription. Log output is filtered by `WATCHFACE_LOG`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod host;
mod timing;

use std::env;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use env_logger::Env;
use watchface_common::platform::HealthEvent;
use watchface_common::{Event, Theme, Watchface};

use crate::config::{
    LOG_ENV,
    MOVEMENT_STEP_INCREMENT,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    SIGNIFICANT_STEP_INCREMENT,
    WINDOW_SCALE,
    WINDOW_TITLE,
};
use crate::timing::FRAME_TIME;

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "info")).init();

    let reject_health = env::args().skip(1).any(|arg| arg == "--reject-health");
    let mut services = host::services(reject_health);

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new(WINDOW_TITLE, &output_settings);

    let mut face = Watchface::load(&mut services, Theme::default());
    log::info!("persistent store at {}", services.store.path().display());

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            let keycode = match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat: false, .. } => keycode,
                _ => continue,
            };

            let update = match keycode {
                Keycode::S => services
                    .health
                    .add_steps(SIGNIFICANT_STEP_INCREMENT, HealthEvent::SignificantUpdate),
                Keycode::M => services
                    .health
                    .add_steps(MOVEMENT_STEP_INCREMENT, HealthEvent::MovementUpdate),
                Keycode::R => services.health.reset_steps(),
                Keycode::A => services.health.cycle_average(),
                Keycode::H => services.health.toggle_access(),
                Keycode::Q => break 'running,
                _ => continue,
            };
            log::info!(
                "steps today {}, average {}, access {}",
                services.health.today(),
                services.health.average(),
                if services.health.step_access() { "granted" } else { "denied" }
            );

            if let Some(event) = update {
                face.dispatch(&mut services, Event::Health(event));
                log::debug!(
                    "steps label {:?} in {:?}",
                    services.layers.text(face.labels().steps),
                    face.steps_state()
                );
            }
        }

        if services.clock.poll_tick() {
            face.dispatch(&mut services, Event::Tick);
        }

        let area = display.bounding_box();
        services.layers.draw(&mut display).ok();
        services.haptics.draw(&mut display, area, Instant::now()).ok();
        window.update(&display);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    face.unload(&mut services);
    log::info!(
        "shutdown: {} layers live, {} custom fonts loaded, {} haptic pulses",
        services.layers.live(),
        services.fonts.outstanding(),
        services.haptics.pulses()
    );
}
