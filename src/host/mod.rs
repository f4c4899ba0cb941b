//! Desktop implementations of the watchface host services.

mod clock;
mod fonts;
mod haptics;
mod health;
mod layers;
mod store;

use clock::SystemClock;
use embedded_graphics::geometry::Size;
use fonts::SimFonts;
use haptics::SimHaptics;
use health::SimHealth;
use layers::SimLayers;
use store::FileStore;
use watchface_common::platform::{Platform, Services};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, store_path};

/// The simulator host.
pub struct SimPlatform;

impl Platform for SimPlatform {
    type Layers = SimLayers;
    type Fonts = SimFonts;
    type Health = SimHealth;
    type Clock = SystemClock;
    type Store = FileStore;
    type Haptics = SimHaptics;
}

/// Services for a fresh simulator window.
pub fn services(reject_health: bool) -> Services<SimPlatform> {
    let health = if reject_health {
        SimHealth::new().with_rejected_subscription()
    } else {
        SimHealth::new()
    };
    Services {
        layers: SimLayers::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
        fonts: SimFonts::new(),
        health,
        clock: SystemClock::new(),
        store: FileStore::open(store_path()),
        haptics: SimHaptics::new(),
    }
}
