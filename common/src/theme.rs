//! Fonts and colors of the watchface.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{BLACK, CYAN, WHITE};
use crate::platform::{FontKey, FontLoader, ResourceId};
use crate::steps::StepsPalette;

/// Bundled 20px LECO font (date label).
pub const RESOURCE_ID_LECO_20: ResourceId = ResourceId(1);

/// Bundled 30px LECO font (steps label).
pub const RESOURCE_ID_LECO_30: ResourceId = ResourceId(2);

/// Built-in 42px LECO digits (time label).
pub const FONT_KEY_LECO_42_NUMBERS: FontKey = FontKey("RESOURCE_ID_LECO_42_NUMBERS");

/// Where a label font comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// Bundled resource, loaded at startup and unloaded at shutdown.
    Custom(ResourceId),
    /// Built into the host, never unloaded.
    System(FontKey),
}

impl FontSource {
    /// Obtain the font from the host loader.
    pub fn resolve<F: FontLoader>(
        self,
        loader: &mut F,
    ) -> F::Font {
        match self {
            Self::Custom(id) => loader.load_custom(id),
            Self::System(key) => loader.system_font(key),
        }
    }

    #[inline]
    pub const fn is_custom(self) -> bool { matches!(self, Self::Custom(_)) }
}

/// Complete visual configuration of the watchface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb565,
    pub time_color: Rgb565,
    pub date_color: Rgb565,
    pub steps: StepsPalette,
    pub time_font: FontSource,
    pub date_font: FontSource,
    pub steps_font: FontSource,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BLACK,
            time_color: WHITE,
            date_color: CYAN,
            steps: StepsPalette::default(),
            time_font: FontSource::System(FONT_KEY_LECO_42_NUMBERS),
            date_font: FontSource::Custom(RESOURCE_ID_LECO_20),
            steps_font: FontSource::Custom(RESOURCE_ID_LECO_30),
        }
    }
}
