//! Font loader backed by `ProFont` sizes.
//!
//! The watch resources are not available on the desktop, so each bundled
//! or built-in font maps to the `ProFont` size closest to its pixel height.

use embedded_graphics::mono_font::MonoFont;
use profont::{PROFONT_9_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};
use watchface_common::platform::{FontKey, FontLoader, ResourceId};
use watchface_common::theme::{FONT_KEY_LECO_42_NUMBERS, RESOURCE_ID_LECO_20, RESOURCE_ID_LECO_30};

/// Handle to a static monospace font.
#[derive(Clone, Copy)]
pub struct SimFont(pub &'static MonoFont<'static>);

impl SimFont {
    /// Used for unknown resources and keys.
    pub const FALLBACK: Self = Self(&PROFONT_9_POINT);
}

impl PartialEq for SimFont {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        core::ptr::eq(self.0, other.0)
    }
}

impl core::fmt::Debug for SimFont {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        write!(f, "SimFont({}x{})", self.0.character_size.width, self.0.character_size.height)
    }
}

/// Counts loads so leaks show up in the shutdown log.
#[derive(Debug, Default)]
pub struct SimFonts {
    loaded: u32,
}

impl SimFonts {
    pub const fn new() -> Self { Self { loaded: 0 } }

    /// Custom fonts still loaded.
    pub const fn outstanding(&self) -> u32 { self.loaded }
}

impl FontLoader for SimFonts {
    type Font = SimFont;

    fn load_custom(
        &mut self,
        resource: ResourceId,
    ) -> SimFont {
        self.loaded += 1;
        match resource {
            RESOURCE_ID_LECO_20 => SimFont(&PROFONT_14_POINT),
            RESOURCE_ID_LECO_30 => SimFont(&PROFONT_18_POINT),
            other => {
                log::warn!("unknown font resource {}, using fallback", other.0);
                SimFont::FALLBACK
            }
        }
    }

    fn system_font(
        &self,
        key: FontKey,
    ) -> SimFont {
        if key == FONT_KEY_LECO_42_NUMBERS {
            SimFont(&PROFONT_24_POINT)
        } else {
            log::warn!("unknown system font {}, using fallback", key.0);
            SimFont::FALLBACK
        }
    }

    fn unload_custom(
        &mut self,
        _font: SimFont,
    ) {
        self.loaded = self.loaded.saturating_sub(1);
    }
}
