//! Text layers rendered onto the simulator display.
//!
//! Layers live in a slot arena; a handle is the slot index. Destroyed slots
//! are reused by later layers. Calls on a destroyed handle are ignored.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use watchface_common::colors::{BLACK, WHITE};
use watchface_common::platform::TextLayers;

use super::fonts::SimFont;

/// Handle to a layer in [`SimLayers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerId(usize);

#[derive(Debug, Clone)]
struct SimLayer {
    frame: Rectangle,
    text: String,
    color: Rgb565,
    background: Option<Rgb565>,
    alignment: Alignment,
    font: SimFont,
}

impl SimLayer {
    fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            text: String::new(),
            color: BLACK,
            background: Some(WHITE),
            alignment: Alignment::Left,
            font: SimFont::FALLBACK,
        }
    }

    fn style(&self) -> MonoTextStyle<'static, Rgb565> { MonoTextStyle::new(self.font.0, self.color) }

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut clipped = target.clipped(&self.frame);
        if let Some(background) = self.background {
            self.frame.into_styled(PrimitiveStyle::with_fill(background)).draw(&mut clipped)?;
        }
        if self.text.is_empty() {
            return Ok(());
        }

        let x = match self.alignment {
            Alignment::Left => self.frame.top_left.x,
            Alignment::Center => self.frame.center().x,
            Alignment::Right => self.frame.top_left.x + self.frame.size.width as i32 - 1,
        };
        let text_style = TextStyleBuilder::new().alignment(self.alignment).baseline(Baseline::Top).build();
        Text::with_text_style(&self.text, Point::new(x, self.frame.top_left.y), self.style(), text_style)
            .draw(&mut clipped)?;
        Ok(())
    }
}

/// Window root layer plus its text layers.
#[derive(Debug)]
pub struct SimLayers {
    bounds: Rectangle,
    background: Rgb565,
    slots: Vec<Option<SimLayer>>,
}

impl SimLayers {
    pub fn new(size: Size) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), size),
            background: WHITE,
            slots: Vec::new(),
        }
    }

    /// Number of layers not yet destroyed.
    pub fn live(&self) -> usize { self.slots.iter().filter(|slot| slot.is_some()).count() }

    /// Text of a layer, `None` once destroyed.
    pub fn text(
        &self,
        layer: LayerId,
    ) -> Option<&str> {
        self.get(layer).map(|slot| slot.text.as_str())
    }

    /// Paint the window background then every layer in creation order.
    pub fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.background)?;
        for layer in self.slots.iter().flatten() {
            layer.draw(target)?;
        }
        Ok(())
    }

    fn get(
        &self,
        layer: LayerId,
    ) -> Option<&SimLayer> {
        self.slots.get(layer.0).and_then(Option::as_ref)
    }

    fn update(
        &mut self,
        layer: LayerId,
        f: impl FnOnce(&mut SimLayer),
    ) {
        match self.slots.get_mut(layer.0).and_then(Option::as_mut) {
            Some(slot) => f(slot),
            None => log::warn!("ignoring update of destroyed layer {}", layer.0),
        }
    }
}

impl TextLayers for SimLayers {
    type Layer = LayerId;
    type Font = SimFont;

    fn bounds(&self) -> Rectangle { self.bounds }

    fn set_window_background(
        &mut self,
        color: Rgb565,
    ) {
        self.background = color;
    }

    fn create(
        &mut self,
        frame: Rectangle,
    ) -> LayerId {
        let layer = SimLayer::new(frame);
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(layer);
            return LayerId(index);
        }
        self.slots.push(Some(layer));
        LayerId(self.slots.len() - 1)
    }

    fn destroy(
        &mut self,
        layer: LayerId,
    ) {
        if let Some(slot) = self.slots.get_mut(layer.0) {
            *slot = None;
        }
    }

    fn set_background_color(
        &mut self,
        layer: LayerId,
        color: Option<Rgb565>,
    ) {
        self.update(layer, |slot| slot.background = color);
    }

    fn set_text_color(
        &mut self,
        layer: LayerId,
        color: Rgb565,
    ) {
        self.update(layer, |slot| slot.color = color);
    }

    fn set_alignment(
        &mut self,
        layer: LayerId,
        alignment: Alignment,
    ) {
        self.update(layer, |slot| slot.alignment = alignment);
    }

    fn set_font(
        &mut self,
        layer: LayerId,
        font: SimFont,
    ) {
        self.update(layer, |slot| slot.font = font);
    }

    fn set_frame(
        &mut self,
        layer: LayerId,
        frame: Rectangle,
    ) {
        self.update(layer, |slot| slot.frame = frame);
    }

    fn set_text(
        &mut self,
        layer: LayerId,
        text: &str,
    ) {
        self.update(layer, |slot| {
            slot.text.clear();
            slot.text.push_str(text);
        });
    }

    fn content_size(
        &self,
        layer: LayerId,
    ) -> Size {
        self.get(layer).map_or_else(Size::zero, |slot| {
            if slot.text.is_empty() {
                return Size::zero();
            }
            slot.style()
                .measure_string(&slot.text, Point::zero(), Baseline::Top)
                .bounding_box
                .size
        })
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use profont::PROFONT_18_POINT;

    use super::*;

    fn layers() -> SimLayers { SimLayers::new(Size::new(144, 168)) }

    #[test]
    fn test_content_size_follows_font_metrics() {
        let mut layers = layers();
        let id = layers.create(Rectangle::zero());
        layers.set_font(id, SimFont(&PROFONT_18_POINT));
        layers.set_text(id, "12K");

        let char_size = PROFONT_18_POINT.character_size;
        let spacing = PROFONT_18_POINT.character_spacing;
        let size = layers.content_size(id);
        assert_eq!(size.height, char_size.height);
        assert_eq!(size.width, 3 * char_size.width + 2 * spacing);
    }

    #[test]
    fn test_empty_text_has_no_size() {
        let mut layers = layers();
        let id = layers.create(Rectangle::zero());
        assert_eq!(layers.content_size(id), Size::zero());
    }

    #[test]
    fn test_destroyed_slot_is_reused() {
        let mut layers = layers();
        let a = layers.create(Rectangle::zero());
        let b = layers.create(Rectangle::zero());
        layers.destroy(a);
        assert_eq!(layers.live(), 1);
        assert_eq!(layers.text(a), None);

        let c = layers.create(Rectangle::zero());
        assert_eq!(c, a);
        assert_ne!(c, b);
        assert_eq!(layers.live(), 2);
    }

    #[test]
    fn test_updates_to_destroyed_layer_are_ignored() {
        let mut layers = layers();
        let id = layers.create(Rectangle::zero());
        layers.destroy(id);
        layers.set_text(id, "07:03");
        assert_eq!(layers.content_size(id), Size::zero());
    }

    #[test]
    fn test_transparent_layer_keeps_window_background() {
        let mut layers = SimLayers::new(Size::new(8, 8));
        layers.set_window_background(BLACK);
        let id = layers.create(Rectangle::new(Point::zero(), Size::new(8, 8)));
        layers.set_background_color(id, None);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        layers.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(4, 4)), Some(BLACK));
    }

    #[test]
    fn test_opaque_layer_paints_its_frame() {
        let mut layers = SimLayers::new(Size::new(8, 8));
        layers.set_window_background(BLACK);
        let id = layers.create(Rectangle::new(Point::new(2, 2), Size::new(4, 4)));
        layers.set_background_color(id, Some(WHITE));

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        layers.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(3, 3)), Some(WHITE));
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(BLACK));
    }
}
