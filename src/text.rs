use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    text::{Baseline, Text},
    Drawable, Pixel,
};
use std::convert::Infallible;
use std::ops::Range;

use crate::theme::Color;

const FONT: MonoFont<'static> = FONT_10X20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    // height of a glyph cell in pixels
    pub size: f32,
    pub color: Color,
    pub italic: bool,
}

impl TextStyle {
    const ITALIC_SHEAR: f32 = 0.2;

    pub fn new(size: f32, color: Color) -> Self {
        TextStyle {
            size,
            color,
            italic: false,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn shear(&self) -> f32 {
        if self.italic {
            Self::ITALIC_SHEAR
        } else {
            0.0
        }
    }
}

pub struct GlyphMask {
    size: Size,
    bits: Vec<bool>,
}

impl GlyphMask {
    pub fn rasterize(text: &str) -> Self {
        let advance = FONT.character_size.width + FONT.character_spacing;
        let size = Size::new(
            advance * text.chars().count() as u32,
            FONT.character_size.height,
        );

        let mut mask = GlyphMask {
            size,
            bits: vec![false; (size.width * size.height) as usize],
        };

        let style = MonoTextStyle::new(&FONT, BinaryColor::On);
        match Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut mask) {
            Ok(_) => {}
            Err(never) => match never {},
        }

        mask
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn cell_height(&self) -> u32 {
        FONT.character_size.height
    }

    pub fn baseline(&self) -> u32 {
        FONT.baseline
    }

    pub fn is_set(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.size.width as i64 || y >= self.size.height as i64 {
            return false;
        }

        self.bits[(y as u32 * self.size.width + x as u32) as usize]
    }

    pub fn spans(&self) -> Vec<(u32, Range<u32>)> {
        let mut spans = Vec::new();

        for y in 0..self.size.height {
            let mut start = None;
            for x in 0..=self.size.width {
                let set = self.is_set(x as i64, y as i64);
                match (set, start) {
                    (true, None) => start = Some(x),
                    (false, Some(first)) => {
                        spans.push((y, first..x));
                        start = None;
                    }
                    _ => {}
                }
            }
        }

        spans
    }
}

impl OriginDimensions for GlyphMask {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for GlyphMask {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.bits[(y * self.size.width + x) as usize] = color.is_on();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_width_follows_text_length() {
        let mask = GlyphMask::rasterize("42.3%");

        assert_eq!(mask.width(), 50);
        assert_eq!(mask.height(), 20);
        assert!(mask.baseline() < mask.height());
    }

    #[test]
    fn glyphs_set_bits() {
        let mask = GlyphMask::rasterize("2024");
        let lit = (0..mask.height() as i64)
            .flat_map(|y| (0..mask.width() as i64).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.is_set(x, y))
            .count();

        assert!(lit > 0);
        assert!(!mask.is_set(-1, 0));
        assert!(!mask.is_set(0, 20));
    }

    #[test]
    fn blank_text_sets_nothing() {
        let mask = GlyphMask::rasterize("   ");

        assert_eq!(mask.width(), 30);
        assert!((0..30).all(|x| (0..20).all(|y| !mask.is_set(x, y))));
    }

    #[test]
    fn spans_cover_exactly_the_set_bits() {
        let mask = GlyphMask::rasterize("1.0%");
        let spans = mask.spans();

        assert!(!spans.is_empty());
        for (y, columns) in &spans {
            assert!(columns.start < columns.end);
            assert!(columns.clone().all(|x| mask.is_set(x as i64, *y as i64)));
            assert!(!mask.is_set(columns.end as i64, *y as i64));
        }

        let from_spans: usize = spans.iter().map(|(_, columns)| columns.len()).sum();
        let from_bits = (0..mask.height() as i64)
            .flat_map(|y| (0..mask.width() as i64).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.is_set(x, y))
            .count();
        assert_eq!(from_spans, from_bits);
        assert!(GlyphMask::rasterize("   ").spans().is_empty());
    }

    #[test]
    fn only_italic_is_sheared() {
        let style = TextStyle::new(12.0, Color::WHITE);

        assert_eq!(style.shear(), 0.0);
        assert!(style.italic().shear() > 0.0);
    }
}
