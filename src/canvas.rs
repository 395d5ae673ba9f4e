use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use kurbo::{PathEl, Shape};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, GradientStop, LinearGradient, PathBuilder, Pixmap, PixmapPaint,
    SpreadMode, Transform,
};

use crate::layout::{Point, Rect};
use crate::text::{GlyphMask, TextStyle};
use crate::theme::Color;

// Flattening tolerance for curves, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub radius: f32,
    pub blur_radius: f32,
}

impl Glow {
    // Conversion from a blur radius to a gaussian sigma, as used by skia.
    const BLUR_SIGMA_SCALE: f32 = 0.577_35;

    pub fn sigma(&self) -> f32 {
        self.blur_radius * Self::BLUR_SIGMA_SCALE + 0.5
    }
}

fn solid(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(color.into());
    paint.anti_alias = true;
    paint
}

fn to_path(shape: &impl Shape) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();

    for element in shape.path_elements(PATH_TOLERANCE) {
        match element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }

    builder.finish()
}

pub struct Canvas {
    width: u32,
    height: u32,
    // None when either side is zero
    pixmap: Option<Pixmap>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            width,
            height,
            pixmap: Pixmap::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba([color.red(), color.green(), color.blue(), color.alpha()]))
    }

    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);

        if let Some(pixmap) = &self.pixmap {
            for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
                let color = src.demultiply();
                *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
            }
        }

        image
    }

    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }

    pub fn fill_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let (width, height) = (self.width as f32, self.height as f32);
        let pixmap = match self.pixmap.as_mut() {
            Some(pixmap) => pixmap,
            None => return,
        };

        let shader = LinearGradient::new(
            tiny_skia::Point::from_xy(0.0, 0.0),
            tiny_skia::Point::from_xy(0.0, height),
            vec![
                GradientStop::new(0.0, top.into()),
                GradientStop::new(1.0, bottom.into()),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );

        let mut paint = solid(top);
        if let Some(shader) = shader {
            paint.shader = shader;
        }
        paint.blend_mode = BlendMode::Source;

        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }

        let circle = kurbo::Circle::new((center.x as f64, center.y as f64), radius as f64);
        self.fill_shape(&circle, color);
    }

    // radius is clamped to half of the shorter side
    pub fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        if rect.is_empty() {
            return;
        }

        let radius = radius
            .max(0.0)
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0);
        let shape = kurbo::RoundedRect::new(
            rect.left as f64,
            rect.top as f64,
            rect.right as f64,
            rect.bottom as f64,
            radius as f64,
        );

        self.fill_shape(&shape, color);
    }

    pub fn draw_glow(&mut self, center: Point, glow: Glow) {
        if !(glow.radius > 0.0) || self.pixmap.is_none() {
            return;
        }

        let sigma = glow.sigma();
        let extent = glow.radius + 3.0 * sigma + 1.0;
        let side = (2.0 * extent).ceil() as u32;
        let origin_x = (center.x - extent).floor();
        let origin_y = (center.y - extent).floor();

        let mut layer = Canvas::new(side, side);
        layer.fill_circle(
            Point::new(center.x - origin_x, center.y - origin_y),
            glow.radius,
            glow.color,
        );

        let coverage = GrayImage::from_fn(side, side, |x, y| {
            Luma([layer.pixel(x, y).map_or(0, |p| p[3])])
        });
        let blurred = imageops::blur(&coverage, sigma);

        let mut halo = match Pixmap::new(side, side) {
            Some(halo) => halo,
            None => return,
        };
        for (dst, Luma([alpha])) in halo.pixels_mut().iter_mut().zip(blurred.pixels()) {
            *dst = ColorU8::from_rgba(glow.color.r, glow.color.g, glow.color.b, *alpha).premultiply();
        }

        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.draw_pixmap(
                origin_x as i32,
                origin_y as i32,
                halo.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }

    // centered on anchor.x, baseline on anchor.y
    pub fn draw_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        if !(style.size > 0.0) || text.is_empty() {
            return;
        }

        let mask = GlyphMask::rasterize(text);
        let mut builder = PathBuilder::new();
        for (y, span) in mask.spans() {
            let (x0, x1) = (span.start as f32, span.end as f32);
            if let Some(rect) = tiny_skia::Rect::from_ltrb(x0, y as f32, x1, y as f32 + 1.0) {
                builder.push_rect(rect);
            }
        }
        let path = match builder.finish() {
            Some(path) => path,
            None => return,
        };

        let scale = style.size / mask.cell_height() as f32;
        let shear = style.shear();
        let left = anchor.x - mask.width() as f32 * scale / 2.0;
        let top = anchor.y - mask.baseline() as f32 * scale;

        // glyph cells scaled to size and slanted around the baseline
        let transform = Transform::from_row(
            scale,
            0.0,
            -shear * scale,
            scale,
            left + shear * (anchor.y - top),
            top,
        );

        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(&path, &solid(style.color), FillRule::Winding, transform, None);
        }
    }

    fn fill_shape(&mut self, shape: &impl Shape, color: Color) {
        let pixmap = match self.pixmap.as_mut() {
            Some(pixmap) => pixmap,
            None => return,
        };

        if let Some(path) = to_path(shape) {
            pixmap.fill_path(
                &path,
                &solid(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}
