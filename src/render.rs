use chrono::NaiveDate;
use image::RgbaImage;

use crate::calendar::YearProgress;
use crate::canvas::{Canvas, Glow};
use crate::layout::{self, Layout};
use crate::text::TextStyle;
use crate::theme::{Color, Theme};

pub const DEFAULT_SIGNATURE: &str = "developed by Sanika";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotKind {
    MonthStart,
    Elapsed,
    Future,
}

impl DotKind {
    // month starts win over the elapsed/future split
    pub fn classify(index: u32, day_of_year: u32, is_month_start: bool) -> Self {
        if is_month_start {
            DotKind::MonthStart
        } else if index <= day_of_year {
            DotKind::Elapsed
        } else {
            DotKind::Future
        }
    }

    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            DotKind::MonthStart => theme.month_start_dot,
            DotKind::Elapsed => theme.elapsed_dot,
            DotKind::Future => theme.future_dot,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Wallpaper<'a> {
    theme: &'a Theme,
    signature: &'a str,
}

impl<'a> Wallpaper<'a> {
    pub fn new(theme: &'a Theme, signature: &'a str) -> Self {
        Wallpaper { theme, signature }
    }

    pub fn render(&self, date: NaiveDate, canvas: &mut Canvas) {
        let theme = self.theme;
        let layout = Layout::new(canvas.width(), canvas.height());

        canvas.fill_vertical_gradient(theme.background_top, theme.background_bottom);

        let progress = YearProgress::from_date(&date);
        let month_starts = progress.month_starts();

        canvas.draw_text(
            &progress.year().to_string(),
            layout.year_anchor(),
            &TextStyle::new(layout.text_size(layout::YEAR_TEXT_RATIO), theme.year_text),
        );
        canvas.draw_text(
            &progress.caption(),
            layout.caption_anchor(),
            &TextStyle::new(layout.text_size(layout::CAPTION_TEXT_RATIO), theme.caption_text),
        );

        let grid = &layout.grid;
        for (index, center) in grid.cells(progress.total_days()) {
            if index == progress.day_of_year() {
                canvas.draw_glow(
                    center,
                    Glow {
                        color: theme.glow,
                        radius: grid.dot_radius * layout::GLOW_RADIUS_FACTOR,
                        blur_radius: grid.dot_radius * layout::GLOW_BLUR_FACTOR,
                    },
                );
            }

            let kind = DotKind::classify(
                index,
                progress.day_of_year(),
                month_starts.contains(&index),
            );
            canvas.fill_circle(center, grid.dot_radius, kind.color(theme));
        }

        let bar = &layout.bar;
        canvas.fill_round_rect(bar.track, bar.corner_radius, theme.bar_track);
        canvas.fill_round_rect(bar.fill(progress.percent()), bar.corner_radius, theme.bar_fill);

        canvas.draw_text(
            &progress.percent_label(),
            layout.percent_anchor(),
            &TextStyle::new(layout.text_size(layout::PERCENT_TEXT_RATIO), theme.percent_text),
        );

        canvas.draw_text(
            self.signature,
            layout.signature_anchor(),
            &TextStyle::new(
                layout.text_size(layout::SIGNATURE_TEXT_RATIO),
                theme.signature_text,
            )
            .italic(),
        );
    }
}

pub fn render(date: NaiveDate, canvas: &mut Canvas) {
    Wallpaper::new(&Theme::default(), DEFAULT_SIGNATURE).render(date, canvas);
}

pub fn render_image(date: NaiveDate, width: u32, height: u32) -> RgbaImage {
    let mut canvas = Canvas::new(width, height);
    render(date, &mut canvas);
    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use image::Rgba;

    const WIDTH: u32 = 1080;
    const HEIGHT: u32 = 2400;

    fn date(year: i32, ordinal: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(year, ordinal).unwrap()
    }

    fn cell_center(index: u32) -> Point {
        let grid = Layout::new(WIDTH, HEIGHT).grid;
        let (_, center) = grid.cells(index).last().unwrap();
        center
    }

    fn pixel_at(image: &RgbaImage, point: Point) -> Rgba<u8> {
        *image.get_pixel(point.x as u32, point.y as u32)
    }

    fn opaque(color: Color) -> Rgba<u8> {
        Rgba([color.r, color.g, color.b, u8::MAX])
    }

    fn close_to(pixel: Rgba<u8>, color: Color) -> bool {
        let expected = opaque(color);
        pixel
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, b)| (*a as i16 - *b as i16).abs() <= 1)
    }

    // red channel half a cell below the dot for `index`
    fn below(image: &RgbaImage, index: u32) -> u8 {
        let grid = Layout::new(WIDTH, HEIGHT).grid;
        let center = cell_center(index);
        pixel_at(image, Point::new(center.x, center.y + grid.spaced_cell / 2.0))[0]
    }

    fn lit_near(image: &RgbaImage, anchor: Point, size: f32) -> bool {
        let top = (anchor.y - size).max(0.0) as u32;
        let bottom = ((anchor.y + size * 0.3) as u32).min(HEIGHT);

        (top..bottom).any(|y| {
            (0..WIDTH).any(|x| {
                let p = image.get_pixel(x, y);
                p[1] > 128 && p[0] < 80 && p[2] < 80
            })
        })
    }

    #[test]
    fn classification_priority() {
        assert_eq!(DotKind::classify(1, 1, true), DotKind::MonthStart);
        assert_eq!(DotKind::classify(32, 10, true), DotKind::MonthStart);
        assert_eq!(DotKind::classify(10, 10, false), DotKind::Elapsed);
        assert_eq!(DotKind::classify(9, 10, false), DotKind::Elapsed);
        assert_eq!(DotKind::classify(11, 10, false), DotKind::Future);
    }

    #[test]
    fn classification_is_order_independent() {
        let forward: Vec<_> = (1..=366).map(|i| DotKind::classify(i, 60, i % 31 == 1)).collect();
        let mut backward: Vec<_> = (1..=366)
            .rev()
            .map(|i| DotKind::classify(i, 60, i % 31 == 1))
            .collect();
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn leap_day_is_white_and_glowing() {
        let theme = Theme::default();
        let image = render_image(date(2024, 60), WIDTH, HEIGHT);

        assert_eq!(pixel_at(&image, cell_center(60)), opaque(theme.elapsed_dot));
        assert_eq!(pixel_at(&image, cell_center(61)), opaque(theme.month_start_dot));
        assert_eq!(pixel_at(&image, cell_center(62)), opaque(theme.future_dot));
        assert_eq!(pixel_at(&image, cell_center(366)), opaque(theme.future_dot));

        // glow brightens the gap between today and its neighbours
        assert!(below(&image, 60) > below(&image, 200) + 20);
    }

    #[test]
    fn new_year_is_amber() {
        let theme = Theme::default();
        let image = render_image(date(2023, 1), WIDTH, HEIGHT);

        assert_eq!(pixel_at(&image, cell_center(1)), opaque(theme.month_start_dot));
        assert_eq!(pixel_at(&image, cell_center(2)), opaque(theme.future_dot));
        assert_eq!(pixel_at(&image, cell_center(32)), opaque(theme.month_start_dot));

        // amber today still carries the glow
        assert!(below(&image, 1) > below(&image, 200) + 20);
        assert!(below(&image, 32) < below(&image, 1));
    }

    #[test]
    fn every_label_is_drawn() {
        let green = Color::rgb(0x00, 0xFF, 0x00);
        let theme = Theme {
            year_text: green,
            caption_text: green,
            percent_text: green,
            signature_text: green,
            ..Theme::default()
        };
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        Wallpaper::new(&theme, DEFAULT_SIGNATURE).render(date(2023, 100), &mut canvas);
        let image = canvas.into_image();

        let layout = Layout::new(WIDTH, HEIGHT);
        let labels = [
            (layout.year_anchor(), layout::YEAR_TEXT_RATIO),
            (layout.caption_anchor(), layout::CAPTION_TEXT_RATIO),
            (layout.percent_anchor(), layout::PERCENT_TEXT_RATIO),
            (layout.signature_anchor(), layout::SIGNATURE_TEXT_RATIO),
        ];
        for (anchor, ratio) in labels.iter() {
            assert!(
                lit_near(&image, *anchor, layout.text_size(*ratio)),
                "no text at {:?}",
                anchor
            );
        }

        // default colors leave no green anywhere
        let plain = render_image(date(2023, 100), WIDTH, HEIGHT);
        assert!(!lit_near(&plain, layout.year_anchor(), layout.text_size(layout::YEAR_TEXT_RATIO)));
    }

    #[test]
    fn empty_signature_draws_nothing() {
        let green = Color::rgb(0x00, 0xFF, 0x00);
        let theme = Theme {
            signature_text: green,
            ..Theme::default()
        };
        let layout = Layout::new(WIDTH, HEIGHT);
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        Wallpaper::new(&theme, "").render(date(2023, 100), &mut canvas);

        let size = layout.text_size(layout::SIGNATURE_TEXT_RATIO);
        assert!(!lit_near(&canvas.into_image(), layout.signature_anchor(), size));
    }

    #[test]
    fn last_day_fills_the_bar() {
        let theme = Theme::default();
        let image = render_image(date(2023, 365), WIDTH, HEIGHT);
        let track = Layout::new(WIDTH, HEIGHT).bar.track;
        let mid_y = (track.top + track.bottom) / 2.0;

        for x in [0.1, 0.5, 0.9] {
            let point = Point::new(track.left + track.width() * x, mid_y);
            assert_eq!(pixel_at(&image, point), opaque(theme.bar_fill));
        }

        assert_eq!(pixel_at(&image, cell_center(365)), opaque(theme.elapsed_dot));
        assert_eq!(pixel_at(&image, cell_center(335)), opaque(theme.month_start_dot));
    }

    #[test]
    fn partial_bar_shows_track() {
        let theme = Theme::default();
        let image = render_image(date(2023, 182), WIDTH, HEIGHT);
        let track = Layout::new(WIDTH, HEIGHT).bar.track;
        let mid_y = (track.top + track.bottom) / 2.0;

        let filled = Point::new(track.left + track.width() * 0.25, mid_y);
        let empty = Point::new(track.left + track.width() * 0.75, mid_y);
        assert_eq!(pixel_at(&image, filled), opaque(theme.bar_fill));
        assert_eq!(pixel_at(&image, empty), opaque(theme.bar_track));
    }

    #[test]
    fn background_is_a_gradient() {
        let theme = Theme::default();
        let image = render_image(date(2023, 100), WIDTH, HEIGHT);

        assert!(close_to(*image.get_pixel(0, 0), theme.background_top));
        assert!(close_to(*image.get_pixel(WIDTH - 1, HEIGHT - 1), theme.background_bottom));
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_image(date(2024, 200), 270, 600);
        let second = render_image(date(2024, 200), 270, 600);

        assert!(first == second);
    }

    #[test]
    fn zero_sized_canvas() {
        for (width, height) in [(0, 0), (0, 600), (600, 0)] {
            let image = render_image(date(2024, 60), width, height);
            assert_eq!(image.dimensions(), (width, height));
        }
    }

    #[test]
    fn custom_theme_and_signature() {
        let theme = Theme {
            elapsed_dot: Color::rgb(0x10, 0xC0, 0x10),
            ..Theme::default()
        };
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        Wallpaper::new(&theme, "").render(date(2023, 50), &mut canvas);

        assert_eq!(canvas.pixel(cell_center(20).x as u32, cell_center(20).y as u32), Some(opaque(theme.elapsed_dot)));
    }
}
