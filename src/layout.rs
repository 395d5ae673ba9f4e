use itertools::iproduct;

pub const GRID_COLUMNS: u32 = 22;
pub const GRID_ROWS: u32 = 17;

const GRID_WIDTH_RATIO: f32 = 0.78;
const GRID_HEIGHT_RATIO: f32 = 0.42;
const SPACING_FACTOR: f32 = 1.12;
const DOT_RADIUS_RATIO: f32 = 0.38;

const BLOCK_CENTER_RATIO: f32 = 0.60;
const YEAR_OFFSET_RATIO: f32 = 0.30;
const CAPTION_OFFSET_RATIO: f32 = 0.24;

const BAR_GAP_RATIO: f32 = 0.035;
const BAR_WIDTH_RATIO: f32 = 0.65;
const BAR_HEIGHT_RATIO: f32 = 0.004;
const BAR_CORNER_RADIUS: f32 = 50.0;
const PERCENT_OFFSET_RATIO: f32 = 0.012;

const SIGNATURE_RATIO: f32 = 0.95;

pub const YEAR_TEXT_RATIO: f32 = 0.038;
pub const CAPTION_TEXT_RATIO: f32 = 0.024;
pub const PERCENT_TEXT_RATIO: f32 = 0.020;
pub const SIGNATURE_TEXT_RATIO: f32 = 0.015;

pub const GLOW_RADIUS_FACTOR: f32 = 1.8;
pub const GLOW_BLUR_FACTOR: f32 = 2.5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub origin: Point,
    pub spaced_cell: f32,
    pub dot_radius: f32,
}

impl GridLayout {
    pub fn new(width: f32, height: f32, block_center_y: f32) -> Self {
        let cell_size = f32::min(
            width * GRID_WIDTH_RATIO / GRID_COLUMNS as f32,
            height * GRID_HEIGHT_RATIO / GRID_ROWS as f32,
        );
        let spaced_cell = cell_size * SPACING_FACTOR;

        GridLayout {
            origin: Point::new(
                width / 2.0 - (GRID_COLUMNS as f32 * spaced_cell) / 2.0,
                block_center_y - (GRID_ROWS as f32 * spaced_cell) / 2.0,
            ),
            spaced_cell,
            dot_radius: cell_size * DOT_RADIUS_RATIO,
        }
    }

    pub fn capacity() -> u32 {
        GRID_COLUMNS * GRID_ROWS
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + GRID_ROWS as f32 * self.spaced_cell
    }

    pub fn center_of(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.origin.x + col as f32 * self.spaced_cell + self.spaced_cell / 2.0,
            self.origin.y + row as f32 * self.spaced_cell + self.spaced_cell / 2.0,
        )
    }

    pub fn cells(&self, days: u32) -> impl Iterator<Item = (u32, Point)> + '_ {
        let centers =
            iproduct!(0..GRID_ROWS, 0..GRID_COLUMNS).map(move |(row, col)| self.center_of(row, col));

        (1..=days).zip(centers)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub track: Rect,
    pub corner_radius: f32,
}

impl BarLayout {
    pub fn fill(&self, percent: f32) -> Rect {
        Rect {
            right: self.track.left + self.track.width() * percent / 100.0,
            ..self.track
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub block_center_y: f32,
    pub grid: GridLayout,
    pub bar: BarLayout,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as f32, height as f32);
        let block_center_y = height * BLOCK_CENTER_RATIO;
        let grid = GridLayout::new(width, height, block_center_y);

        let bar_top = grid.bottom() + height * BAR_GAP_RATIO;
        let bar_width = width * BAR_WIDTH_RATIO;
        let bar_left = (width - bar_width) / 2.0;

        Layout {
            width,
            height,
            block_center_y,
            grid,
            bar: BarLayout {
                track: Rect::new(
                    bar_left,
                    bar_top,
                    bar_left + bar_width,
                    bar_top + height * BAR_HEIGHT_RATIO,
                ),
                corner_radius: BAR_CORNER_RADIUS,
            },
        }
    }

    pub fn year_anchor(&self) -> Point {
        Point::new(self.width / 2.0, self.block_center_y - self.height * YEAR_OFFSET_RATIO)
    }

    pub fn caption_anchor(&self) -> Point {
        Point::new(self.width / 2.0, self.block_center_y - self.height * CAPTION_OFFSET_RATIO)
    }

    pub fn percent_anchor(&self) -> Point {
        Point::new(self.width / 2.0, self.bar.track.top - self.height * PERCENT_OFFSET_RATIO)
    }

    pub fn signature_anchor(&self) -> Point {
        Point::new(self.width / 2.0, self.height * SIGNATURE_RATIO)
    }

    pub fn text_size(&self, ratio: f32) -> f32 {
        self.height * ratio
    }
}
