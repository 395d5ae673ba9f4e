use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, DeserializeFromStr)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

}

impl From<Color> for tiny_skia::Color {
    fn from(color: Color) -> Self {
        tiny_skia::Color::from_rgba8(color.r, color.g, color.b, u8::MAX)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::new(
                ErrorKind::ColorParse,
                &format!("'{}' is not a #RRGGBB color", s),
            ));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| Error::new(ErrorKind::ColorParse, &e.to_string()))
        };

        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background_top: Color,
    pub background_bottom: Color,
    pub year_text: Color,
    pub caption_text: Color,
    pub month_start_dot: Color,
    pub elapsed_dot: Color,
    pub future_dot: Color,
    pub glow: Color,
    pub bar_track: Color,
    pub bar_fill: Color,
    pub percent_text: Color,
    pub signature_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background_top: Color::rgb(0x0E, 0x08, 0x20),
            background_bottom: Color::rgb(0x1E, 0x10, 0x38),
            year_text: Color::WHITE,
            caption_text: Color::rgb(0xD6, 0xCF, 0xFF),
            month_start_dot: Color::rgb(0xFF, 0x9F, 0x1C),
            elapsed_dot: Color::WHITE,
            future_dot: Color::rgb(0x4A, 0x3B, 0x75),
            glow: Color::WHITE,
            bar_track: Color::rgb(0x4A, 0x3B, 0x75),
            bar_fill: Color::WHITE,
            percent_text: Color::rgb(0xEA, 0xE6, 0xFF),
            signature_text: Color::rgb(0xB8, 0xA9, 0xD9),
        }
    }
}
