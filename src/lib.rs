pub mod calendar;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod layout;
pub mod render;
pub mod surface;
pub mod text;
pub mod theme;
pub mod tz;

pub use render::{render, render_image};
