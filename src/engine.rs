use chrono::{DateTime, NaiveDate, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::render::Wallpaper;
use crate::surface::{LockedCanvas, Surface};
use crate::theme::Theme;
use crate::tz::Tz;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    SurfaceCreated,
    VisibilityChanged(bool),
}

impl Trigger {
    pub fn wants_redraw(&self) -> bool {
        match self {
            Trigger::SurfaceCreated => true,
            Trigger::VisibilityChanged(visible) => *visible,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    Drawn(NaiveDate),
    Skipped,
    NotRequested,
}

// Nothing is kept between redraws; every trigger repaints from scratch.
pub struct WallpaperEngine<S: Surface> {
    surface: S,
    timezone: Tz,
    theme: Theme,
    signature: String,
}

impl<S: Surface> WallpaperEngine<S> {
    pub fn new(surface: S, config: &Config) -> Self {
        WallpaperEngine {
            surface,
            timezone: config.timezone.clone(),
            theme: config.theme.clone(),
            signature: config.signature.clone(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn handle(&mut self, trigger: Trigger, now: DateTime<Utc>) -> Result<Redraw> {
        log::debug!("Handling {:?}", trigger);

        if !trigger.wants_redraw() {
            return Ok(Redraw::NotRequested);
        }

        self.redraw(self.timezone.date_of(&now))
    }

    pub fn redraw(&mut self, date: NaiveDate) -> Result<Redraw> {
        let mut canvas = match LockedCanvas::lock(&mut self.surface) {
            Some(canvas) => canvas,
            None => return Ok(Redraw::Skipped),
        };

        Wallpaper::new(&self.theme, &self.signature).render(date, &mut canvas);
        canvas.post()?;

        Ok(Redraw::Drawn(date))
    }
}
