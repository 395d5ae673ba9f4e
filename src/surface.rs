use std::mem;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::Result;

// lock_canvas returns None while the surface cannot be drawn to
pub trait Surface {
    fn lock_canvas(&mut self) -> Option<Canvas>;
    fn unlock_canvas_and_post(&mut self, canvas: Canvas) -> Result<()>;
}

// Posted back on drop, so the surface is released even if drawing panics.
pub struct LockedCanvas<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    canvas: Canvas,
    posted: bool,
}

impl<'s, S: Surface + ?Sized> LockedCanvas<'s, S> {
    pub fn lock(surface: &'s mut S) -> Option<Self> {
        let canvas = surface.lock_canvas()?;

        Some(LockedCanvas {
            surface,
            canvas,
            posted: false,
        })
    }

    pub fn post(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.posted {
            return Ok(());
        }
        self.posted = true;

        let canvas = mem::replace(&mut self.canvas, Canvas::new(0, 0));
        self.surface.unlock_canvas_and_post(canvas)
    }
}

impl<S: Surface + ?Sized> Deref for LockedCanvas<'_, S> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &self.canvas
    }
}

impl<S: Surface + ?Sized> DerefMut for LockedCanvas<'_, S> {
    fn deref_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

impl<S: Surface + ?Sized> Drop for LockedCanvas<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("Failed to post canvas: {}", e);
        }
    }
}

#[derive(Debug, Clone)]
pub struct PngSurface {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngSurface {
    pub fn new(path: &Path, width: u32, height: u32) -> Self {
        PngSurface {
            path: path.to_owned(),
            width,
            height,
        }
    }

    fn directory_exists(&self) -> bool {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
            _ => true,
        }
    }
}

impl Surface for PngSurface {
    fn lock_canvas(&mut self) -> Option<Canvas> {
        if self.directory_exists() {
            Some(Canvas::new(self.width, self.height))
        } else {
            None
        }
    }

    fn unlock_canvas_and_post(&mut self, canvas: Canvas) -> Result<()> {
        if canvas.width() == 0 || canvas.height() == 0 {
            log::debug!(
                "Not writing empty {}x{} frame",
                canvas.width(),
                canvas.height()
            );
            return Ok(());
        }

        canvas.into_image().save(&self.path)?;
        log::info!("Wrote {}", self.path.display());

        Ok(())
    }
}
