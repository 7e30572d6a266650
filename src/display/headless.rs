//! In-memory display backend for tests and `--headless` runs

use log::trace;

use super::{DisplayBackend, PixelBuffer};
use crate::color::Color;
use crate::error::RasterError;

pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    /// Last uploaded frame
    surface: Vec<Color>,
    /// Frame made visible by the most recent flip
    visible: Vec<Color>,
    uploads: u64,
    flips: u64,
    quit_after: Option<u64>,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            surface: Vec::new(),
            visible: Vec::new(),
            uploads: 0,
            flips: 0,
            quit_after: None,
        }
    }

    /// Request quit once `frames` flips have happened
    pub fn quit_after(mut self, frames: u64) -> Self {
        self.quit_after = Some(frames);
        self
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn flips(&self) -> u64 {
        self.flips
    }

    /// Pixels currently "on screen"
    pub fn visible(&self) -> &[Color] {
        &self.visible
    }
}

impl DisplayBackend for HeadlessDisplay {
    fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn upload(&mut self, buffer: &PixelBuffer) -> Result<(), RasterError> {
        if (buffer.width(), buffer.height()) != (self.width, self.height) {
            return Err(RasterError::backend(format!(
                "buffer is {}x{}, surface is {}x{}",
                buffer.width(),
                buffer.height(),
                self.width,
                self.height
            )));
        }
        self.surface.clear();
        self.surface.extend_from_slice(buffer.pixels());
        self.uploads += 1;
        Ok(())
    }

    fn flip(&mut self) {
        self.visible.clone_from(&self.surface);
        self.flips += 1;
        trace!("HeadlessDisplay: flip {}", self.flips);
    }

    fn poll_quit(&mut self) -> bool {
        self.quit_after.is_some_and(|limit| self.flips >= limit)
    }
}
