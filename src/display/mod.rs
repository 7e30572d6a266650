mod headless;
mod pixel_buffer;
mod sdl;

pub use headless::HeadlessDisplay;
pub use pixel_buffer::{BoundsPolicy, PixelBuffer};
pub use sdl::{SdlDisplay, SdlSurface, WindowOptions};

use crate::error::RasterError;

/// Everything the frame pipeline needs from the outside world
///
/// Window and surface creation happen in each backend's constructor; once
/// built, a backend only reports its size, shows pixels and relays quit
/// requests.
pub trait DisplayBackend {
    /// Output resolution in pixels; the pixel buffer is sized from this
    fn output_size(&self) -> (u32, u32);

    /// Copy the buffer's contents to the surface (not yet visible)
    fn upload(&mut self, buffer: &PixelBuffer) -> Result<(), RasterError>;

    /// Make the last upload visible
    fn flip(&mut self);

    /// Drain pending input; true once the user asked to stop
    fn poll_quit(&mut self) -> bool;

    fn upload_and_present(&mut self, buffer: &PixelBuffer) -> Result<(), RasterError> {
        self.upload(buffer)?;
        self.flip();
        Ok(())
    }
}
