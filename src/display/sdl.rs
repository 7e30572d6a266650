use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::{Color as SdlColor, PixelFormatEnum};
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::{DisplayBackend, PixelBuffer};
use crate::error::RasterError;

/// Backdrop drawn under the texture before each copy
const BACKDROP: SdlColor = SdlColor::RGBA(20, 60, 120, 255);

#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    /// `None` opens a fullscreen-desktop window at the current display mode
    pub size: Option<(u32, u32)>,
    pub vsync: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "linecaster".to_string(),
            size: None,
            vsync: true,
        }
    }
}

/// SDL window, renderer and event pump
pub struct SdlDisplay {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    output_width: u32,
    output_height: u32,
}

/// Streaming ARGB8888 texture bound to an `SdlDisplay`
pub struct SdlSurface<'a> {
    display: SdlDisplay,
    texture: Texture<'a>,
}

impl SdlDisplay {
    /// Open the window and renderer; any SDL failure aborts
    ///
    /// The texture creator is returned separately so the streaming texture
    /// can borrow it for the lifetime of the surface.
    pub fn create_surface(
        options: &WindowOptions,
    ) -> Result<(Self, TextureCreator<WindowContext>), RasterError> {
        let sdl_context = sdl2::init().map_err(RasterError::backend)?;
        let video_subsystem = sdl_context.video().map_err(RasterError::backend)?;

        let window = match options.size {
            Some((width, height)) => video_subsystem
                .window(&options.title, width, height)
                .position_centered()
                .allow_highdpi()
                .build(),
            None => {
                let mode = video_subsystem
                    .current_display_mode(0)
                    .map_err(RasterError::backend)?;
                debug!("Desktop display mode {}x{}@{}", mode.w, mode.h, mode.refresh_rate);
                video_subsystem
                    .window(&options.title, mode.w.max(1) as u32, mode.h.max(1) as u32)
                    .position_centered()
                    .allow_highdpi()
                    .fullscreen_desktop()
                    .build()
            },
        }
        .map_err(|e| RasterError::backend(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if options.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| RasterError::backend(e.to_string()))?;

        // High-DPI renderers can report more pixels than the window size
        let (output_width, output_height) = canvas.output_size().map_err(RasterError::backend)?;
        info!("Renderer output size: {}x{}", output_width, output_height);

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(RasterError::backend)?;

        Ok((
            Self {
                canvas,
                event_pump,
                output_width,
                output_height,
            },
            texture_creator,
        ))
    }

    pub fn output_size(&self) -> (u32, u32) {
        (self.output_width, self.output_height)
    }
}

impl<'a> SdlSurface<'a> {
    pub fn new(
        display: SdlDisplay,
        texture_creator: &'a TextureCreator<WindowContext>,
    ) -> Result<Self, RasterError> {
        let (width, height) = display.output_size();
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| RasterError::backend(e.to_string()))?;
        Ok(Self { display, texture })
    }
}

impl DisplayBackend for SdlSurface<'_> {
    fn output_size(&self) -> (u32, u32) {
        self.display.output_size()
    }

    fn upload(&mut self, buffer: &PixelBuffer) -> Result<(), RasterError> {
        self.texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| RasterError::backend(e.to_string()))?;

        let canvas = &mut self.display.canvas;
        canvas.set_draw_color(BACKDROP);
        canvas.clear();
        canvas
            .copy(&self.texture, None, None)
            .map_err(RasterError::backend)
    }

    fn flip(&mut self) {
        self.display.canvas.present();
    }

    fn poll_quit(&mut self) -> bool {
        // Drain the whole queue so stale events don't pile up between frames
        let mut quit = false;
        for event in self.display.event_pump.poll_iter() {
            if is_quit_request(&event) {
                debug!("Quit requested: {:?}", event);
                quit = true;
            }
        }
        quit
    }
}

/// Window close or Escape
fn is_quit_request(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            }
    )
}
