//! Per-frame orchestration: present, clear, grid, shapes, flip

use log::{debug, warn};

use crate::display::{DisplayBackend, PixelBuffer};
use crate::error::RasterError;
use crate::raster::{draw_grid, draw_shape};
use crate::scene::Scene;
use crate::util::FpsCounter;

/// Frames between timing reports
const STATS_INTERVAL: u64 = 300;

pub struct FramePipeline {
    scene: Scene,
}

impl FramePipeline {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Compose one frame from scratch: background, dot grid, then shapes in order
    ///
    /// Nothing from the previous frame survives the clear.
    pub fn render(&self, buffer: &mut PixelBuffer) -> Result<(), RasterError> {
        buffer.clear(self.scene.background);
        if let Some(grid) = self.scene.grid {
            draw_grid(buffer, grid.color, grid.spacing)?;
        }
        for shape in &self.scene.shapes {
            draw_shape(buffer, shape)?;
        }
        Ok(())
    }

    /// Drive the backend until it reports quit or `max_frames` have been shown
    ///
    /// Each iteration uploads the previous frame, renders the next one and
    /// flips. A frame that fails to render is logged and the loop carries on;
    /// backend failures end the run. Returns the number of loop iterations.
    pub fn run<B: DisplayBackend + ?Sized>(
        &self,
        backend: &mut B,
        buffer: &mut PixelBuffer,
        max_frames: Option<u64>,
    ) -> Result<u64, RasterError> {
        let mut last_error: Option<String> = None;
        let mut fps_counter = FpsCounter::new(60);

        // First frame goes straight to the screen so the loop never shows an
        // unrendered buffer
        self.render_reporting(buffer, &mut last_error);
        backend.upload_and_present(buffer)?;

        let mut frames = 0;
        let mut running = max_frames != Some(0);
        while running {
            if backend.poll_quit() {
                break;
            }
            fps_counter.tick();

            backend.upload(buffer)?;
            self.render_reporting(buffer, &mut last_error);
            backend.flip();

            frames += 1;
            if frames % STATS_INTERVAL == 0 {
                let (min_fps, max_fps) = fps_counter.min_max_fps();
                debug!(
                    "frame {}: {:.1} fps avg, {:.1} min, {:.1} max, {:.2}ms",
                    frames,
                    fps_counter.avg_fps(),
                    min_fps,
                    max_fps,
                    fps_counter.avg_frame_time_ms()
                );
            }
            running = max_frames.map_or(true, |limit| frames < limit);
        }

        debug!("pipeline stopped after {} frames", frames);
        Ok(frames)
    }

    /// Render, warning once per distinct failure instead of every frame
    fn render_reporting(&self, buffer: &mut PixelBuffer, last_error: &mut Option<String>) {
        match self.render(buffer) {
            Ok(()) => *last_error = None,
            Err(e) => {
                let message = e.to_string();
                if last_error.as_deref() != Some(message.as_str()) {
                    warn!("frame incomplete: {}", message);
                    *last_error = Some(message);
                }
            },
        }
    }
}
