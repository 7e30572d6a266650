//! Minimal real-time software rasterizer
//!
//! A [`display::PixelBuffer`] is filled on the CPU with dot grids, lines and
//! triangle outlines, then handed to a [`display::DisplayBackend`] once per
//! frame by the [`pipeline::FramePipeline`].

pub mod color;
pub mod display;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod util;

pub use color::Color;
pub use error::RasterError;
pub use geometry::{Line, Point, Triangle};
