use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("grid spacing must be greater than zero")]
    ZeroGridSpacing,
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    EmptyBuffer { width: u32, height: u32 },
    #[error("display backend: {0}")]
    Backend(String),
    #[error("failed to read scene {}: {source}", path.display())]
    SceneRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid scene: {0}")]
    SceneParse(#[from] serde_json::Error),
    #[error("invalid color {0:?}, expected #RRGGBB, #AARRGGBB or 0xAARRGGBB")]
    InvalidColor(String),
    #[error("{0}")]
    Usage(String),
}

impl RasterError {
    /// Wraps the `String` errors returned throughout the sdl2 crate
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
