//! CPU-side color buffer the rasterizer plots into
//!
//! One packed ARGB8888 word per pixel, row-major, with a bounds policy that
//! decides what happens to writes outside the buffer.

use log::trace;

use crate::color::Color;
use crate::error::RasterError;

// ============================================================================
// Bounds Policy
// ============================================================================

/// What `PixelBuffer::set` does with a coordinate outside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Reject the write with `RasterError::OutOfBounds`
    Strict,
    /// Drop the write silently
    Clip,
}

impl Default for BoundsPolicy {
    /// Strict in debug builds, clipping in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Clip
        }
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// ARGB8888 color buffer, one packed `Color` per pixel, row-major
///
/// Dimensions are fixed for the buffer's lifetime.
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
    policy: BoundsPolicy,
}

impl PixelBuffer {
    /// Create a buffer cleared to transparent black
    pub fn with_size(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyBuffer { width, height });
        }
        Ok(Self {
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
            width,
            height,
            policy: BoundsPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Linear index `y * width + x`, `None` when out of bounds
    #[inline]
    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Overwrite every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Plot a single pixel
    ///
    /// Out-of-range coordinates are handled according to the buffer's
    /// `BoundsPolicy`.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> Result<(), RasterError> {
        match self.pixel_index(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                Ok(())
            },
            None => match self.policy {
                BoundsPolicy::Strict => Err(RasterError::OutOfBounds {
                    x,
                    y,
                    width: self.width,
                    height: self.height,
                }),
                BoundsPolicy::Clip => {
                    trace!("clipped pixel ({}, {})", x, y);
                    Ok(())
                },
            },
        }
    }

    /// Read a pixel, `None` if out of bounds
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.pixel_index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of pixels currently holding exactly `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Raw bytes for texture upload (native-endian ARGB8888, pitch `width * 4`)
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: Color is repr(transparent) over u32, so the Vec holds
        // `len * 4` initialized bytes and u8 has no alignment requirement.
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr().cast::<u8>(),
                self.pixels.len() * std::mem::size_of::<Color>(),
            )
        }
    }

    /// Bytes per row as expected by the backend
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * std::mem::size_of::<Color>()
    }
}
