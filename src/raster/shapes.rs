//! Higher-level primitives built from pixels and lines

use crate::color::Color;
use crate::display::PixelBuffer;
use crate::error::RasterError;
use crate::geometry::{Line, Triangle};
use crate::raster::line::draw_line;
use crate::scene::Shape;

/// Dot grid: one pixel at every `(k * spacing, j * spacing)` inside the buffer
///
/// Zero spacing is rejected before anything is drawn.
pub fn draw_grid(buffer: &mut PixelBuffer, color: Color, spacing: u32) -> Result<(), RasterError> {
    if spacing == 0 {
        return Err(RasterError::ZeroGridSpacing);
    }
    let step = spacing as usize;
    for y in (0..buffer.height()).step_by(step) {
        for x in (0..buffer.width()).step_by(step) {
            buffer.set(x as i32, y as i32, color)?;
        }
    }
    Ok(())
}

/// Triangle outline, edges drawn a→b, b→c, c→a
pub fn draw_triangle(buffer: &mut PixelBuffer, triangle: &Triangle) -> Result<(), RasterError> {
    for edge in triangle.edges() {
        draw_line(buffer, edge.from, edge.to, edge.color)?;
    }
    Ok(())
}

pub fn draw_shape(buffer: &mut PixelBuffer, shape: &Shape) -> Result<(), RasterError> {
    match shape {
        Shape::Point { at, color } => buffer.set(at.x, at.y, *color),
        Shape::Line(Line { from, to, color }) => draw_line(buffer, *from, *to, *color),
        Shape::Triangle(triangle) => draw_triangle(buffer, triangle),
    }
}
