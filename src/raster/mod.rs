//! CPU-side rasterization: lines, dot grids and triangle outlines

pub mod line;
pub mod shapes;

pub use line::draw_line;
pub use shapes::{draw_grid, draw_shape, draw_triangle};
