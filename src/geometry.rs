//! Integer primitives in buffer space
//!
//! All of these are transient values: built while composing a frame and
//! dropped once their pixels are plotted.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A pixel coordinate; (0, 0) is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

impl Line {
    pub const fn new(from: Point, to: Point, color: Color) -> Self {
        Self { from, to, color }
    }
}

/// Outline-only triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [Point; 3],
    pub color: Color,
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point, color: Color) -> Self {
        Self {
            points: [a, b, c],
            color,
        }
    }

    /// Edges in drawing order: a→b, b→c, c→a
    pub fn edges(&self) -> [Line; 3] {
        let [a, b, c] = self.points;
        [
            Line::new(a, b, self.color),
            Line::new(b, c, self.color),
            Line::new(c, a, self.color),
        ]
    }
}
