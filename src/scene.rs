//! Frame content: background, dot grid and an ordered list of shapes

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RasterError;
use crate::geometry::{Line, Point, Triangle};

/// Something the composer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Point { at: Point, color: Color },
    Line(Line),
    Triangle(Triangle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub color: Color,
    pub spacing: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub background: Color,
    #[serde(default)]
    pub grid: Option<Grid>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// White background, black dot grid every 50px and two black triangles
    pub fn demo() -> Self {
        Self {
            background: Color::WHITE,
            grid: Some(Grid {
                color: Color::BLACK,
                spacing: 50,
            }),
            shapes: vec![
                Shape::Triangle(Triangle::new(
                    Point::new(0, 0),
                    Point::new(0, 100),
                    Point::new(200, 100),
                    Color::BLACK,
                )),
                Shape::Triangle(Triangle::new(
                    Point::new(100, 600),
                    Point::new(200, 300),
                    Point::new(900, 200),
                    Color::BLACK,
                )),
            ],
        }
    }

    /// Reject content that can never render
    pub fn validate(&self) -> Result<(), RasterError> {
        match self.grid {
            Some(Grid { spacing: 0, .. }) => Err(RasterError::ZeroGridSpacing),
            _ => Ok(()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RasterError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RasterError::SceneRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo()
    }
}
