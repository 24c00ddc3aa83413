//! Geometry primitives and pure box utilities.
//!
//! Coordinates are image pixels with the origin at the top-left corner and
//! y growing downward, matching what OCR services report.

use serde::{Deserialize, Serialize};

/// A point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    #[serde(default)]
    pub x: f32,
    /// Vertical position (grows downward)
    #[serde(default)]
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral bounding box of a recognized word or glyph.
///
/// Vertex order is top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The four corners
    pub vertices: [Point; 4],
}

impl BoundingBox {
    /// Create a bounding box from its four corners.
    pub const fn new(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Self {
        Self {
            vertices: [top_left, top_right, bottom_right, bottom_left],
        }
    }

    /// Create an axis-aligned box from origin and size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        )
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Point {
        self.vertices[0]
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Point {
        self.vertices[1]
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.vertices[2]
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        self.vertices[3]
    }

    /// Width of the box, see [`width_height`].
    pub fn width(&self) -> f32 {
        width_height(self).0
    }

    /// Height of the box, see [`width_height`].
    pub fn height(&self) -> f32 {
        width_height(self).1
    }

    /// Check whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// Axis-aligned rectangle used for paragraph extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub top_left: Point,
    /// Bottom-right corner
    pub bottom_right: Point,
}

impl Rect {
    /// Create a rectangle from its corners.
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        (self.bottom_right.x - self.top_left.x).abs()
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        (self.bottom_right.y - self.top_left.y).abs()
    }
}

/// Width and height of a quadrilateral box.
///
/// Width is measured along the top edge, height along the right edge, so a
/// slightly skewed box still yields sensible glyph metrics.
pub fn width_height(bounding_box: &BoundingBox) -> (f32, f32) {
    let [top_left, top_right, bottom_right, _] = bounding_box.vertices;
    let width = (top_right.x - top_left.x).abs();
    let height = (bottom_right.y - top_right.y).abs();
    (width, height)
}

/// Check whether `value` lies in the closed interval `[low, high]`.
pub fn within(value: f32, low: f32, high: f32) -> bool {
    low <= value && value <= high
}

/// Check whether `value` lies within `tolerance` of `center`.
pub fn within_tolerance(value: f32, center: f32, tolerance: f32) -> bool {
    within(value, center - tolerance, center + tolerance)
}
