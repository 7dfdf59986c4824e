//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at the top-left of the playfield, +y points down,
//! so `y_min` is the top edge and `y_max` the bottom edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn x_min(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn y_min(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in (top-left, top-right, bottom-left, bottom-right) order
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x_min(), self.y_min()),
            Vec2::new(self.x_max(), self.y_min()),
            Vec2::new(self.x_min(), self.y_max()),
            Vec2::new(self.x_max(), self.y_max()),
        ]
    }

    /// Point containment, inclusive on the min edges and exclusive on the max edges
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x_min()
            && point.x < self.x_max()
            && point.y >= self.y_min()
            && point.y < self.y_max()
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// True for zero-area rectangles (broken cells report these)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
