//! Segment intersection tests
//!
//! Closed orientation tests: touching and collinear segments count as
//! intersecting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Edge of a rectangle crossed by a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl RectEdge {
    /// True for edges that reflect the vertical direction component
    pub fn is_horizontal(self) -> bool {
        matches!(self, RectEdge::Top | RectEdge::Bottom)
    }
}

/// True if segment `a1`-`a2` crosses or touches segment `b1`-`b2`
///
/// Each segment's endpoints must lie on opposite sides of (or on) the
/// other segment's supporting line.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let ta = (b1.x - b2.x) * (a1.y - b1.y) + (b1.y - b2.y) * (b1.x - a1.x);
    let tb = (b1.x - b2.x) * (a2.y - b1.y) + (b1.y - b2.y) * (b1.x - a2.x);
    let tc = (a1.x - a2.x) * (b1.y - a1.y) + (a1.y - a2.y) * (a1.x - b1.x);
    let td = (a1.x - a2.x) * (b2.y - a1.y) + (a1.y - a2.y) * (a1.x - b2.x);

    tc * td <= 0.0 && ta * tb <= 0.0
}

/// First edge of `rect` crossed by segment `a1`-`a2`
///
/// Edges are tested Left, Top, Right, Bottom and the first hit wins. When
/// the segment clips a corner this order decides which axis gets reflected,
/// so changing it changes gameplay.
pub fn classify_rect_intersection(rect: &Rect, a1: Vec2, a2: Vec2) -> Option<RectEdge> {
    let [top_left, top_right, bottom_left, bottom_right] = rect.corners();

    let edges = [
        (RectEdge::Left, top_left, bottom_left),
        (RectEdge::Top, top_left, top_right),
        (RectEdge::Right, bottom_right, top_right),
        (RectEdge::Bottom, bottom_right, bottom_left),
    ];

    edges
        .into_iter()
        .find(|&(_, b1, b2)| segments_intersect(a1, a2, b1, b2))
        .map(|(edge, _, _)| edge)
}
