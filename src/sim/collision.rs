//! Collision detection and response
//!
//! Each tick the ball's motion is the segment from its previous position to
//! its naive next position. That segment is resolved against the paddle,
//! then the block grid, then the playfield frame. Every stage is a pure
//! function: it takes the current position and direction and returns a
//! [`Resolution`] with the corrected values and the events it produced.

use glam::Vec2;

use super::blocks::{BlockGrid, GRID_SIZE};
use super::events::{FrameEdge, GameEvent};
use super::geometry::Rect;
use super::intersect::classify_rect_intersection;
use super::layout::Layout;
use crate::tuning::Tuning;
use crate::{LAUNCH_AXIS, rotate_degrees, signed_angle};

/// Result of one collision stage
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Ball position after the stage
    pub position: Vec2,
    /// Ball direction after the stage
    pub direction: Vec2,
    /// Events raised by the stage, in order
    pub events: Vec<GameEvent>,
    /// Cell the ball broke, if any (column, row)
    pub broken_cell: Option<(usize, usize)>,
    /// Ball left through the bottom of the playfield
    pub ball_lost: bool,
}

impl Resolution {
    /// No collision: position and direction pass through unchanged
    pub fn pass(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
            events: Vec::new(),
            broken_cell: None,
            ball_lost: false,
        }
    }

    /// Whether the stage changed anything
    pub fn hit(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Reflect the ball off the paddle's top surface
///
/// The reflect line sits one radius above the paddle hit rect. The ball
/// bounces if either endpoint is inside the hit rect, or if the segment
/// crosses the reflect line downward within the paddle's horizontal span.
pub fn reflect_paddle(
    pre_pos: Vec2,
    next_pos: Vec2,
    radius: f32,
    direction: Vec2,
    paddle_rect: Rect,
    paddle_velocity: f32,
    tuning: &Tuning,
) -> Resolution {
    if pre_pos == next_pos {
        return Resolution::pass(next_pos, direction);
    }

    let reflect_y = paddle_rect.y_min() - radius;

    if !paddle_rect.contains(pre_pos) && !paddle_rect.contains(next_pos) {
        if !(pre_pos.y < reflect_y && next_pos.y >= reflect_y) {
            return Resolution::pass(next_pos, direction);
        }

        // vec.y > 0 here, the crossing test above rules out a flat segment
        let vec = next_pos - pre_pos;
        let crossing = pre_pos + vec * ((reflect_y - pre_pos.y) / vec.y);
        if crossing.x < paddle_rect.x_min() || crossing.x > paddle_rect.x_max() {
            return Resolution::pass(next_pos, direction);
        }
    }

    let position = Vec2::new(next_pos.x, reflect_y * 2.0 - next_pos.y);
    let bounced = Vec2::new(direction.x, -direction.y);
    let direction = apply_spin(bounced, paddle_velocity, tuning);

    log::debug!(
        "Paddle hit at x={:.1}, velocity {:.2}, new direction ({:.3}, {:.3})",
        position.x,
        paddle_velocity,
        direction.x,
        direction.y
    );

    Resolution {
        position,
        direction,
        events: vec![GameEvent::PaddleHit],
        broken_cell: None,
        ball_lost: false,
    }
}

/// Rotate a post-bounce direction by the paddle's english
///
/// The rotation is `-velocity * spin` degrees. If the result points more
/// than the max deflection away from the launch axis it is pinned to exactly
/// the max deflection on the same side.
pub fn apply_spin(direction: Vec2, paddle_velocity: f32, tuning: &Tuning) -> Vec2 {
    if direction == Vec2::ZERO {
        return direction;
    }

    let spun = rotate_degrees(direction, -paddle_velocity * tuning.spin_degrees_per_px);
    let angle = signed_angle(LAUNCH_AXIS, spun).to_degrees();

    if angle.abs() > tuning.max_deflection_degrees {
        rotate_degrees(LAUNCH_AXIS, tuning.max_deflection_degrees * angle.signum())
    } else {
        spun
    }
}

/// Reflect the ball off the first block its path crosses
///
/// Cells are scanned row by row, left to right, and only the first hit
/// counts, so at most one block breaks per tick. On a hit the ball stays at
/// `pre_pos` for this tick and leaves along the reflected direction next
/// tick.
pub fn reflect_blocks(
    pre_pos: Vec2,
    next_pos: Vec2,
    radius: f32,
    direction: Vec2,
    grid: &BlockGrid,
    playfield: Vec2,
    layout: &Layout,
) -> Resolution {
    // A point has no direction to classify against
    if pre_pos == next_pos {
        return Resolution::pass(next_pos, direction);
    }

    let rects = grid.hit_rects(playfield, layout);

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            if !grid.is_alive(column, row) {
                continue;
            }

            let rect = rects[row * GRID_SIZE + column].expand(radius);
            let Some(edge) = classify_rect_intersection(&rect, pre_pos, next_pos) else {
                continue;
            };

            let direction = if edge.is_horizontal() {
                Vec2::new(direction.x, -direction.y)
            } else {
                Vec2::new(-direction.x, direction.y)
            };

            log::debug!("Block ({}, {}) hit on {:?} edge", column, row, edge);

            return Resolution {
                position: pre_pos,
                direction,
                events: vec![GameEvent::BlockBreak { column, row }],
                broken_cell: Some((column, row)),
                ball_lost: false,
            };
        }
    }

    Resolution::pass(next_pos, direction)
}

/// Reflect the ball off the playfield frame
///
/// Left, right and top edges mirror the position about the inset boundary
/// and may all fire in the same tick. The bottom edge is terminal: the ball
/// stops and is reported lost.
pub fn reflect_frame(next_pos: Vec2, radius: f32, direction: Vec2, playfield: Vec2) -> Resolution {
    let mut position = next_pos;
    let mut direction = direction;
    let mut events = Vec::new();
    let mut ball_lost = false;

    if position.x < radius {
        position.x = radius * 2.0 - position.x;
        direction.x = -direction.x;
        events.push(GameEvent::FrameHit(FrameEdge::Left));
    }

    if position.x > playfield.x - radius {
        position.x = (playfield.x - radius) * 2.0 - position.x;
        direction.x = -direction.x;
        events.push(GameEvent::FrameHit(FrameEdge::Right));
    }

    if position.y < radius {
        position.y = radius * 2.0 - position.y;
        direction.y = -direction.y;
        events.push(GameEvent::FrameHit(FrameEdge::Top));
    }

    if position.y > playfield.y - radius {
        position.y = (playfield.y - radius) * 2.0 - position.y;
        direction = Vec2::ZERO;
        ball_lost = true;
        events.push(GameEvent::FrameHit(FrameEdge::Bottom));
        log::debug!("Ball crossed the bottom frame at x={:.1}", position.x);
    }

    Resolution {
        position,
        direction,
        events,
        broken_cell: None,
        ball_lost,
    }
}
