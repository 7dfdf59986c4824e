//! Playfield layout
//!
//! Supplies the playfield-derived geometry the simulation depends on: the
//! minimum usable size, the paddle's y coordinate and the block area padding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub min_width: f32,
    pub min_height: f32,
    /// Paddle y when the playfield is tall enough
    pub paddle_preferred_y: f32,
    /// Paddle never rises above this y
    pub paddle_min_y: f32,
    /// Space kept below the paddle
    pub bottom_padding: f32,
    /// Block area inset from the top of the playfield
    pub block_padding_top: f32,
    /// Block area inset from each side of the playfield
    pub block_padding_side: f32,
    pub block_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            min_height: 360.0,
            paddle_preferred_y: 400.0,
            paddle_min_y: 200.0,
            bottom_padding: 40.0,
            block_padding_top: 40.0,
            block_padding_side: 40.0,
            block_height: 21.0,
        }
    }
}

impl Layout {
    /// Whether the playfield is large enough to play in
    pub fn is_valid(&self, playfield: Vec2) -> bool {
        playfield.x >= self.min_width && playfield.y >= self.min_height
    }

    /// Paddle y coordinate for a playfield size
    pub fn paddle_y(&self, playfield: Vec2) -> f32 {
        let available = playfield.y - self.bottom_padding;
        if available > self.paddle_preferred_y {
            self.paddle_preferred_y
        } else {
            available.max(self.paddle_min_y)
        }
    }
}
