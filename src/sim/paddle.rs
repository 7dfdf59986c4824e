//! Paddle motion tracking
//!
//! The paddle follows a pointer target along the bottom of the playfield and
//! keeps a short history of its left edge. The average displacement per tick
//! over that history is the "english" the paddle puts on the ball.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Raw target center from input (unclamped)
    pub target_x: f32,
    /// Left edge, inset by the round corner
    pub left: f32,
    /// Right edge, inset by the round corner
    pub right: f32,
    /// Paddle y coordinate supplied by the layout
    pub y: f32,
    pub width: f32,
    pub round_inset: f32,
    /// Hit flash intensity (0-1, decays over time)
    pub flash: f32,
    history: VecDeque<f32>,
    history_len: usize,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl Paddle {
    /// Paddle centered on x = 0 with an empty history
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            target_x: 0.0,
            left: -tuning.paddle_width / 2.0,
            right: tuning.paddle_width / 2.0,
            y: 0.0,
            width: tuning.paddle_width,
            round_inset: tuning.paddle_round_inset,
            flash: 0.0,
            history: VecDeque::new(),
            history_len: tuning.history_len,
        }
    }

    /// Record the pointer target for this tick
    pub fn set_target_center_x(&mut self, x: f32) {
        self.target_x = x;
    }

    /// Move to the clamped target and record the new left edge
    pub fn advance(&mut self, playfield_width: f32, y: f32) {
        let half = self.width / 2.0;
        // Narrow playfields would invert the clamp range; pin to the left bound
        let center = self.target_x.min(playfield_width - half).max(half);

        self.left = center - half + self.round_inset;
        self.right = center + half - self.round_inset;
        self.y = y;

        if self.history.len() >= self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(self.left);
    }

    /// Current center x
    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Mean signed displacement per tick over the recorded history
    ///
    /// Divides by the number of differences (`n - 1`), not the sample count.
    pub fn average_velocity(&self) -> f32 {
        if self.history.len() < 2 {
            return 0.0;
        }
        let total: f32 = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .map(|(prev, next)| next - prev)
            .sum();
        total / (self.history.len() - 1) as f32
    }

    /// Number of samples currently in the history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Collision rectangle, padded beyond the visual bar
    pub fn hit_rect(&self) -> Rect {
        Rect::new(
            self.center_x() - self.width / 2.0 - PADDLE_HIT_PADDING,
            self.y + PADDLE_TOP_OFFSET,
            self.width + PADDLE_HIT_PADDING * 2.0,
            PADDLE_BAR_HEIGHT + PADDLE_HIT_PADDING,
        )
    }

    /// Visual bar rectangle
    pub fn bar_rect(&self) -> Rect {
        Rect::new(
            self.left - self.round_inset,
            self.y,
            self.right - self.left + self.round_inset * 2.0,
            PADDLE_BAR_HEIGHT,
        )
    }

    /// Light up the paddle after a ball hit
    pub fn trigger_flash(&mut self) {
        self.flash = 1.0;
    }

    /// Decay the hit flash
    pub fn decay_flash(&mut self, dt: f32) {
        self.flash = (self.flash - dt / PADDLE_FLASH_DURATION).max(0.0);
    }
}
