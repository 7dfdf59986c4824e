//! Session tuning
//!
//! Geometry and feel constants captured once per session. Loaded from JSON,
//! with missing fields taking their defaults from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven session constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball radius in pixels
    pub ball_radius: f32,
    /// Ball speed in pixels per second
    pub ball_speed: f32,
    /// Paddle width in pixels
    pub paddle_width: f32,
    /// Rounded corner inset of the paddle edges
    pub paddle_round_inset: f32,
    /// Spin applied per pixel/tick of paddle velocity (degrees)
    pub spin_degrees_per_px: f32,
    /// Max deflection from the launch axis after a paddle bounce (degrees)
    pub max_deflection_degrees: f32,
    /// Distance below the paddle hit rect at which the ball is lost
    pub out_of_bounds_margin: f32,
    /// Paddle position samples used for the velocity estimate
    pub history_len: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            paddle_width: PADDLE_WIDTH,
            paddle_round_inset: PADDLE_ROUND_INSET,
            spin_degrees_per_px: SPIN_DEGREES_PER_PX,
            max_deflection_degrees: MAX_DEFLECTION_DEGREES,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
            history_len: PADDLE_HISTORY_LEN,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.ball_radius > 0.0) {
            log::warn!("ball_radius {} out of range, using {}", self.ball_radius, defaults.ball_radius);
            self.ball_radius = defaults.ball_radius;
        }
        if !(self.ball_speed > 0.0) {
            log::warn!("ball_speed {} out of range, using {}", self.ball_speed, defaults.ball_speed);
            self.ball_speed = defaults.ball_speed;
        }
        if !(self.paddle_width > 0.0) {
            log::warn!("paddle_width {} out of range, using {}", self.paddle_width, defaults.paddle_width);
            self.paddle_width = defaults.paddle_width;
        }
        if !(0.0..self.paddle_width / 2.0).contains(&self.paddle_round_inset) {
            log::warn!(
                "paddle_round_inset {} out of range, using {}",
                self.paddle_round_inset,
                defaults.paddle_round_inset
            );
            self.paddle_round_inset = defaults.paddle_round_inset.min(self.paddle_width / 4.0);
        }
        if !(0.0..180.0).contains(&self.max_deflection_degrees) {
            log::warn!(
                "max_deflection_degrees {} out of range, using {}",
                self.max_deflection_degrees,
                defaults.max_deflection_degrees
            );
            self.max_deflection_degrees = defaults.max_deflection_degrees;
        }
        if !self.spin_degrees_per_px.is_finite() {
            log::warn!(
                "spin_degrees_per_px {} out of range, using {}",
                self.spin_degrees_per_px,
                defaults.spin_degrees_per_px
            );
            self.spin_degrees_per_px = defaults.spin_degrees_per_px;
        }
        if !self.out_of_bounds_margin.is_finite() {
            log::warn!(
                "out_of_bounds_margin {} out of range, using {}",
                self.out_of_bounds_margin,
                defaults.out_of_bounds_margin
            );
            self.out_of_bounds_margin = defaults.out_of_bounds_margin;
        }
        if !(2..=MAX_PADDLE_HISTORY_LEN).contains(&self.history_len) {
            log::warn!("history_len {} out of range, using {}", self.history_len, defaults.history_len);
            self.history_len = defaults.history_len;
        }

        self
    }
}
