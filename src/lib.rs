//! Brick Break - a Breakout-style simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, block grid, game phases)
//! - `tuning`: Data-driven session constants
//!
//! Rendering, audio and input polling live outside this crate. The
//! simulation reports what happened through [`sim::GameEvent`]s and exposes
//! read-only [`sim::Snapshot`]s for presentation.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Pixels per second
    pub const BALL_SPEED: f32 = 300.0;
    /// Off-screen position the ball starts at before the first tick
    pub const BALL_SENTINEL: (f32, f32) = (-100.0, -100.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_ROUND_INSET: f32 = 6.0;
    /// Visual bar height
    pub const PADDLE_BAR_HEIGHT: f32 = 10.0;
    /// Hit rect padding beyond the visual bar
    pub const PADDLE_HIT_PADDING: f32 = 3.0;
    /// Hit rect offset below the paddle y coordinate
    pub const PADDLE_TOP_OFFSET: f32 = 4.0;
    /// Samples kept for the paddle velocity estimate
    pub const PADDLE_HISTORY_LEN: usize = 16;
    /// Longest history a tuning file may ask for
    pub const MAX_PADDLE_HISTORY_LEN: usize = 1024;

    /// Spin: degrees of rotation per pixel/tick of paddle velocity
    pub const SPIN_DEGREES_PER_PX: f32 = 5.0;
    /// Max deflection from the launch axis after a paddle bounce
    pub const MAX_DEFLECTION_DEGREES: f32 = 60.0;
    /// How far below the paddle hit rect the ball counts as lost
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 40.0;

    /// Presentation fade durations (seconds)
    pub const PADDLE_FLASH_DURATION: f32 = 0.2;
    pub const EDGE_FLASH_DURATION: f32 = 0.3;
    pub const BLOCK_BREAK_FADE: f32 = 0.3;
    pub const BLOCK_GAME_OVER_FADE: f32 = 0.05;
    /// Marquee speed of the clear animation (cells per second)
    pub const BLOCK_CLEAR_MARQUEE_SPEED: f32 = 5.0;
}

/// Axis the ball is launched along: straight up the screen (+y points down).
pub const LAUNCH_AXIS: Vec2 = Vec2::NEG_Y;

/// Signed angle in radians from `from` to `to` (counter-clockwise positive)
#[inline]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Rotate `v` by `degrees` (counter-clockwise positive)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
