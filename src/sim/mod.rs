//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (row-major grid scans, fixed edge order)
//! - No rendering, audio or platform dependencies

pub mod blocks;
pub mod collision;
pub mod events;
pub mod geometry;
pub mod intersect;
pub mod layout;
pub mod paddle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use blocks::{BLOCK_COLORS, BlockCell, BlockGrid, GRID_SIZE};
pub use collision::{Resolution, apply_spin, reflect_blocks, reflect_frame, reflect_paddle};
pub use events::{EventSink, FrameEdge, GameEvent};
pub use geometry::Rect;
pub use intersect::{RectEdge, classify_rect_intersection, segments_intersect};
pub use layout::Layout;
pub use paddle::Paddle;
pub use snapshot::Snapshot;
pub use state::{Ball, GamePhase, GameSession, PhaseMachine};
pub use tick::{FixedStep, TickInput, tick};
