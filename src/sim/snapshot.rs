//! Read-only view of a session for presentation
//!
//! Renderers and HUDs read a [`Snapshot`] and never touch the session itself.

use glam::{Vec2, Vec4};
use serde::Serialize;

use super::geometry::Rect;
use super::state::{GamePhase, GameSession};

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaddleView {
    /// Visual bar
    pub bar: Rect,
    /// Collision rect
    pub hit: Rect,
    /// Hit flash intensity (0-1)
    pub flash: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub column: usize,
    pub row: usize,
    pub alive: bool,
    /// RGBA for the current phase
    pub color: Vec4,
    pub anim_phase: f32,
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub banner: Option<&'static str>,
    pub ball: BallView,
    pub paddle: PaddleView,
    pub cells: Vec<CellView>,
    /// Frame edge flashes in top, right, bottom, left order
    pub edge_flash: [f32; 4],
    pub time_ticks: u64,
}

impl Snapshot {
    pub fn capture(session: &GameSession) -> Self {
        let phase = session.current_phase();
        let cells = session
            .grid
            .cells()
            .iter()
            .map(|cell| CellView {
                column: cell.column,
                row: cell.row,
                alive: !cell.broken,
                color: session.grid.display_color(cell, phase),
                anim_phase: cell.anim_phase,
            })
            .collect();

        Self {
            phase,
            banner: phase.banner(),
            ball: BallView {
                position: session.ball.position,
                radius: session.ball.radius,
            },
            paddle: PaddleView {
                bar: session.paddle.bar_rect(),
                hit: session.paddle.hit_rect(),
                flash: session.paddle.flash,
            },
            cells,
            edge_flash: session.edge_flash,
            time_ticks: session.time_ticks,
        }
    }

    pub fn alive_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }
}
