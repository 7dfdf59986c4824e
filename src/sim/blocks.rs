//! Breakable block grid
//!
//! A square grid with one row and one column per palette color. Cells only
//! ever go from alive to broken; the grid is restored only by [`BlockGrid::reset`].

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::layout::Layout;
use super::state::GamePhase;
use crate::consts::*;

/// Block palette (RGBA). Its length sets the grid size.
pub const BLOCK_COLORS: [Vec4; 8] = [
    Vec4::new(1.0, 0.4, 0.3, 1.0),
    Vec4::new(1.0, 0.7, 0.3, 1.0),
    Vec4::new(1.0, 0.9, 0.3, 1.0),
    Vec4::new(0.5, 0.9, 0.3, 1.0),
    Vec4::new(0.3, 0.9, 0.7, 1.0),
    Vec4::new(0.4, 0.8, 1.0, 1.0),
    Vec4::new(0.6, 0.5, 0.9, 1.0),
    Vec4::new(0.9, 0.5, 0.7, 1.0),
];

/// Cells per side
pub const GRID_SIZE: usize = BLOCK_COLORS.len();

const WHITE: Vec4 = Vec4::ONE;
const TRANSPARENT_WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);

/// A single block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockCell {
    pub column: usize,
    pub row: usize,
    pub color: Vec4,
    pub broken: bool,
    /// Animation progress, presentation only
    pub anim_phase: f32,
}

/// Grid of blocks, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    cells: Vec<BlockCell>,
    /// Phase seen by the last animation update
    last_phase: Option<GamePhase>,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrid {
    /// Fresh grid with every cell alive
    pub fn new() -> Self {
        let cells = (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |column| (column, row)))
            .map(|(column, row)| BlockCell {
                column,
                row,
                color: BLOCK_COLORS[(column + row) % GRID_SIZE],
                broken: false,
                anim_phase: 0.0,
            })
            .collect();

        Self {
            cells,
            last_phase: None,
        }
    }

    /// Restore every cell
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    fn index(column: usize, row: usize) -> Option<usize> {
        (column < GRID_SIZE && row < GRID_SIZE).then_some(row * GRID_SIZE + column)
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[BlockCell] {
        &self.cells
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&BlockCell> {
        Self::index(column, row).map(|i| &self.cells[i])
    }

    /// False for broken or out-of-range cells
    pub fn is_alive(&self, column: usize, row: usize) -> bool {
        self.cell(column, row).is_some_and(|cell| !cell.broken)
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.broken).count()
    }

    pub fn is_all_broken(&self) -> bool {
        self.cells.iter().all(|cell| cell.broken)
    }

    /// Break a cell
    ///
    /// Returns true only for the call that breaks the last alive cell.
    /// Breaking an already broken or out-of-range cell changes nothing.
    pub fn break_cell(&mut self, column: usize, row: usize) -> bool {
        let Some(i) = Self::index(column, row) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.broken {
            return false;
        }

        cell.broken = true;
        cell.anim_phase = 1.0;
        log::debug!("Block ({}, {}) broken, {} left", column, row, self.alive_count());

        self.is_all_broken()
    }

    /// Per-cell hit rectangles, row-major
    ///
    /// Broken cells get [`Rect::ZERO`]; check [`BlockGrid::is_alive`] before
    /// using a rect.
    pub fn hit_rects(&self, playfield: Vec2, layout: &Layout) -> Vec<Rect> {
        let side = layout.block_padding_side;
        let top = layout.block_padding_top;
        let width = (playfield.x - side * 2.0) / GRID_SIZE as f32;
        let height = layout.block_height;

        self.cells
            .iter()
            .map(|cell| {
                if cell.broken {
                    Rect::ZERO
                } else {
                    Rect::new(
                        side + width * cell.column as f32 - 1.0,
                        top + height * cell.row as f32 + 1.0,
                        width,
                        height,
                    )
                }
            })
            .collect()
    }

    /// Advance block animations for the current phase
    pub fn update_animations(&mut self, phase: GamePhase, dt: f32) {
        let entered = self.last_phase != Some(phase);

        for cell in &mut self.cells {
            match phase {
                GamePhase::Clear => {
                    if entered {
                        cell.anim_phase = (cell.column + cell.row) as f32;
                    }
                    cell.anim_phase += dt * BLOCK_CLEAR_MARQUEE_SPEED;
                }
                GamePhase::GameOver => {
                    if entered {
                        cell.anim_phase = 1.0 + cell.row as f32;
                    }
                    if !cell.broken {
                        cell.anim_phase = (cell.anim_phase - dt / BLOCK_GAME_OVER_FADE).max(0.0);
                    }
                }
                _ => {
                    if cell.broken {
                        cell.anim_phase = (cell.anim_phase - dt / BLOCK_BREAK_FADE).max(0.0);
                    }
                }
            }
        }

        self.last_phase = Some(phase);
    }

    /// Display color of a cell for the current phase
    pub fn display_color(&self, cell: &BlockCell, phase: GamePhase) -> Vec4 {
        match phase {
            GamePhase::Clear => {
                if (cell.anim_phase as u32).is_multiple_of(3) {
                    cell.color
                } else {
                    TRANSPARENT_WHITE
                }
            }
            GamePhase::GameOver => {
                if cell.broken {
                    Vec4::ZERO
                } else {
                    WHITE.lerp(cell.color, cell.anim_phase.min(1.0))
                }
            }
            _ => {
                if cell.broken {
                    TRANSPARENT_WHITE.lerp(WHITE, cell.anim_phase)
                } else {
                    cell.color
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playfield() -> Vec2 {
        Vec2::new(400.0, 600.0)
    }

    fn assert_color(actual: Vec4, expected: Vec4) {
        assert!(actual.abs_diff_eq(expected, 1e-5), "{actual} != {expected}");
    }

    #[test]
    fn test_new_grid_is_alive() {
        let grid = BlockGrid::new();
        assert_eq!(grid.cells().len(), GRID_SIZE * GRID_SIZE);
        assert_eq!(grid.alive_count(), 64);
        assert!(grid.is_alive(7, 7));
        assert!(!grid.is_alive(8, 0));
    }

    #[test]
    fn test_break_is_idempotent() {
        let mut grid = BlockGrid::new();
        assert!(!grid.break_cell(3, 4));
        assert!(!grid.is_alive(3, 4));
        assert!(!grid.break_cell(3, 4));
        assert_eq!(grid.alive_count(), 63);
    }

    #[test]
    fn test_last_break_reports_clear_once() {
        let mut grid = BlockGrid::new();
        let mut clears = 0;
        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                if grid.break_cell(column, row) {
                    clears += 1;
                    assert_eq!((column, row), (7, 7));
                }
            }
        }
        assert_eq!(clears, 1);
        assert!(grid.is_all_broken());
        assert!(!grid.break_cell(0, 0));
    }

    #[test]
    fn test_hit_rect_layout() {
        let grid = BlockGrid::new();
        let rects = grid.hit_rects(playfield(), &Layout::default());
        // (400 - 80) / 8 = 40 wide
        assert_eq!(rects[0], Rect::new(39.0, 41.0, 40.0, 21.0));
        assert_eq!(rects[GRID_SIZE + 2], Rect::new(119.0, 62.0, 40.0, 21.0));
    }

    #[test]
    fn test_broken_cell_rect_is_empty() {
        let mut grid = BlockGrid::new();
        grid.break_cell(1, 0);
        let rects = grid.hit_rects(playfield(), &Layout::default());
        assert!(rects[1].is_empty());
        assert!(!rects[0].is_empty());
    }

    #[test]
    fn test_broken_cell_fades_out() {
        let mut grid = BlockGrid::new();
        grid.break_cell(0, 0);
        grid.update_animations(GamePhase::Playing, 0.15);
        let cell = grid.cell(0, 0).unwrap();
        assert!((cell.anim_phase - 0.5).abs() < 1e-4);
        grid.update_animations(GamePhase::Playing, 1.0);
        let cell = grid.cell(0, 0).unwrap();
        assert_color(grid.display_color(cell, GamePhase::Playing), TRANSPARENT_WHITE);
    }

    #[test]
    fn test_clear_marquee_starts_on_diagonal() {
        let mut grid = BlockGrid::new();
        grid.update_animations(GamePhase::Playing, 0.0);
        grid.update_animations(GamePhase::Clear, 0.0);
        let origin = grid.cell(0, 0).unwrap();
        assert_eq!(grid.display_color(origin, GamePhase::Clear), origin.color);
        let next = grid.cell(1, 0).unwrap();
        assert_eq!(grid.display_color(next, GamePhase::Clear), TRANSPARENT_WHITE);
    }

    #[test]
    fn test_game_over_hides_broken_cells() {
        let mut grid = BlockGrid::new();
        grid.break_cell(2, 2);
        grid.update_animations(GamePhase::GameOver, 0.0);
        let broken = grid.cell(2, 2).unwrap();
        assert_eq!(grid.display_color(broken, GamePhase::GameOver), Vec4::ZERO);
        let alive = grid.cell(0, 0).unwrap();
        assert_color(grid.display_color(alive, GamePhase::GameOver), alive.color);

        // Alive cells wash out to white, top row first
        grid.update_animations(GamePhase::GameOver, 0.05);
        let top = grid.cell(0, 0).unwrap();
        assert_color(grid.display_color(top, GamePhase::GameOver), WHITE);
        let bottom = grid.cell(0, 7).unwrap();
        assert_color(grid.display_color(bottom, GamePhase::GameOver), bottom.color);
    }

    proptest! {
        #[test]
        fn prop_broken_cells_stay_broken(
            hits in proptest::collection::vec((0usize..GRID_SIZE, 0usize..GRID_SIZE), 1..200)
        ) {
            let mut grid = BlockGrid::new();
            let mut broken = std::collections::HashSet::new();
            for (column, row) in hits {
                grid.break_cell(column, row);
                broken.insert((column, row));
                for &(c, r) in &broken {
                    prop_assert!(!grid.is_alive(c, r));
                }
                prop_assert_eq!(grid.alive_count(), GRID_SIZE * GRID_SIZE - broken.len());
            }
        }
    }
}
