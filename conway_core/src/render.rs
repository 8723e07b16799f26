// render.rs - Contract between the session and whatever draws the board

use crate::grid::{CellCoord, Grid};

/// One cell written by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub coord: CellCoord,
    pub alive: bool,
}

/// Receives the session's notifications. Grids are handed out as shared
/// borrows, so a renderer can read but never mutate them.
pub trait Renderer {
    /// Incremental update after a single-cell edit (click or drag-paint).
    fn on_cells_changed(&mut self, cells: &[CellChange]);

    /// Whole-board update after a step, randomize, clear or pattern load.
    fn on_generation_computed(&mut self, grid: &Grid, live_count: usize);
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn on_cells_changed(&mut self, cells: &[CellChange]) {
        (**self).on_cells_changed(cells);
    }

    fn on_generation_computed(&mut self, grid: &Grid, live_count: usize) {
        (**self).on_generation_computed(grid, live_count);
    }
}

/// Renderer for sessions with no view attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn on_cells_changed(&mut self, _cells: &[CellChange]) {}
    fn on_generation_computed(&mut self, _grid: &Grid, _live_count: usize) {}
}

/// Keeps every notification it receives. Used by tests and diagnostics.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub cell_batches: Vec<Vec<CellChange>>,
    pub generations: Vec<usize>,
    pub last_grid: Option<Grid>,
}

impl RecordingRenderer {
    pub fn notifications(&self) -> usize {
        self.cell_batches.len() + self.generations.len()
    }
}

impl Renderer for RecordingRenderer {
    fn on_cells_changed(&mut self, cells: &[CellChange]) {
        self.cell_batches.push(cells.to_vec());
    }

    fn on_generation_computed(&mut self, grid: &Grid, live_count: usize) {
        self.generations.push(live_count);
        self.last_grid = Some(grid.clone());
    }
}
