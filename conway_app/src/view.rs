// view.rs - Board mirror the egui painter draws from
//
// Built only from session notifications; the painter never reads the
// session's grid directly.

use conway_core::{CellChange, Grid, Renderer};

#[derive(Debug, Clone)]
pub struct BoardView {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    live_count: usize,
}

impl BoardView {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![false; rows * cols], live_count: 0 }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn population(&self) -> f32 {
        self.live_count as f32 / self.cells.len() as f32
    }
}

impl Renderer for BoardView {
    fn on_cells_changed(&mut self, cells: &[CellChange]) {
        for change in cells {
            let idx = change.coord.row * self.cols + change.coord.col;
            match (self.cells[idx], change.alive) {
                (false, true) => self.live_count += 1,
                (true, false) => self.live_count -= 1,
                _ => {}
            }
            self.cells[idx] = change.alive;
        }
    }

    fn on_generation_computed(&mut self, grid: &Grid, live_count: usize) {
        debug_assert_eq!((grid.rows(), grid.cols()), (self.rows, self.cols));
        for row in 0..self.rows {
            let start = row * self.cols;
            self.cells[start..start + self.cols].copy_from_slice(grid.row(row));
        }
        self.live_count = live_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway_core::CellCoord;

    #[test]
    fn mirrors_full_updates() {
        let grid = Grid::with_live_cells(3, 4, &[(0, 3), (2, 1)]);
        let mut view = BoardView::new(3, 4);
        view.on_generation_computed(&grid, grid.live_count());
        assert!(view.is_alive(0, 3));
        assert!(view.is_alive(2, 1));
        assert_eq!(view.live_count(), 2);
    }

    #[test]
    fn incremental_updates_track_population() {
        let mut view = BoardView::new(2, 2);
        let set = |row, col, alive| CellChange { coord: CellCoord::new(row, col), alive };
        view.on_cells_changed(&[set(0, 0, true)]);
        view.on_cells_changed(&[set(0, 0, true)]);
        view.on_cells_changed(&[set(1, 1, true)]);
        assert_eq!(view.live_count(), 2);
        view.on_cells_changed(&[set(0, 0, false)]);
        assert_eq!(view.live_count(), 1);
        assert_eq!(view.population(), 0.25);
    }
}
