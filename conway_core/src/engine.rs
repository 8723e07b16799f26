// engine.rs - Generation stepping for the toroidal grid
//
// `step` is the plain full-grid scan. `step_rows_concurrent` spawns one
// tokio task per row that yields between cells, then stitches the rows back
// together; both produce identical results.

use std::sync::Arc;

use crate::grid::Grid;

/// Conway's rule (B3/S23).
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Compute the generation after `current` into `next`.
///
/// Reads only `current`; every cell of `next` is overwritten.
pub fn step(current: &Grid, next: &mut Grid) {
    assert!(
        current.same_shape(next),
        "generation buffers differ in shape: {}x{} vs {}x{}",
        current.rows(),
        current.cols(),
        next.rows(),
        next.cols()
    );
    for row in 0..current.rows() {
        let out = next.row_mut(row);
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = next_state(current.get(row, col), current.neighbor_count(row, col));
        }
    }
}

/// Row task: computes one row of the next generation from a shared snapshot.
async fn process_row(row_index: usize, current: Arc<Grid>) -> (usize, Vec<bool>) {
    let mut row_result = Vec::with_capacity(current.cols());
    for col in 0..current.cols() {
        let count = current.neighbor_count(row_index, col);
        row_result.push(next_state(current.get(row_index, col), count));

        tokio::task::yield_now().await;
    }
    (row_index, row_result)
}

/// Same result as [`step`], computed with one cooperative task per row.
///
/// Tasks only read the shared `current` and return owned rows, so nothing
/// writes to `next` until every row has been collected.
pub async fn step_rows_concurrent(current: Arc<Grid>, next: &mut Grid) {
    assert!(current.same_shape(next), "generation buffers differ in shape");

    let handles: Vec<_> = (0..current.rows())
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&current))))
        .collect();

    for handle in handles {
        match handle.await {
            Ok((row_index, completed_row)) => {
                next.row_mut(row_index).copy_from_slice(&completed_row);
            }
            // A row task can only fail by panicking on a broken invariant.
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

/// Current/next buffer pair. After each step the buffers swap, so the
/// visible grid is always a complete generation.
#[derive(Debug, Clone)]
pub struct Generations {
    current: Grid,
    next: Grid,
}

impl Generations {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { current: Grid::new(rows, cols), next: Grid::new(rows, cols) }
    }

    pub fn from_grid(grid: Grid) -> Self {
        let next = Grid::new(grid.rows(), grid.cols());
        Self { current: grid, next }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    /// Advance one generation and return the new live count.
    pub fn advance(&mut self) -> usize {
        step(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.current.live_count()
    }

    /// Concurrent counterpart of [`Generations::advance`].
    pub async fn advance_concurrent(&mut self) -> usize {
        let snapshot = Arc::new(self.current.clone());
        step_rows_concurrent(snapshot, &mut self.next).await;
        std::mem::swap(&mut self.current, &mut self.next);
        self.current.live_count()
    }
}
