// grid.rs - Toroidal cell matrix for Conway's Game of Life

use rand::Rng;
use rand::distributions::Standard;

/// A `(row, col)` position that is already inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Normalize a raw (possibly negative or oversized) position onto the torus.
    pub fn wrapped(row: isize, col: isize, rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            row: row.rem_euclid(rows as isize) as usize,
            col: col.rem_euclid(cols as isize) as usize,
        }
    }
}

/// Rows x cols matrix of binary cells. Neighbours wrap around both axes,
/// so the grid has no edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Empty (all dead) grid. Panics on a zero dimension.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0, "grid needs at least one row");
        assert!(cols > 0, "grid needs at least one column");
        Self { rows, cols, cells: vec![false; rows * cols] }
    }

    /// Grid with the listed cells alive. Coordinates wrap.
    pub fn with_live_cells(rows: usize, cols: usize, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &(row, col) in live {
            grid.set(row % rows, col % cols, true);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = alive;
    }

    /// Live cells among the 8 toroidal neighbours of `(row, col)`.
    ///
    /// On a grid one cell thick the wrapped offsets land back on the cell
    /// itself (or its only neighbour) and are counted again; no offset is
    /// deduplicated.
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        let up = (row + self.rows - 1) % self.rows;
        let down = (row + 1) % self.rows;
        let left = (col + self.cols - 1) % self.cols;
        let right = (col + 1) % self.cols;

        let neighbors = [
            (up, left), (up, col), (up, right), (row, left),
            (down, left), (down, col), (down, right), (row, right),
        ];

        neighbors
            .iter()
            .filter(|&&(nr, nc)| self.cells[nr * self.cols + nc])
            .count() as u8
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Reseed every cell. A cell lives when a uniform draw on `[0, 1)`
    /// exceeds `death_probability`, so 0.8 leaves roughly a fifth alive.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R, death_probability: f64) {
        for cell in self.cells.iter_mut() {
            let draw: f64 = rng.sample(Standard);
            *cell = draw > death_probability;
        }
    }

    /// Positions of all live cells in row-major order.
    pub fn iter_live(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| CellCoord::new(idx / cols, idx % cols))
    }

    pub fn row(&self, row: usize) -> &[bool] {
        assert!(row < self.rows, "row {row} outside grid of {} rows", self.rows);
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [bool] {
        assert!(row < self.rows, "row {row} outside grid of {} rows", self.rows);
        let cols = self.cols;
        &mut self.cells[row * cols..(row + 1) * cols]
    }
}
