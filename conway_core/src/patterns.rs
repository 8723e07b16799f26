// patterns.rs - Named seed patterns stamped onto the torus

use crate::grid::{CellCoord, Grid};

/// A named seed, given as live-cell offsets from its own top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (2, 12), (2, 13), (3, 11), (3, 15), (4, 10), (4, 16), (5, 10), (5, 14),
            (5, 16), (5, 17), (6, 10), (6, 16), (7, 11), (7, 15), (8, 12), (8, 13),
            (0, 24), (1, 22), (1, 24), (2, 20), (2, 21), (3, 20), (3, 21), (4, 20),
            (4, 21), (5, 22), (5, 24), (6, 24),
            (2, 34), (2, 35), (3, 34), (3, 35),
        ],
    },
];

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// (height, width) of the pattern's bounding box.
    pub fn bounds(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Top-left position that centres the pattern on `grid`.
    pub fn centered_origin(&self, grid: &Grid) -> CellCoord {
        let (height, width) = self.bounds();
        CellCoord::wrapped(
            (grid.rows() as isize - height as isize) / 2,
            (grid.cols() as isize - width as isize) / 2,
            grid.rows(),
            grid.cols(),
        )
    }

    /// Set the pattern's cells alive with its corner at `origin`. Cells past
    /// the grid's edge wrap around. Other cells are left as they are.
    pub fn stamp(&self, grid: &mut Grid, origin: CellCoord) {
        for &(row, col) in self.cells {
            grid.set((origin.row + row) % grid.rows(), (origin.col + col) % grid.cols(), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Generations;

    #[test]
    fn bounds_of_known_patterns() {
        assert_eq!(find("glider").map(Pattern::bounds), Some((3, 3)));
        assert_eq!(find("Pulsar").map(Pattern::bounds), Some((13, 13)));
        assert_eq!(find("gosper glider gun").map(Pattern::bounds), Some((9, 36)));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn stamp_wraps_past_edges() {
        let mut grid = Grid::new(4, 4);
        find("Blinker").unwrap().stamp(&mut grid, CellCoord::new(3, 2));
        assert!(grid.get(3, 2) && grid.get(3, 3) && grid.get(3, 0));
        assert_eq!(grid.live_count(), 3);
    }

    #[test]
    fn centred_origin_is_in_range_on_small_grids() {
        let grid = Grid::new(5, 5);
        let origin = find("Gosper Glider Gun").unwrap().centered_origin(&grid);
        assert!(origin.row < 5 && origin.col < 5);
    }

    #[test]
    fn pulsar_has_period_three() {
        let mut grid = Grid::new(20, 20);
        let pulsar = find("Pulsar").unwrap();
        let origin = pulsar.centered_origin(&grid);
        pulsar.stamp(&mut grid, origin);
        let start = grid.clone();
        let mut gens = Generations::from_grid(grid);
        gens.advance();
        assert_ne!(gens.current(), &start);
        gens.advance();
        gens.advance();
        assert_eq!(gens.current(), &start);
    }

    #[test]
    fn cell_lists_have_no_duplicates() {
        for pattern in PATTERNS {
            let mut seen = std::collections::HashSet::new();
            for cell in pattern.cells {
                assert!(seen.insert(cell), "{} repeats {:?}", pattern.name, cell);
            }
        }
    }
}
