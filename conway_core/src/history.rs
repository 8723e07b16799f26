// history.rs - Recent-generation hashes for spotting repeats

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

pub const HISTORY_LEN: usize = 10;

/// Ring of recent grid hashes. Catches still lifes and oscillators with a
/// period up to `HISTORY_LEN`.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash_grid(grid: &Grid) -> u64 {
        let mut hasher = DefaultHasher::new();
        grid.hash(&mut hasher);
        hasher.finish()
    }

    /// Record `grid`; returns true if the same grid was seen within the
    /// last `HISTORY_LEN` records.
    pub fn check_for_cycle(&mut self, grid: &Grid) -> bool {
        let current_hash = Self::hash_grid(grid);
        let filled = self.history_count.min(HISTORY_LEN);
        if self.grid_history[..filled].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    pub fn reset(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Generations;

    #[test]
    fn blinker_is_caught_on_third_generation() {
        let mut gens = Generations::from_grid(Grid::with_live_cells(5, 5, &[(1, 0), (1, 1), (1, 2)]));
        let mut detector = CycleDetector::new();
        assert!(!detector.check_for_cycle(gens.current()));
        gens.advance();
        assert!(!detector.check_for_cycle(gens.current()));
        gens.advance();
        assert!(detector.check_for_cycle(gens.current()));
    }

    #[test]
    fn reset_forgets_history() {
        let grid = Grid::with_live_cells(4, 4, &[(1, 1)]);
        let mut detector = CycleDetector::new();
        detector.check_for_cycle(&grid);
        detector.reset();
        assert!(!detector.check_for_cycle(&grid));
    }

    #[test]
    fn empty_slots_are_not_matches() {
        // Unfilled slots hold zero and must never count as a sighting.
        let mut detector = CycleDetector::new();
        assert!(!detector.check_for_cycle(&Grid::new(2, 2)));
    }
}
