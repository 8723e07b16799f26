use conway_core::engine::{Generations, step};
use conway_core::Grid;

fn advance(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.rows(), grid.cols());
    step(grid, &mut next);
    next
}

#[test]
fn test_block_is_still_life() {
    let block = Grid::with_live_cells(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
    assert_eq!(advance(&block), block);
}

#[test]
fn test_blinker_has_period_two() {
    let horizontal = Grid::with_live_cells(5, 5, &[(1, 0), (1, 1), (1, 2)]);
    let vertical = Grid::with_live_cells(5, 5, &[(0, 1), (1, 1), (2, 1)]);

    let gen1 = advance(&horizontal);
    assert_eq!(gen1, vertical);
    let gen2 = advance(&gen1);
    assert_eq!(gen2, horizontal);
}

#[test]
fn test_toroidal_neighbor_at_corner() {
    let grid = Grid::with_live_cells(3, 3, &[(0, 0)]);
    assert_eq!(grid.neighbor_count(2, 2), 1);
}

#[test]
fn test_blinker_across_seam() {
    // Horizontal blinker straddling the left/right seam.
    let horizontal = Grid::with_live_cells(5, 5, &[(2, 4), (2, 0), (2, 1)]);
    let vertical = Grid::with_live_cells(5, 5, &[(1, 0), (2, 0), (3, 0)]);
    assert_eq!(advance(&horizontal), vertical);
}

#[test]
fn test_generations_swap_keeps_full_state() {
    let mut gens = Generations::from_grid(Grid::with_live_cells(5, 5, &[(1, 0), (1, 1), (1, 2)]));
    assert_eq!(gens.advance(), 3);
    assert_eq!(gens.advance(), 3);
    assert_eq!(gens.current(), &Grid::with_live_cells(5, 5, &[(1, 0), (1, 1), (1, 2)]));
}
