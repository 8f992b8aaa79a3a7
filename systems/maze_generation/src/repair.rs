//! Post-generation validation and the guaranteed-path fallback.

use gesture_maze_core::{CellCoord, CellState, Grid, GridError};
use gesture_maze_system_pathfinding::is_reachable;
use tracing::debug;

/// Validates that `goal` is reachable from `start`, carving an L-shaped
/// corridor when it is not.
///
/// Returns `true` when the fallback corridor had to be carved.
pub fn ensure_path(grid: &mut Grid, start: CellCoord, goal: CellCoord) -> Result<bool, GridError> {
    if is_reachable(grid, start, goal) {
        return Ok(false);
    }

    debug!(%start, %goal, "no route after generation, carving fallback corridor");
    carve_guaranteed_path(grid, start, goal)?;
    Ok(true)
}

/// Opens every cell along the row of `start` up to the column of `goal`, then
/// every cell along that column up to `goal`.
///
/// Only ever opens cells, so the corridor connects both endpoints regardless
/// of the prior layout.
pub fn carve_guaranteed_path(
    grid: &mut Grid,
    start: CellCoord,
    goal: CellCoord,
) -> Result<(), GridError> {
    for column in span(start.column(), goal.column()) {
        grid.set(CellCoord::new(column, start.row()), CellState::Open)?;
    }

    for row in span(start.row(), goal.row()) {
        grid.set(CellCoord::new(goal.column(), row), CellState::Open)?;
    }

    Ok(())
}

fn span(from: u32, to: u32) -> std::ops::RangeInclusive<u32> {
    from.min(to)..=from.max(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled(size: u32) -> Grid {
        let mut grid = Grid::new(size);
        for row in 0..size {
            for column in 0..size {
                grid.set(CellCoord::new(column, row), CellState::Wall)
                    .expect("in bounds");
            }
        }
        grid
    }

    #[test]
    fn carve_opens_l_shaped_corridor() {
        let mut grid = walled(5);
        let start = CellCoord::new(1, 0);
        let goal = CellCoord::new(3, 4);

        carve_guaranteed_path(&mut grid, start, goal).expect("in bounds");

        let open: Vec<_> = grid
            .iter()
            .filter(|(_, state)| *state == CellState::Open)
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(
            open,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(3, 0),
                CellCoord::new(3, 1),
                CellCoord::new(3, 2),
                CellCoord::new(3, 3),
                CellCoord::new(3, 4),
            ]
        );
    }

    #[test]
    fn carve_handles_goal_above_and_left_of_start() {
        let mut grid = walled(4);
        let start = CellCoord::new(3, 3);
        let goal = CellCoord::new(0, 1);

        carve_guaranteed_path(&mut grid, start, goal).expect("in bounds");

        assert!(is_reachable(&grid, start, goal));
        assert_eq!(grid.wall_count(), 16 - 6);
    }

    #[test]
    fn ensure_path_leaves_solvable_grid_untouched() {
        let mut grid = Grid::new(4);
        grid.set(CellCoord::new(1, 1), CellState::Wall)
            .expect("in bounds");
        let before = grid.clone();

        let repaired = ensure_path(&mut grid, CellCoord::new(0, 0), CellCoord::new(3, 3))
            .expect("in bounds");

        assert!(!repaired);
        assert_eq!(grid, before);
    }

    #[test]
    fn ensure_path_repairs_sealed_grid() {
        let mut grid = walled(6);
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(5, 5);
        grid.set(start, CellState::Open).expect("in bounds");
        grid.set(goal, CellState::Open).expect("in bounds");

        let repaired = ensure_path(&mut grid, start, goal).expect("in bounds");

        assert!(repaired);
        assert!(is_reachable(&grid, start, goal));
    }

    #[test]
    fn carve_reports_out_of_bounds_goal() {
        let mut grid = Grid::new(3);
        let result = carve_guaranteed_path(&mut grid, CellCoord::new(0, 0), CellCoord::new(5, 0));
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    }
}
