use gesture_maze_core::{CellCoord, CellState, Grid};
use gesture_maze_system_pathfinding::{find_path, is_reachable};

fn wall(grid: &mut Grid, column: u32, row: u32) {
    grid.set(CellCoord::new(column, row), CellState::Wall)
        .expect("wall inside grid");
}

#[test]
fn open_grid_path_is_manhattan_optimal() {
    let grid = Grid::new(10);
    let start = CellCoord::new(0, 0);

    for goal in [
        CellCoord::new(4, 4),
        CellCoord::new(9, 0),
        CellCoord::new(0, 9),
        CellCoord::new(7, 2),
        CellCoord::new(9, 9),
    ] {
        let path = find_path(&grid, start, goal);
        let expected = start.manhattan_distance(goal) as usize + 1;
        assert_eq!(path.len(), expected, "path to {goal} is not optimal");
        assert_eq!(path.first(), Some(start));
        assert_eq!(path.last(), Some(goal));
        assert!(path.is_contiguous());
    }
}

#[test]
fn ties_favour_earlier_discovered_nodes() {
    let grid = Grid::new(3);
    let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2));

    assert_eq!(
        path.cells(),
        &[
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
        ],
        "equal scores must expand in insertion order"
    );
}

#[test]
fn enclosed_goal_yields_empty_path() {
    let mut grid = Grid::new(7);
    for column in 3..=5 {
        wall(&mut grid, column, 3);
        wall(&mut grid, column, 5);
    }
    wall(&mut grid, 3, 4);
    wall(&mut grid, 5, 4);

    let goal = CellCoord::new(4, 4);
    let path = find_path(&grid, CellCoord::new(0, 0), goal);
    assert!(path.is_empty());
    assert!(!is_reachable(&grid, CellCoord::new(0, 0), goal));
}

#[test]
fn route_detours_around_walls_without_touching_them() {
    let mut grid = Grid::new(5);
    for row in 0..4 {
        wall(&mut grid, 2, row);
    }

    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(4, 0);
    let path = find_path(&grid, start, goal);

    assert!(!path.is_empty());
    assert!(path.is_contiguous());
    assert_eq!(path.len(), 13);
    for cell in path.cells() {
        assert!(grid.is_open(*cell), "path crossed wall at {cell}");
    }
    assert!(path.contains(CellCoord::new(2, 4)));
}

#[test]
fn start_equal_to_goal_is_single_cell_path() {
    let grid = Grid::new(4);
    let cell = CellCoord::new(2, 1);
    let path = find_path(&grid, cell, cell);
    assert_eq!(path.cells(), &[cell]);
}

#[test]
fn blocked_or_outside_endpoints_have_no_path() {
    let mut grid = Grid::new(4);
    wall(&mut grid, 3, 3);

    assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(3, 3)).is_empty());
    assert!(find_path(&grid, CellCoord::new(3, 3), CellCoord::new(0, 0)).is_empty());
    assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(4, 0)).is_empty());
}

#[test]
fn search_is_deterministic_and_leaves_grid_untouched() {
    let mut grid = Grid::new(8);
    for (column, row) in [(1, 0), (1, 1), (1, 2), (3, 3), (4, 3), (5, 3), (6, 5)] {
        wall(&mut grid, column, row);
    }
    let snapshot = grid.clone();

    let first = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(7, 7));
    let second = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(7, 7));

    assert_eq!(first, second);
    assert_eq!(grid, snapshot);
    assert_eq!(first.len(), 15);
}
