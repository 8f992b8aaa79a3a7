//! Pure resolution of a single requested player step.

use std::collections::HashSet;

use gesture_maze_core::{CellCoord, CellState, Direction, Grid, MoveRejection};

/// First level on which stepping back onto a visited cell is refused.
pub(crate) const REVISIT_RULE_LEVEL: u32 = 2;

/// Result of validating a proposed step against the active level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// The step is refused without penalty.
    Rejected(MoveRejection),
    /// The destination is a wall; the shared collision penalty applies.
    HitWall,
    /// The player may move onto `to`.
    Advanced {
        /// Destination of the step.
        to: CellCoord,
        /// Indicates whether the destination is the goal.
        reached_goal: bool,
    },
}

/// Checks a single step from `from` in `direction` without mutating anything.
pub(crate) fn resolve(
    grid: &Grid,
    visited: &HashSet<CellCoord>,
    level: u32,
    from: CellCoord,
    goal: CellCoord,
    direction: Direction,
) -> MoveOutcome {
    let Some(to) = from.step(direction, grid.size()) else {
        return MoveOutcome::Rejected(MoveRejection::OutOfBounds);
    };

    match grid.get(to) {
        Ok(CellState::Wall) => return MoveOutcome::HitWall,
        Ok(CellState::Open) => {}
        Err(_) => return MoveOutcome::Rejected(MoveRejection::OutOfBounds),
    }

    if level >= REVISIT_RULE_LEVEL && visited.contains(&to) {
        return MoveOutcome::Rejected(MoveRejection::AlreadyVisited);
    }

    MoveOutcome::Advanced {
        to,
        reached_goal: to == goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_wall(wall: CellCoord) -> Grid {
        let mut grid = Grid::new(4);
        grid.set(wall, CellState::Wall).expect("wall inside grid");
        grid
    }

    #[test]
    fn stepping_off_the_grid_is_rejected() {
        let grid = Grid::new(4);
        let outcome = resolve(
            &grid,
            &HashSet::new(),
            1,
            CellCoord::new(0, 0),
            CellCoord::new(3, 3),
            Direction::Up,
        );
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::OutOfBounds));
    }

    #[test]
    fn stepping_into_wall_collides() {
        let grid = grid_with_wall(CellCoord::new(1, 0));
        let outcome = resolve(
            &grid,
            &HashSet::new(),
            1,
            CellCoord::new(0, 0),
            CellCoord::new(3, 3),
            Direction::Right,
        );
        assert_eq!(outcome, MoveOutcome::HitWall);
    }

    #[test]
    fn revisits_allowed_on_first_level_only() {
        let grid = Grid::new(4);
        let visited: HashSet<_> = [CellCoord::new(0, 0)].into_iter().collect();
        let from = CellCoord::new(1, 0);
        let goal = CellCoord::new(3, 3);

        assert_eq!(
            resolve(&grid, &visited, 1, from, goal, Direction::Left),
            MoveOutcome::Advanced {
                to: CellCoord::new(0, 0),
                reached_goal: false
            }
        );
        assert_eq!(
            resolve(&grid, &visited, 2, from, goal, Direction::Left),
            MoveOutcome::Rejected(MoveRejection::AlreadyVisited)
        );
    }

    #[test]
    fn reaching_goal_is_flagged() {
        let grid = Grid::new(4);
        let outcome = resolve(
            &grid,
            &HashSet::new(),
            3,
            CellCoord::new(2, 3),
            CellCoord::new(3, 3),
            Direction::Right,
        );
        assert_eq!(
            outcome,
            MoveOutcome::Advanced {
                to: CellCoord::new(3, 3),
                reached_goal: true
            }
        );
    }
}
