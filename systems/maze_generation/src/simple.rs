//! Introductory generator: a protected direct route with a parity wall pattern.

use std::collections::HashSet;

use gesture_maze_core::{CellCoord, GeneratorKind, Grid, GridError};
use gesture_maze_system_pathfinding::find_path;
use rand::{Rng, RngCore};

use crate::{is_endpoint, place_wall, MazeGenerator};

const ADJACENT_WALL_CHANCE: f64 = 0.5;

/// Scatters walls on a deterministic parity pattern around the direct route.
///
/// Level 1 walls every cell where `(x + y) % 3 == 0`; later levels wall cells
/// where `(x * y) % 4 == 0` or `(x + y) % 5 == 0`. Cells on the direct route
/// are never walled, and each interior route cell has a coin-flip chance of
/// gaining walls on its free neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleMaze;

impl SimpleMaze {
    /// Reports whether the parity pattern for `level` places a wall on `cell`.
    #[must_use]
    pub fn pattern_wall(level: u32, cell: CellCoord) -> bool {
        let x = cell.column();
        let y = cell.row();
        if level <= 1 {
            (x + y) % 3 == 0
        } else {
            (x * y) % 4 == 0 || (x + y) % 5 == 0
        }
    }
}

impl MazeGenerator for SimpleMaze {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Simple
    }

    fn generate(
        &self,
        level: u32,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError> {
        let route = find_path(grid, start, goal);
        let protected: HashSet<CellCoord> = route.cells().iter().copied().collect();
        let size = grid.size();

        for row in 0..size {
            for column in 0..size {
                let cell = CellCoord::new(column, row);
                if protected.contains(&cell) || !Self::pattern_wall(level, cell) {
                    continue;
                }
                place_wall(grid, cell, start, goal)?;
            }
        }

        let interior = route
            .cells()
            .get(1..route.len().saturating_sub(1))
            .unwrap_or_default();
        for &cell in interior {
            for neighbor in cell.neighbors(size) {
                if protected.contains(&neighbor) || is_endpoint(neighbor, start, goal) {
                    continue;
                }
                if rng.gen_bool(ADJACENT_WALL_CHANCE) {
                    place_wall(grid, neighbor, start, goal)?;
                }
            }
        }

        Ok(())
    }
}
