//! Dense generator carved around a lengthened route with dead-end detours.

use std::collections::HashSet;

use gesture_maze_core::{CellCoord, Direction, GeneratorKind, Grid, GridError};
use gesture_maze_system_pathfinding::find_path;
use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{place_wall, MazeGenerator};

const MIN_DETOURS: u32 = 1;
const MAX_DETOURS: u32 = 3;
const MIN_DETOUR_STEPS: u32 = 2;
const MAX_DETOUR_STEPS: u32 = 4;
const BASE_DENSITY: f64 = 0.5;
const DENSITY_PER_LEVEL: f64 = 0.03;
const MAX_DENSITY: f64 = 0.9;
const ADJACENT_WALL_CHANCE: f64 = 0.65;

/// Fills the grid densely while protecting a winding route from start to goal.
///
/// The direct route is extended with one to three out-and-back detours so the
/// protected corridor branches into dead ends. Every other cell becomes a wall
/// with a level-scaled probability, except for a one-cell buffer around the
/// start and the goal.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindingMaze;

impl MazeGenerator for WindingMaze {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Winding
    }

    fn generate(
        &self,
        level: u32,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError> {
        self.generate_with_density(level, wall_density(level), grid, start, goal, rng)
    }

    fn generate_with_density(
        &self,
        _level: u32,
        wall_density: f64,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError> {
        let size = grid.size();
        let mut route = find_path(grid, start, goal).into_vec();
        let detours = rng.gen_range(MIN_DETOURS..=MAX_DETOURS);
        for _ in 0..detours {
            splice_detour(&mut route, size, rng);
        }

        let protected: HashSet<CellCoord> = route.iter().copied().collect();
        let buffered = |cell: CellCoord| near(cell, start) || near(cell, goal);
        let density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };

        for row in 0..size {
            for column in 0..size {
                let cell = CellCoord::new(column, row);
                if protected.contains(&cell) || buffered(cell) {
                    continue;
                }
                if rng.gen_bool(density) {
                    place_wall(grid, cell, start, goal)?;
                }
            }
        }

        let interior = route.get(1..route.len().saturating_sub(1)).unwrap_or_default();
        for &cell in interior {
            for neighbor in cell.neighbors(size) {
                if protected.contains(&neighbor) || buffered(neighbor) {
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

/// Wall probability applied to unprotected cells on the provided level.
#[must_use]
pub fn wall_density(level: u32) -> f64 {
    (BASE_DENSITY + f64::from(level) * DENSITY_PER_LEVEL).min(MAX_DENSITY)
}

/// Inserts an out-and-back excursion after a random interior route cell.
///
/// The excursion walks a few steps in a direction that stays inside the grid,
/// then retraces its steps to the anchor, so the route remains contiguous.
fn splice_detour(route: &mut Vec<CellCoord>, size: u32, rng: &mut dyn RngCore) {
    if route.len() < 3 {
        return;
    }

    let anchor_index = rng.gen_range(1..route.len() - 1);
    let anchor = route[anchor_index];
    let steps = rng.gen_range(MIN_DETOUR_STEPS..=MAX_DETOUR_STEPS);

    let candidates: Vec<Vec<CellCoord>> = Direction::ALL
        .into_iter()
        .filter_map(|direction| walk(anchor, direction, steps, size))
        .collect();
    let Some(outbound) = candidates.choose(rng) else {
        return;
    };

    let mut excursion = outbound.clone();
    excursion.extend(outbound.iter().rev().skip(1).copied());
    excursion.push(anchor);

    let tail = route.split_off(anchor_index + 1);
    route.extend(excursion);
    route.extend(tail);
}

fn walk(from: CellCoord, direction: Direction, steps: u32, size: u32) -> Option<Vec<CellCoord>> {
    let mut cells = Vec::with_capacity(steps as usize);
    let mut cursor = from;
    for _ in 0..steps {
        cursor = cursor.step(direction, size)?;
        cells.push(cursor);
    }
    Some(cells)
}

fn near(cell: CellCoord, anchor: CellCoord) -> bool {
    cell.column().abs_diff(anchor.column()) <= 1 && cell.row().abs_diff(anchor.row()) <= 1
}
