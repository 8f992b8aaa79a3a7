//! Concentric ring generator radiating from the grid centre.

use gesture_maze_core::{CellCoord, CellState, GeneratorKind, Grid, GridError};
use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{place_wall, MazeGenerator};

const RING_WALL_CHANCE: f64 = 0.7;
const RING_SPACING: u32 = 2;

/// Builds square rings around the centre with a corridor between rings.
///
/// Ring cells become walls with a fixed probability, and each side of every
/// ring keeps at least one opening away from its corners so no ring is ever
/// fully sealed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpiralMaze;

impl MazeGenerator for SpiralMaze {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Spiral
    }

    fn generate(
        &self,
        _level: u32,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError> {
        let size = grid.size();
        if size == 0 {
            return Ok(());
        }

        let center = size / 2;
        let max_radius = center.max(size - 1 - center);
        let mut radius = 1;
        while radius <= max_radius {
            let ring = Ring::new(center, radius, size);
            for cell in ring.cells() {
                if rng.gen_bool(RING_WALL_CHANCE) {
                    place_wall(grid, cell, start, goal)?;
                }
            }

            for side in ring.sides() {
                if let Some(&opening) = side.choose(rng) {
                    grid.set(opening, CellState::Open)?;
                }
            }

            radius += RING_SPACING;
        }

        Ok(())
    }
}

/// Square ring at a fixed Chebyshev distance from the centre, clipped to the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ring {
    low: i64,
    high: i64,
    size: i64,
}

impl Ring {
    pub(crate) fn new(center: u32, radius: u32, size: u32) -> Self {
        Self {
            low: i64::from(center) - i64::from(radius),
            high: i64::from(center) + i64::from(radius),
            size: i64::from(size),
        }
    }

    /// In-bounds ring cells in row-major order.
    pub(crate) fn cells(&self) -> Vec<CellCoord> {
        let mut cells = Vec::new();
        for row in self.low..=self.high {
            for column in self.low..=self.high {
                let on_border = row == self.low
                    || row == self.high
                    || column == self.low
                    || column == self.high;
                if on_border {
                    if let Some(cell) = self.cell(column, row) {
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }

    /// Non-corner cells of the top, right, bottom and left sides.
    ///
    /// A side whose line falls outside the grid yields no cells.
    pub(crate) fn sides(&self) -> [Vec<CellCoord>; 4] {
        let inner = (self.low + 1)..self.high;
        [
            inner
                .clone()
                .filter_map(|column| self.cell(column, self.low))
                .collect(),
            inner
                .clone()
                .filter_map(|row| self.cell(self.high, row))
                .collect(),
            inner
                .clone()
                .filter_map(|column| self.cell(column, self.high))
                .collect(),
            inner.filter_map(|row| self.cell(self.low, row)).collect(),
        ]
    }

    fn cell(&self, column: i64, row: i64) -> Option<CellCoord> {
        let inside = (0..self.size).contains(&column) && (0..self.size).contains(&row);
        inside.then(|| CellCoord::new(column as u32, row as u32))
    }
}
