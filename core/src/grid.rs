//! Dense occupancy grid describing which cells of the maze are walls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Side length used when no explicit grid size is configured.
pub const DEFAULT_GRID_SIZE: u32 = 10;
/// Largest side length a grid snapshot may declare.
pub const MAX_GRID_SIZE: u32 = 256;

/// Binary occupancy state stored for every grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Cell may be traversed by the player.
    #[default]
    Open,
    /// Cell blocks traversal.
    Wall,
}

/// Errors raised when the grid is addressed outside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The provided cell does not lie within `[0, size)` on both axes.
    #[error(
        "cell ({}, {}) lies outside the {size}x{size} grid",
        .cell.column(),
        .cell.row()
    )]
    OutOfBounds {
        /// Cell that was addressed.
        cell: CellCoord,
        /// Side length of the grid that rejected the access.
        size: u32,
    },
    /// A snapshot's cell storage does not describe a square grid of its size.
    #[error("grid snapshot of size {size} carries {cells} cells")]
    MalformedSnapshot {
        /// Side length declared by the snapshot.
        size: u32,
        /// Number of cells the snapshot carried.
        cells: usize,
    },
}

/// Square matrix of [`CellState`] values stored in row-major order.
///
/// Deserialization rejects snapshots whose cell count is not `size * size` or
/// whose size exceeds [`MAX_GRID_SIZE`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct Grid {
    size: u32,
    cells: Vec<CellState>,
}

/// Unvalidated wire form of a [`Grid`].
#[derive(Deserialize)]
struct GridSnapshot {
    size: u32,
    cells: Vec<CellState>,
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let GridSnapshot { size, cells } = snapshot;
        let expected = (size as usize).checked_mul(size as usize);
        if size > MAX_GRID_SIZE || expected != Some(cells.len()) {
            return Err(GridError::MalformedSnapshot {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }
}

impl Grid {
    /// Creates a new grid with every cell open.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let count = usize::try_from(u64::from(size) * u64::from(size)).unwrap_or(0);
        Self {
            size,
            cells: vec![CellState::Open; count],
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn is_within_bounds(&self, cell: CellCoord) -> bool {
        is_within_bounds(cell.column(), cell.row(), self.size)
    }

    /// Reads the state of the provided cell.
    pub fn get(&self, cell: CellCoord) -> Result<CellState, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites the state of the provided cell.
    pub fn set(&mut self, cell: CellCoord, state: CellState) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Reports whether the cell is inside the grid and open.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        matches!(self.get(cell), Ok(CellState::Open))
    }

    /// Number of cells currently holding a wall.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == CellState::Wall)
            .count()
    }

    /// Iterates every cell and its state in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().map(move |(index, state)| {
            // Both quotient and remainder stay below `size`, which fits in u32.
            let column = (index % size) as u32;
            let row = (index / size) as u32;
            (CellCoord::new(column, row), *state)
        })
    }

    fn index(&self, cell: CellCoord) -> Result<usize, GridError> {
        if !self.is_within_bounds(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                size: self.size,
            });
        }

        let row = cell.row() as usize;
        let column = cell.column() as usize;
        Ok(row * self.size as usize + column)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// Reports whether `(x, y)` lies inside a grid with side length `size`.
#[must_use]
pub const fn is_within_bounds(x: u32, y: u32, size: u32) -> bool {
    x < size && y < size
}
