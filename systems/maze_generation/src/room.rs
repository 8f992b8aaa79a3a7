//! Room-based generator partitioning the grid into a three by three layout.

use std::ops::Range;

use gesture_maze_core::{CellCoord, CellState, Direction, GeneratorKind, Grid, GridError};
use rand::{Rng, RngCore};
use tracing::debug;

use crate::{is_endpoint, place_wall, MazeGenerator};

const ROOMS_PER_AXIS: u32 = 3;
const MIN_ROOM_SPAN: u32 = 2;
const MIN_OBSTACLES: u32 = 2;
const MAX_OBSTACLES: u32 = 4;
const CLUSTER_CHANCE: f64 = 0.4;

/// Splits the grid into rooms separated by wall lines joined by single doors.
///
/// Wall lines sit at multiples of `floor(N / 3)`. Every pair of adjacent rooms
/// shares exactly one door at a random offset, and each room receives a few
/// obstacles that may grow into a neighbouring cell of the same room.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomMaze;

impl MazeGenerator for RoomMaze {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Room
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
        let room = size / ROOMS_PER_AXIS;
        if room < MIN_ROOM_SPAN {
            debug!(size, "grid too small for rooms, leaving layout open");
            return Ok(());
        }

        for index in 1..ROOMS_PER_AXIS {
            let line = index * room;
            for offset in 0..size {
                place_wall(grid, CellCoord::new(line, offset), start, goal)?;
                place_wall(grid, CellCoord::new(offset, line), start, goal)?;
            }
        }

        for room_row in 0..ROOMS_PER_AXIS {
            for room_column in 0..ROOMS_PER_AXIS {
                let columns = room_span(room_column, room, size);
                let rows = room_span(room_row, room, size);

                if room_column + 1 < ROOMS_PER_AXIS {
                    let line = (room_column + 1) * room;
                    let row = rng.gen_range(rows.clone());
                    grid.set(CellCoord::new(line, row), CellState::Open)?;
                }

                if room_row + 1 < ROOMS_PER_AXIS {
                    let line = (room_row + 1) * room;
                    let column = rng.gen_range(columns.clone());
                    grid.set(CellCoord::new(column, line), CellState::Open)?;
                }
            }
        }

        for room_row in 0..ROOMS_PER_AXIS {
            for room_column in 0..ROOMS_PER_AXIS {
                let columns = room_span(room_column, room, size);
                let rows = room_span(room_row, room, size);
                scatter_obstacles(grid, &columns, &rows, start, goal, rng)?;
            }
        }

        Ok(())
    }
}

/// Interior cells covered by room `index` along one axis.
fn room_span(index: u32, room: u32, size: u32) -> Range<u32> {
    let low = if index == 0 { 0 } else { index * room + 1 };
    let high = if index + 1 == ROOMS_PER_AXIS {
        size
    } else {
        (index + 1) * room
    };
    low..high
}

fn scatter_obstacles(
    grid: &mut Grid,
    columns: &Range<u32>,
    rows: &Range<u32>,
    start: CellCoord,
    goal: CellCoord,
    rng: &mut dyn RngCore,
) -> Result<(), GridError> {
    let size = grid.size();
    let count = rng.gen_range(MIN_OBSTACLES..=MAX_OBSTACLES);

    for _ in 0..count {
        let cell = CellCoord::new(rng.gen_range(columns.clone()), rng.gen_range(rows.clone()));
        if is_endpoint(cell, start, goal) {
            continue;
        }
        grid.set(cell, CellState::Wall)?;

        if !rng.gen_bool(CLUSTER_CHANCE) {
            continue;
        }

        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let Some(extension) = cell.step(direction, size) else {
            continue;
        };
        if columns.contains(&extension.column()) && rows.contains(&extension.row()) {
            place_wall(grid, extension, start, goal)?;
        }
    }

    Ok(())
}
