#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generation strategies that populate a level's wall layout.
//!
//! Every strategy implements [`MazeGenerator`] and mutates a caller-owned
//! [`Grid`] in place. Generators may leave the grid unsolvable while scattering
//! obstacles; callers run [`ensure_path`] afterwards, which validates the
//! layout with the pathfinder and carves a guaranteed corridor when no route
//! survived.

use gesture_maze_core::{CellCoord, CellState, GeneratorKind, Grid, GridError};
use rand::RngCore;

mod repair;
mod room;
mod simple;
mod spiral;
mod winding;

pub use repair::{carve_guaranteed_path, ensure_path};
pub use room::RoomMaze;
pub use simple::SimpleMaze;
pub use spiral::SpiralMaze;
pub use winding::{wall_density, WindingMaze};

/// Capability shared by every maze strategy.
pub trait MazeGenerator {
    /// Identifies the strategy.
    fn kind(&self) -> GeneratorKind;

    /// Populates `grid` with walls for the provided level.
    ///
    /// Implementations never place walls on `start` or `goal`. Out-of-bounds
    /// accesses are programming errors and are propagated rather than clamped.
    fn generate(
        &self,
        level: u32,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError>;

    /// Populates `grid` using a caller-chosen background wall density.
    ///
    /// Only strategies with a density-driven fill honour `wall_density`; the
    /// others behave exactly like [`MazeGenerator::generate`].
    fn generate_with_density(
        &self,
        level: u32,
        wall_density: f64,
        grid: &mut Grid,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut dyn RngCore,
    ) -> Result<(), GridError> {
        let _ = wall_density;
        self.generate(level, grid, start, goal, rng)
    }
}

/// Chooses the strategy used for the provided one-based level.
///
/// The first two levels use the simple generator; later levels cycle through
/// rooms, spirals and winding paths by `level % 3`.
#[must_use]
pub const fn select_generator(level: u32) -> GeneratorKind {
    if level <= 2 {
        return GeneratorKind::Simple;
    }

    match level % 3 {
        0 => GeneratorKind::Room,
        1 => GeneratorKind::Spiral,
        _ => GeneratorKind::Winding,
    }
}

/// Resolves the generator implementing the provided strategy.
#[must_use]
pub fn generator_for(kind: GeneratorKind) -> &'static dyn MazeGenerator {
    match kind {
        GeneratorKind::Simple => &SimpleMaze,
        GeneratorKind::Room => &RoomMaze,
        GeneratorKind::Spiral => &SpiralMaze,
        GeneratorKind::Winding => &WindingMaze,
    }
}

fn is_endpoint(cell: CellCoord, start: CellCoord, goal: CellCoord) -> bool {
    cell == start || cell == goal
}

fn place_wall(
    grid: &mut Grid,
    cell: CellCoord,
    start: CellCoord,
    goal: CellCoord,
) -> Result<(), GridError> {
    if is_endpoint(cell, start, goal) {
        return Ok(());
    }
    grid.set(cell, CellState::Wall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_levels_use_simple_generator() {
        assert_eq!(select_generator(1), GeneratorKind::Simple);
        assert_eq!(select_generator(2), GeneratorKind::Simple);
    }

    #[test]
    fn later_levels_cycle_complex_generators() {
        assert_eq!(select_generator(3), GeneratorKind::Room);
        assert_eq!(select_generator(4), GeneratorKind::Spiral);
        assert_eq!(select_generator(5), GeneratorKind::Winding);
        assert_eq!(select_generator(6), GeneratorKind::Room);
        assert_eq!(select_generator(10), GeneratorKind::Spiral);
    }

    #[test]
    fn generator_lookup_matches_kind() {
        for kind in [
            GeneratorKind::Simple,
            GeneratorKind::Room,
            GeneratorKind::Spiral,
            GeneratorKind::Winding,
        ] {
            assert_eq!(generator_for(kind).kind(), kind);
        }
    }

    #[test]
    fn place_wall_spares_endpoints() {
        let mut grid = Grid::new(3);
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(2, 2);

        place_wall(&mut grid, start, start, goal).expect("in bounds");
        place_wall(&mut grid, goal, start, goal).expect("in bounds");
        place_wall(&mut grid, CellCoord::new(1, 1), start, goal).expect("in bounds");

        assert!(grid.is_open(start));
        assert!(grid.is_open(goal));
        assert_eq!(grid.wall_count(), 1);
    }
}
