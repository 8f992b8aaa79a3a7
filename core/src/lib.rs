#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the gesture maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod grid;

pub use grid::{is_within_bounds, CellState, Grid, GridError, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Gesture Maze.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets score, lives and level, then requests the first level.
    ///
    /// Accepted from every state, which makes it the restart command after
    /// [`GameState::GameOver`].
    StartGame,
    /// Installs a freshly generated level, replacing the previous grid wholesale.
    LoadLevel {
        /// Finished, validated layout produced by the level controller.
        layout: LevelLayout,
    },
    /// Requests that the player advance a single step in the specified direction.
    MovePlayer {
        /// Direction supplied by the gesture or keyboard input layer.
        direction: Direction,
    },
    /// Reports contact between the player and an externally simulated hazard.
    ReportCollision {
        /// Hazard responsible for the contact.
        kind: CollisionKind,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Asks the level controller to build the provided level.
    LevelRequested {
        /// One-based number of the level to generate.
        level: u32,
    },
    /// Confirms that a generated level was installed and play resumed.
    LevelLoaded {
        /// Level that became active.
        level: u32,
        /// Cell where the player starts.
        start: CellCoord,
        /// Cell the player must reach.
        goal: CellCoord,
        /// Strategy that produced the wall layout.
        generator: GeneratorKind,
    },
    /// Announces the active level number.
    LevelChanged {
        /// Level that became active.
        level: u32,
    },
    /// Confirms that the player moved between two adjacent cells.
    PlayerMoved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Reports a move that was rejected without penalty.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
        /// Reason the move was refused.
        reason: MoveRejection,
    },
    /// Reports that the player collided with a wall or hazard.
    Collision {
        /// Kind of obstacle that was hit.
        kind: CollisionKind,
    },
    /// Publishes the updated score.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Publishes the updated number of lives.
    LivesChanged {
        /// Lives remaining after the change.
        lives: u32,
    },
    /// Announces that the player reached the goal of the level.
    LevelCompleted {
        /// Level that was completed.
        level: u32,
    },
    /// Announces that the player ran out of lives.
    GameOver {
        /// Score at the moment the game ended.
        final_score: u32,
        /// Level that was being played when the game ended.
        final_level: u32,
    },
}

/// Lifecycle state of a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    /// No game has been started yet.
    #[default]
    Idle,
    /// A level is loaded and accepts movement.
    Playing,
    /// The goal was reached and the next level is being prepared.
    LevelComplete,
    /// Lives are exhausted; only a restart resumes play.
    GameOver,
}

/// Reasons a movement request may be rejected without penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The step would leave the grid.
    OutOfBounds,
    /// The destination was already visited during this level.
    AlreadyVisited,
    /// No level is currently being played.
    NotPlaying,
}

/// Obstacles that cost the player a life on contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// The player attempted to step into a wall cell.
    Wall,
    /// A projectile reached the player's cell.
    Projectile,
    /// An enemy reached the player's cell.
    Enemy,
}

/// Orthogonal movement directions accepted from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in neighbour exploration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Column and row offsets applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Error returned when an input label does not name a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a direction", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Self::Up),
            "down" | "s" => Ok(Self::Down),
            "left" | "a" => Ok(Self::Left),
            "right" | "d" => Ok(Self::Right),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell reached by a single step, or `None` when it would leave a grid of
    /// side length `size`.
    #[must_use]
    pub fn step(self, direction: Direction, size: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        is_within_bounds(column, row, size).then_some(CellCoord::new(column, row))
    }

    /// Orthogonal neighbours inside a grid of side length `size`, in
    /// [`Direction::ALL`] order.
    pub fn neighbors(self, size: u32) -> impl Iterator<Item = CellCoord> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction, size))
    }

    /// Direction of a single orthogonal step from `self` to `to`, if adjacent.
    #[must_use]
    pub fn direction_to(self, to: CellCoord) -> Option<Direction> {
        if self.manhattan_distance(to) != 1 {
            return None;
        }

        if to.column > self.column {
            Some(Direction::Right)
        } else if to.column < self.column {
            Some(Direction::Left)
        } else if to.row > self.row {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Ordered, orthogonally contiguous sequence of cells from start to goal.
///
/// An empty path signals that no route exists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps the provided cells without validating contiguity.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }

    /// Path that represents "no route".
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Reports whether the path contains no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in the path, counting both endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cells composing the path in travel order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// First cell of the path.
    #[must_use]
    pub fn first(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    #[must_use]
    pub fn last(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Reports whether the path passes through `cell`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Reports whether every consecutive pair differs by one orthogonal step.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|pair| pair[0].manhattan_distance(pair[1]) == 1)
    }

    /// Consumes the path, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<CellCoord> {
        self.cells
    }
}

/// Strategies available for populating a level's wall layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// Protected direct path with a parity wall pattern.
    Simple,
    /// Three by three arrangement of rooms joined by doors.
    Room,
    /// Concentric rings with guaranteed openings.
    Spiral,
    /// Dense fill around a lengthened, winding protected path.
    Winding,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Simple => "simple",
            Self::Room => "room",
            Self::Spiral => "spiral",
            Self::Winding => "winding",
        };
        f.write_str(label)
    }
}

/// Finished level handed from the level controller to the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    /// One-based level number.
    pub level: u32,
    /// Validated wall layout; start and goal are always open.
    pub grid: Grid,
    /// Cell where the player starts.
    pub start: CellCoord,
    /// Cell the player must reach.
    pub goal: CellCoord,
    /// Strategy that produced the layout.
    pub generator: GeneratorKind,
    /// Indicates whether the guaranteed-path fallback had to carve a corridor.
    pub repaired: bool,
    /// Open cells where externally simulated enemies appear.
    pub enemy_spawns: Vec<CellCoord>,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellState, Direction, GeneratorKind, Grid, Path};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_stays_within_grid() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 5), None);
        assert_eq!(origin.step(Direction::Left, 5), None);
        assert_eq!(origin.step(Direction::Right, 5), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.step(Direction::Down, 5), Some(CellCoord::new(0, 1)));
        assert_eq!(CellCoord::new(4, 4).step(Direction::Right, 5), None);
    }

    #[test]
    fn neighbors_follow_exploration_order() {
        let neighbors: Vec<_> = CellCoord::new(1, 1).neighbors(3).collect();
        assert_eq!(
            neighbors,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(0, 1),
            ]
        );
        assert_eq!(CellCoord::new(0, 0).neighbors(3).count(), 2);
    }

    #[test]
    fn direction_to_requires_adjacency() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(
            origin.direction_to(CellCoord::new(2, 1)),
            Some(Direction::Up)
        );
        assert_eq!(
            origin.direction_to(CellCoord::new(3, 2)),
            Some(Direction::Right)
        );
        assert_eq!(origin.direction_to(CellCoord::new(3, 3)), None);
        assert_eq!(origin.direction_to(origin), None);
    }

    #[test]
    fn directions_parse_from_keyboard_and_gesture_labels() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("A".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" Right ".parse::<Direction>(), Ok(Direction::Right));
        assert!("jump".parse::<Direction>().is_err());
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn path_contiguity_detects_gaps() {
        let contiguous = Path::new(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ]);
        assert!(contiguous.is_contiguous());
        assert_eq!(contiguous.first(), Some(CellCoord::new(0, 0)));
        assert_eq!(contiguous.last(), Some(CellCoord::new(1, 1)));

        let broken = Path::new(vec![CellCoord::new(0, 0), CellCoord::new(2, 0)]);
        assert!(!broken.is_contiguous());
        assert!(Path::empty().is_empty());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        let mut grid = Grid::new(4);
        grid.set(CellCoord::new(2, 3), CellState::Wall)
            .expect("cell in bounds");
        assert_round_trip(&grid);
    }

    #[test]
    fn generator_kind_round_trips_through_bincode() {
        assert_round_trip(&GeneratorKind::Spiral);
    }
}
