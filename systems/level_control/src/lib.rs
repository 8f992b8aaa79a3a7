#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level controller that turns level requests into validated layouts.
//!
//! The controller owns the session's seeded random source. For every
//! [`Event::LevelRequested`] it derives a [`LevelDescriptor`], places the goal,
//! runs the selected maze generator, repairs the layout when no route survived
//! and answers with a [`Command::LoadLevel`].

use gesture_maze_core::{
    CellCoord, CellState, Command, Event, GeneratorKind, Grid, GridError, LevelLayout,
    DEFAULT_GRID_SIZE, MAX_GRID_SIZE,
};
use gesture_maze_system_maze_generation::{
    ensure_path, generator_for, select_generator, wall_density,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Smallest grid side length the controller accepts.
pub const MIN_GRID_SIZE: u32 = 4;
/// Upper bound on random draws when placing a level five or later goal.
pub const MAX_GOAL_ATTEMPTS: u32 = 64;
/// Upper bound on random draws per enemy spawn before scanning deterministically.
pub const MAX_SPAWN_ATTEMPTS: u32 = 32;
/// Minimum Manhattan distance between the start and any enemy spawn.
pub const MIN_SPAWN_DISTANCE: u32 = 3;
/// Largest number of enemy spawns placed on a single level.
pub const MAX_ENEMY_SPAWNS: u32 = 3;

const START: CellCoord = CellCoord::new(0, 0);
const FIRST_RANDOM_GOAL_LEVEL: u32 = 5;
const FIRST_ENEMY_LEVEL: u32 = 3;

/// Configuration parameters required to construct the level controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid_size: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided grid side length and seed.
    #[must_use]
    pub const fn new(grid_size: u32, rng_seed: u64) -> Self {
        Self {
            grid_size,
            rng_seed,
        }
    }

    /// Side length of every generated grid.
    #[must_use]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Seed feeding the controller's random source.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, 0)
    }
}

/// Errors raised while building a level.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Level numbers are one-based.
    #[error("level {0} is not a valid one-based level number")]
    InvalidLevel(u32),
    /// The configured grid cannot hold a distinct start and goal.
    #[error("grid size {0} is below the minimum of {}", MIN_GRID_SIZE)]
    GridTooSmall(u32),
    /// The configured grid exceeds the largest supported side length.
    #[error("grid size {0} exceeds the maximum of {}", MAX_GRID_SIZE)]
    GridTooLarge(u32),
    /// A generator addressed a cell outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Rule used to place the goal of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalRule {
    /// The goal sits on a hand-picked cell.
    Fixed(CellCoord),
    /// The goal is drawn at random at least `min_distance` steps from the start.
    Random {
        /// Minimum Manhattan distance between start and goal.
        min_distance: u32,
    },
}

/// Difficulty parameters derived from a level number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelDescriptor {
    level: u32,
    generator: GeneratorKind,
    wall_density: f64,
    goal_rule: GoalRule,
    enemy_count: u32,
}

impl LevelDescriptor {
    /// Derives the descriptor for a one-based level on a grid of side `grid_size`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidLevel`] for level zero and
    /// [`GenerationError::GridTooSmall`] or [`GenerationError::GridTooLarge`]
    /// when `grid_size` lies outside `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub fn for_level(level: u32, grid_size: u32) -> Result<Self, GenerationError> {
        if level == 0 {
            return Err(GenerationError::InvalidLevel(level));
        }
        if grid_size < MIN_GRID_SIZE {
            return Err(GenerationError::GridTooSmall(grid_size));
        }
        if grid_size > MAX_GRID_SIZE {
            return Err(GenerationError::GridTooLarge(grid_size));
        }

        Ok(Self {
            level,
            generator: select_generator(level),
            wall_density: wall_density(level),
            goal_rule: goal_rule(level, grid_size),
            enemy_count: enemy_count(level),
        })
    }

    /// One-based level number.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Strategy used to populate the grid.
    #[must_use]
    pub const fn generator(&self) -> GeneratorKind {
        self.generator
    }

    /// Wall probability applied by density-driven generators.
    #[must_use]
    pub const fn wall_density(&self) -> f64 {
        self.wall_density
    }

    /// Rule used to place the goal.
    #[must_use]
    pub const fn goal_rule(&self) -> GoalRule {
        self.goal_rule
    }

    /// Number of enemy spawn cells to place.
    #[must_use]
    pub const fn enemy_count(&self) -> u32 {
        self.enemy_count
    }
}

fn goal_rule(level: u32, size: u32) -> GoalRule {
    if level >= FIRST_RANDOM_GOAL_LEVEL {
        return GoalRule::Random {
            min_distance: size * 6 / 10,
        };
    }

    let last = size - 1;
    let scaled = |tenths: u32| (size * tenths / 10).min(last);
    let fixed = match level {
        1 => CellCoord::new(scaled(4), scaled(4)),
        2 => CellCoord::new(scaled(7), scaled(2)),
        3 => CellCoord::new(scaled(2), scaled(7)),
        _ => CellCoord::new(last, last),
    };

    if fixed == START {
        return GoalRule::Fixed(CellCoord::new(last, last));
    }
    GoalRule::Fixed(fixed)
}

fn enemy_count(level: u32) -> u32 {
    if level < FIRST_ENEMY_LEVEL {
        return 0;
    }
    (level - FIRST_ENEMY_LEVEL + 1).min(MAX_ENEMY_SPAWNS)
}

/// Resolves the goal cell for `rule`, drawing from `rng` when the rule is random.
///
/// Random placement gives up after [`MAX_GOAL_ATTEMPTS`] draws and falls back
/// to the corner opposite the start.
pub fn place_goal(rule: GoalRule, size: u32, rng: &mut dyn RngCore) -> CellCoord {
    let min_distance = match rule {
        GoalRule::Fixed(cell) => return cell,
        GoalRule::Random { min_distance } => min_distance,
    };

    for _ in 0..MAX_GOAL_ATTEMPTS {
        let candidate = CellCoord::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if candidate != START && START.manhattan_distance(candidate) >= min_distance {
            return candidate;
        }
    }

    let fallback = CellCoord::new(size - 1, size - 1);
    warn!(%fallback, min_distance, "goal placement exhausted its attempts");
    fallback
}

/// Chooses up to `count` distinct enemy spawn cells on `grid`.
///
/// Eligible cells are open, are neither endpoint and lie at least
/// [`MIN_SPAWN_DISTANCE`] steps from `start`. Each spawn tries
/// [`MAX_SPAWN_ATTEMPTS`] random draws before taking the first eligible cell
/// in row-major order. Fewer cells are returned when the grid runs out.
pub fn place_enemy_spawns(
    grid: &Grid,
    start: CellCoord,
    goal: CellCoord,
    count: u32,
    rng: &mut dyn RngCore,
) -> Vec<CellCoord> {
    let size = grid.size();
    let mut spawns: Vec<CellCoord> = Vec::with_capacity(count as usize);
    let eligible = |cell: CellCoord, chosen: &[CellCoord]| {
        cell != start
            && cell != goal
            && grid.is_open(cell)
            && start.manhattan_distance(cell) >= MIN_SPAWN_DISTANCE
            && !chosen.contains(&cell)
    };

    for _ in 0..count {
        let drawn = (0..MAX_SPAWN_ATTEMPTS)
            .map(|_| CellCoord::new(rng.gen_range(0..size), rng.gen_range(0..size)))
            .find(|cell| eligible(*cell, &spawns));
        let scanned = || {
            grid.iter()
                .map(|(cell, _)| cell)
                .find(|cell| eligible(*cell, &spawns))
        };

        match drawn.or_else(scanned) {
            Some(cell) => spawns.push(cell),
            None => {
                debug!(placed = spawns.len(), count, "no eligible enemy spawn cells left");
                break;
            }
        }
    }

    spawns
}

/// Stateful system that answers level requests with freshly generated layouts.
#[derive(Debug)]
pub struct LevelControl {
    config: Config,
    rng: ChaCha8Rng,
}

impl LevelControl {
    /// Creates a new level controller using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Configuration the controller was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Consumes world events and emits a `LoadLevel` command per level request.
    ///
    /// A request that fails to build is logged and answered with no command,
    /// so the world keeps waiting for a level. Callers detect this by the
    /// state staying `LevelComplete` (or `Idle`) once the request is handled.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::LevelRequested { level } = event else {
                continue;
            };

            match self.build_level(*level) {
                Ok(layout) => out.push(Command::LoadLevel { layout }),
                Err(error) => error!(level = *level, %error, "failed to generate level"),
            }
        }
    }

    /// Builds a validated, solvable layout for the provided level.
    ///
    /// # Errors
    ///
    /// Fails when the level number or configured grid size is invalid, or when
    /// a generator addresses a cell outside the grid.
    pub fn build_level(&mut self, level: u32) -> Result<LevelLayout, GenerationError> {
        let size = self.config.grid_size;
        let descriptor = LevelDescriptor::for_level(level, size)?;
        let start = START;
        let goal = place_goal(descriptor.goal_rule, size, &mut self.rng);

        let mut grid = Grid::new(size);
        let generator = descriptor.generator;
        generator_for(generator).generate_with_density(
            level,
            descriptor.wall_density,
            &mut grid,
            start,
            goal,
            &mut self.rng,
        )?;
        grid.set(start, CellState::Open)?;
        grid.set(goal, CellState::Open)?;

        let repaired = ensure_path(&mut grid, start, goal)?;
        if repaired {
            warn!(level, %generator, "generated layout had no route and was repaired");
        }

        let enemy_spawns = place_enemy_spawns(
            &grid,
            start,
            goal,
            descriptor.enemy_count,
            &mut self.rng,
        );

        info!(
            level,
            %generator,
            %goal,
            walls = grid.wall_count(),
            density = descriptor.wall_density,
            enemies = enemy_spawns.len(),
            repaired,
            "level generated"
        );

        Ok(LevelLayout {
            level,
            grid,
            start,
            goal,
            generator,
            repaired,
            enemy_spawns,
        })
    }
}
