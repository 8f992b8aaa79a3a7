#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for the gesture maze.
//!
//! The world owns the active level's grid, the player's position, the
//! per-level visited set, score and lives. It is mutated exclusively through
//! [`apply`], which resolves a single [`Command`] and reports every observable
//! change as an [`Event`].

use std::collections::HashSet;

use gesture_maze_core::{
    CellCoord, CollisionKind, Command, Direction, Event, GameState, GeneratorKind, Grid,
    LevelLayout, MoveRejection, WELCOME_BANNER,
};
use serde::Deserialize;
use tracing::{debug, info};

mod movement;

use movement::MoveOutcome;

const DEFAULT_STARTING_LIVES: u32 = 3;
const DEFAULT_STARTING_SCORE: u32 = 1_000;
const DEFAULT_STEP_PENALTY: u32 = 1;
const DEFAULT_COLLISION_PENALTY: u32 = 50;

/// Scoring and life rules applied by the movement resolver.
///
/// Score never drops below zero: every penalty saturates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Lives granted when a game starts.
    pub starting_lives: u32,
    /// Score granted when a game starts.
    pub starting_score: u32,
    /// Score deducted for every accepted step.
    pub step_penalty: u32,
    /// Score deducted for every wall, projectile or enemy collision.
    pub collision_penalty: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_lives: DEFAULT_STARTING_LIVES,
            starting_score: DEFAULT_STARTING_SCORE,
            step_penalty: DEFAULT_STEP_PENALTY,
            collision_penalty: DEFAULT_COLLISION_PENALTY,
        }
    }
}

/// Represents the authoritative gesture maze session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    state: GameState,
    level: u32,
    grid: Grid,
    start: CellCoord,
    goal: CellCoord,
    player: CellCoord,
    visited: HashSet<CellCoord>,
    generator: Option<GeneratorKind>,
    enemy_spawns: Vec<CellCoord>,
    score: u32,
    lives: u32,
}

impl World {
    /// Creates a new idle world using the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// Creates a new idle world using the provided rules.
    #[must_use]
    pub fn with_rules(rules: Rules) -> Self {
        Self {
            banner: WELCOME_BANNER,
            rules,
            state: GameState::Idle,
            level: 0,
            grid: Grid::default(),
            start: CellCoord::new(0, 0),
            goal: CellCoord::new(0, 0),
            player: CellCoord::new(0, 0),
            visited: HashSet::new(),
            generator: None,
            enemy_spawns: Vec::new(),
            score: rules.starting_score,
            lives: rules.starting_lives,
        }
    }

    fn start_game(&mut self, out_events: &mut Vec<Event>) {
        self.state = GameState::Idle;
        self.level = 0;
        self.score = self.rules.starting_score;
        self.lives = self.rules.starting_lives;
        self.visited.clear();
        self.enemy_spawns.clear();
        self.generator = None;

        info!(score = self.score, lives = self.lives, "game started");
        out_events.push(Event::ScoreChanged { score: self.score });
        out_events.push(Event::LivesChanged { lives: self.lives });
        out_events.push(Event::LevelRequested { level: 1 });
    }

    fn load_level(&mut self, layout: LevelLayout, out_events: &mut Vec<Event>) {
        if self.state == GameState::GameOver {
            debug!(offered = layout.level, "ignoring level layout after game over");
            return;
        }

        let LevelLayout {
            level,
            grid,
            start,
            goal,
            generator,
            repaired: _,
            enemy_spawns,
        } = layout;

        self.level = level;
        self.grid = grid;
        self.start = start;
        self.goal = goal;
        self.player = start;
        self.visited.clear();
        let _ = self.visited.insert(start);
        self.generator = Some(generator);
        self.enemy_spawns = enemy_spawns;
        self.state = GameState::Playing;

        out_events.push(Event::LevelChanged { level });
        out_events.push(Event::LevelLoaded {
            level,
            start,
            goal,
            generator,
        });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::NotPlaying,
            });
            return;
        }

        let outcome = movement::resolve(
            &self.grid,
            &self.visited,
            self.level,
            self.player,
            self.goal,
            direction,
        );

        match outcome {
            MoveOutcome::Rejected(reason) => {
                out_events.push(Event::MoveRejected { direction, reason });
            }
            MoveOutcome::HitWall => self.collide(CollisionKind::Wall, out_events),
            MoveOutcome::Advanced { to, reached_goal } => {
                let from = self.player;
                self.player = to;
                let _ = self.visited.insert(to);
                self.score = self.score.saturating_sub(self.rules.step_penalty);
                out_events.push(Event::PlayerMoved { from, to });
                out_events.push(Event::ScoreChanged { score: self.score });

                if reached_goal {
                    self.complete_level(out_events);
                }
            }
        }
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) {
        self.state = GameState::LevelComplete;
        info!(level = self.level, score = self.score, "level complete");
        out_events.push(Event::LevelCompleted { level: self.level });
        out_events.push(Event::LevelRequested {
            level: self.level.saturating_add(1),
        });
    }

    fn collide(&mut self, kind: CollisionKind, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.score = self.score.saturating_sub(self.rules.collision_penalty);
        debug!(?kind, lives = self.lives, score = self.score, "collision");
        out_events.push(Event::Collision { kind });
        out_events.push(Event::LivesChanged { lives: self.lives });
        out_events.push(Event::ScoreChanged { score: self.score });

        if self.lives == 0 {
            self.state = GameState::GameOver;
            info!(
                final_score = self.score,
                final_level = self.level,
                "game over"
            );
            out_events.push(Event::GameOver {
                final_score: self.score,
                final_level: self.level,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame => world.start_game(out_events),
        Command::LoadLevel { layout } => world.load_level(layout, out_events),
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::ReportCollision { kind } => world.collide(kind, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use gesture_maze_core::{CellCoord, GameState, GeneratorKind, Grid};

    use super::{Rules, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules governing score and lives.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// One-based number of the active level, or zero before the first level loads.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Provides read-only access to the active level's grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Cell where the player started the active level.
    #[must_use]
    pub fn start(world: &World) -> CellCoord {
        world.start
    }

    /// Cell the player must reach on the active level.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.goal
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Reports whether the player occupied `cell` during the active level.
    #[must_use]
    pub fn is_visited(world: &World, cell: CellCoord) -> bool {
        world.visited.contains(&cell)
    }

    /// Cells occupied during the active level in row-major order.
    #[must_use]
    pub fn visited_cells(world: &World) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = world.visited.iter().copied().collect();
        cells.sort_by_key(|cell| (cell.row(), cell.column()));
        cells
    }

    /// Strategy that produced the active level, if one is loaded.
    #[must_use]
    pub fn generator(world: &World) -> Option<GeneratorKind> {
        world.generator
    }

    /// Cells where externally simulated enemies appear on the active level.
    #[must_use]
    pub fn enemy_spawns(world: &World) -> &[CellCoord] {
        &world.enemy_spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_is_idle() {
        let world = World::new();
        assert_eq!(query::state(&world), GameState::Idle);
        assert_eq!(query::level(&world), 0);
        assert_eq!(query::lives(&world), DEFAULT_STARTING_LIVES);
        assert_eq!(query::score(&world), DEFAULT_STARTING_SCORE);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn start_game_requests_first_level() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartGame, &mut events);

        assert_eq!(
            events,
            vec![
                Event::ScoreChanged {
                    score: DEFAULT_STARTING_SCORE
                },
                Event::LivesChanged {
                    lives: DEFAULT_STARTING_LIVES
                },
                Event::LevelRequested { level: 1 },
            ]
        );
    }

    #[test]
    fn moves_before_first_level_are_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Right,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                direction: Direction::Right,
                reason: MoveRejection::NotPlaying,
            }]
        );
    }

    #[test]
    fn collisions_outside_play_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ReportCollision {
                kind: CollisionKind::Enemy,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::lives(&world), DEFAULT_STARTING_LIVES);
    }

    #[test]
    fn rules_deserialize_with_partial_overrides() {
        let rules: Rules = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                [("starting_lives", 5_u32)].into_iter(),
            ),
        )
        .expect("rules deserialize");
        assert_eq!(rules.starting_lives, 5);
        assert_eq!(rules.collision_penalty, DEFAULT_COLLISION_PENALTY);
    }
}
