//! ASCII presentation of the board, the HUD and notable events.

use std::fmt::Write as _;

use gesture_maze_core::{CellCoord, CollisionKind, Event, MoveRejection};
use gesture_maze_world::{query, World};

const WALL: char = '#';
const OPEN: char = '.';
const PLAYER: char = '@';
const GOAL: char = 'G';
const START: char = 'S';
const ENEMY: char = 'E';
const VISITED: char = '+';

/// Draws the active grid, one row per line.
pub(crate) fn board(world: &World) -> String {
    let grid = query::grid(world);
    let size = grid.size();
    let mut out = String::with_capacity((size as usize + 1) * size as usize);

    for row in 0..size {
        for column in 0..size {
            out.push(symbol(world, CellCoord::new(column, row)));
        }
        out.push('\n');
    }
    out
}

fn symbol(world: &World, cell: CellCoord) -> char {
    if cell == query::player(world) {
        PLAYER
    } else if cell == query::goal(world) {
        GOAL
    } else if cell == query::start(world) {
        START
    } else if query::enemy_spawns(world).contains(&cell) {
        ENEMY
    } else if !query::grid(world).is_open(cell) {
        WALL
    } else if query::is_visited(world, cell) {
        VISITED
    } else {
        OPEN
    }
}

/// Single status line with level, score and lives.
pub(crate) fn hud(world: &World) -> String {
    let mut line = format!(
        "level {} | score {} | lives {}",
        query::level(world),
        query::score(world),
        query::lives(world)
    );
    if let Some(generator) = query::generator(world) {
        let _ = write!(line, " | {generator} maze");
    }
    line
}

/// Player-facing message for events worth announcing.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let message = match event {
        Event::LevelLoaded {
            level,
            goal,
            generator,
            ..
        } => format!("Level {level}: reach {goal} through the {generator} maze."),
        Event::Collision { kind } => match kind {
            CollisionKind::Wall => "Ouch, that's a wall.".to_owned(),
            CollisionKind::Projectile => "Hit by a projectile.".to_owned(),
            CollisionKind::Enemy => "Caught by an enemy.".to_owned(),
        },
        Event::MoveRejected { reason, .. } => match reason {
            MoveRejection::OutOfBounds => "You can't leave the grid.".to_owned(),
            MoveRejection::AlreadyVisited => "You've already been there.".to_owned(),
            MoveRejection::NotPlaying => "No level in progress, press r to restart.".to_owned(),
        },
        Event::LevelCompleted { level } => format!("Level {level} complete!"),
        Event::GameOver {
            final_score,
            final_level,
        } => format!("Game over on level {final_level} with {final_score} points. Press r to restart."),
        _ => return None,
    };
    Some(message)
}
