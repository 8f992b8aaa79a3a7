//! Drives the world and the level controller as one game session.

use anyhow::{bail, Context, Result};
use gesture_maze_core::{Command, Event, GameState};
use gesture_maze_system_level_control::{Config, LevelControl};
use gesture_maze_system_pathfinding::find_path;
use gesture_maze_world::{self as world, query, World};
use tracing::warn;

use crate::settings::Settings;

/// World plus the systems that answer its events.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    control: LevelControl,
}

impl Session {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            world: World::with_rules(settings.rules),
            control: LevelControl::new(Config::new(settings.grid_size, settings.seed)),
        }
    }

    pub(crate) const fn world(&self) -> &World {
        &self.world
    }

    /// Applies `command` and pumps the level controller until no commands remain.
    ///
    /// Returns every event emitted along the way in order.
    ///
    /// # Errors
    ///
    /// Fails when a level was requested but the controller produced none.
    pub(crate) fn submit(&mut self, command: Command) -> Result<Vec<Event>> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        let mut requested = None;
        world::apply(&mut self.world, command, &mut events);

        loop {
            log.extend(events.iter().cloned());
            for event in &events {
                if let Event::LevelRequested { level } = event {
                    requested = Some(*level);
                }
            }

            let mut commands = Vec::new();
            self.control.handle(&events, &mut commands);
            if commands.is_empty() {
                break;
            }

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        if let Some(level) = requested {
            if matches!(
                query::state(&self.world),
                GameState::Idle | GameState::LevelComplete
            ) {
                bail!("no layout could be generated for level {level}");
            }
        }
        Ok(log)
    }

    /// Walks the shortest route to the goal of the active level.
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Fails when the session is not playing, the level has no route, or the
    /// next level cannot be generated.
    pub(crate) fn solve_level(&mut self) -> Result<usize> {
        let state = query::state(&self.world);
        if state != GameState::Playing {
            bail!("session is {state:?}, not playing");
        }

        let path = find_path(
            query::grid(&self.world),
            query::player(&self.world),
            query::goal(&self.world),
        );
        if path.is_empty() {
            warn!(level = query::level(&self.world), "active level has no route");
            bail!("active level has no route");
        }

        let mut steps = 0;
        for pair in path.cells().windows(2) {
            let direction = pair[0]
                .direction_to(pair[1])
                .context("route cells are not adjacent")?;
            let _ = self.submit(Command::MovePlayer { direction })?;
            steps += 1;
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use gesture_maze_core::{CellCoord, Direction};
    use gesture_maze_world::Rules;

    use super::*;

    fn session() -> Session {
        Session::new(&Settings {
            grid_size: 10,
            seed: 21,
            rules: Rules::default(),
        })
    }

    #[test]
    fn start_loads_first_level() {
        let mut session = session();
        let events = session.submit(Command::StartGame).expect("level loads");

        assert!(events.contains(&Event::LevelRequested { level: 1 }));
        assert!(events.iter().any(|event| matches!(event, Event::LevelLoaded { level: 1, .. })));
        assert_eq!(query::state(session.world()), GameState::Playing);
    }

    #[test]
    fn solving_advances_to_next_level() {
        let mut session = session();
        let _ = session.submit(Command::StartGame).expect("level loads");

        let steps = session.solve_level().expect("first level is solvable");

        assert_eq!(steps, 8);
        assert_eq!(query::level(session.world()), 2);
        assert_eq!(query::score(session.world()), 1_000 - 8);
    }

    #[test]
    fn restart_resets_progress() {
        let mut session = session();
        let _ = session.submit(Command::StartGame).expect("level loads");
        let _ = session.solve_level();
        let _ = session.submit(Command::MovePlayer {
            direction: Direction::Up,
        });

        let _ = session.submit(Command::StartGame).expect("level loads");

        assert_eq!(query::level(session.world()), 1);
        assert_eq!(query::score(session.world()), 1_000);
        assert_eq!(query::player(session.world()), CellCoord::new(0, 0));
    }

    #[test]
    fn idle_session_cannot_be_solved() {
        let mut session = session();
        assert!(session.solve_level().is_err());
    }

    #[test]
    fn failed_generation_is_reported() {
        let mut session = Session::new(&Settings {
            grid_size: 3,
            seed: 21,
            rules: Rules::default(),
        });

        let error = session
            .submit(Command::StartGame)
            .expect_err("grid below the minimum cannot be generated");

        assert!(error.to_string().contains("level 1"));
        assert_eq!(query::state(session.world()), GameState::Idle);
    }

    #[test]
    fn moves_without_level_requests_succeed() {
        let mut session = session();
        let events = session
            .submit(Command::MovePlayer {
                direction: Direction::Right,
            })
            .expect("no level was requested");
        assert!(!events.is_empty());
    }
}
