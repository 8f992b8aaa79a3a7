#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the gesture maze in a terminal.

mod input;
mod render;
mod session;
mod settings;

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use gesture_maze_core::Command;
use gesture_maze_world::query;
use rand::{rngs::OsRng, RngCore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use input::Input;
use session::Session;
use settings::{FileConfig, Settings};

/// Terminal maze game with keyboard input and a pathfinding autoplay demo.
#[derive(Debug, Parser)]
#[command(name = "gesture-maze", version)]
struct Args {
    /// Side length of every generated grid.
    #[arg(long)]
    size: Option<u32>,
    /// Seed for level generation; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file providing `size`, `seed` and a `[rules]` table.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Solve this many levels with the pathfinder instead of reading input.
    #[arg(long, value_name = "LEVELS")]
    autoplay: Option<u32>,
}

/// Entry point for the gesture maze command-line interface.
fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args.size, args.seed, file, || OsRng.next_u64())?;
    info!(
        grid_size = settings.grid_size,
        seed = settings.seed,
        "starting session"
    );

    let mut session = Session::new(&settings);
    println!("{}", query::welcome_banner(session.world()));

    match args.autoplay {
        Some(levels) => autoplay(&mut session, levels),
        None => interactive(&mut session),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn interactive(session: &mut Session) -> Result<()> {
    let _ = session.submit(Command::StartGame)?;
    redraw(session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Input>() {
            Ok(Input::Quit) => break,
            Ok(Input::Restart) => Command::StartGame,
            Ok(Input::Move(direction)) => Command::MovePlayer { direction },
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        for event in session.submit(command)? {
            if let Some(message) = render::describe(&event) {
                println!("{message}");
            }
        }
        redraw(session);
    }

    println!(
        "Final score {} on level {}.",
        query::score(session.world()),
        query::level(session.world())
    );
    Ok(())
}

fn autoplay(session: &mut Session, levels: u32) -> Result<()> {
    let _ = session.submit(Command::StartGame)?;

    for _ in 0..levels {
        let world = session.world();
        let level = query::level(world);
        let generator = query::generator(world);
        print!("{}", render::board(world));

        let steps = session
            .solve_level()
            .with_context(|| format!("autoplay could not solve level {level}"))?;
        match generator {
            Some(kind) => println!("level {level} ({kind}) solved in {steps} steps"),
            None => println!("level {level} solved in {steps} steps"),
        }
    }

    println!("{}", render::hud(session.world()));
    Ok(())
}

fn redraw(session: &Session) {
    let world = session.world();
    print!("{}", render::board(world));
    println!("{}", render::hud(world));
}
