//! Session settings merged from the optional TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use gesture_maze_core::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use gesture_maze_system_level_control::MIN_GRID_SIZE;
use gesture_maze_world::Rules;
use serde::Deserialize;
use tracing::debug;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    size: Option<u32>,
    seed: Option<u64>,
    rules: Rules,
}

impl FileConfig {
    /// Reads and parses the TOML file at `path`.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid config toml")
    }
}

/// Fully resolved settings for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) grid_size: u32,
    pub(crate) seed: u64,
    pub(crate) rules: Rules,
}

impl Settings {
    /// Merges flags over file values over defaults.
    ///
    /// `fallback_seed` is only invoked when neither source names a seed.
    pub(crate) fn resolve(
        size: Option<u32>,
        seed: Option<u64>,
        file: FileConfig,
        fallback_seed: impl FnOnce() -> u64,
    ) -> Result<Self> {
        let grid_size = size.or(file.size).unwrap_or(DEFAULT_GRID_SIZE);
        ensure!(
            grid_size >= MIN_GRID_SIZE,
            "grid size {} is below the minimum of {}",
            grid_size,
            MIN_GRID_SIZE
        );
        ensure!(
            grid_size <= MAX_GRID_SIZE,
            "grid size {} exceeds the maximum of {}",
            grid_size,
            MAX_GRID_SIZE
        );

        Ok(Self {
            grid_size,
            seed: seed.or(file.seed).unwrap_or_else(fallback_seed),
            rules: file.rules,
        })
    }
}
