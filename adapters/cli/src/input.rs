//! Keyboard tokens accepted by the interactive loop.

use std::{fmt, str::FromStr};

use gesture_maze_core::Direction;

/// Single action decoded from one line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Step the player one cell.
    Move(Direction),
    /// Reset score, lives and level.
    Restart,
    /// Leave the game.
    Quit,
}

impl FromStr for Input {
    type Err = UnknownInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim().to_ascii_lowercase();
        match token.as_str() {
            "r" | "restart" => Ok(Self::Restart),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => token
                .parse::<Direction>()
                .map(Self::Move)
                .map_err(|_| UnknownInput(token)),
        }
    }
}

/// Input token that does not map to any action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UnknownInput(String);

impl fmt::Display for UnknownInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognised input '{}': use w/a/s/d, up/down/left/right, r or q",
            self.0
        )
    }
}
