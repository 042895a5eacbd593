//! Turn-loop command parsing.

use gambit_core::notation::{self, NotationError};
use gambit_core::Cell;

/// A parsed line of player input.
///
/// Help, save, and quit are ordinary alternate outcomes of parsing, not
/// control-flow signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move a piece between two cells.
    Move(Cell, Cell),
    /// Show the command summary.
    Help,
    /// Save the game to a file.
    Save,
    /// End the session.
    Quit,
}

impl Command {
    /// Parses one input line. Anything that is neither a keyword nor a
    /// pair of cells is malformed input.
    pub fn parse(input: &str) -> Result<Self, NotationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "save" => Ok(Command::Save),
            "exit" | "quit" => Ok(Command::Quit),
            _ => {
                let (from, to) = notation::parse_move(input)?;
                Ok(Command::Move(from, to))
            }
        }
    }
}
