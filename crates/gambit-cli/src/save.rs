//! Save-file persistence.
//!
//! A save file holds the move history, one move per line, each rendered
//! as two bracketed (rank, file) pairs:
//!
//! ```text
//! [6, 4] [4, 4]
//! [1, 3] [3, 3]
//! ```
//!
//! Loading replays the file in order through the same validated move path
//! used interactively, so a save file can never smuggle in an illegal
//! position.

use gambit_core::notation::{self, NotationError};
use gambit_engine::{Game, ReplayError};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when saving or loading a game.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Failed to read or write the save file.
    #[error("failed to access save file: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the save file does not parse.
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        source: NotationError,
    },

    /// A parsed move was rejected during replay.
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Writes the game's history to `path`.
pub fn save_game(path: &Path, game: &Game) -> Result<(), SaveError> {
    let mut contents = String::new();
    for record in game.history() {
        contents.push_str(&notation::format_line(record.from, record.to));
        contents.push('\n');
    }
    fs::write(path, contents)?;
    tracing::info!("Saved {} moves to {}", game.history().len(), path.display());
    Ok(())
}

/// Reads a save file and reconstructs the game by replay. Blank lines are
/// ignored.
pub fn load_game(path: &Path) -> Result<Game, SaveError> {
    let text = fs::read_to_string(path)?;
    let mut moves = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let pair = notation::parse_line(line).map_err(|source| SaveError::Malformed {
            line: i + 1,
            source,
        })?;
        moves.push(pair);
    }
    let game = Game::replay(&moves)?;
    tracing::info!("Loaded {} moves from {}", moves.len(), path.display());
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_core::Cell;

    fn cell(s: &str) -> Cell {
        notation::parse_cell(s).unwrap()
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut game = Game::new();
        game.attempt_move(cell("e2"), cell("e4")).unwrap();
        game.attempt_move(cell("e7"), cell("e5")).unwrap();
        game.attempt_move(cell("g1"), cell("f3")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        save_game(&path, &game).unwrap();

        let loaded = load_game(&path).unwrap();
        assert_eq!(*loaded.position(), *game.position());
        assert_eq!(loaded.current_color(), game.current_color());
        assert_eq!(loaded.history().len(), 3);
    }

    #[test]
    fn saved_lines_use_the_bracket_format() {
        let mut game = Game::new();
        game.attempt_move(cell("e2"), cell("e4")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        save_game(&path, &game).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[6, 4] [4, 4]\n");
    }

    #[test]
    fn load_rejects_a_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        fs::write(&path, "[6, 4] [4, 4]\nnonsense\n").unwrap();

        let err = load_game(&path).unwrap_err();
        assert!(matches!(err, SaveError::Malformed { line: 2, .. }));
    }

    #[test]
    fn load_rejects_an_illegal_move() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        // the second move tries to push a pawn three ranks
        fs::write(&path, "[6, 4] [4, 4]\n[1, 0] [4, 0]\n").unwrap();

        let err = load_game(&path).unwrap_err();
        assert!(matches!(err, SaveError::Replay(_)));
    }

    #[test]
    fn load_ignores_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        fs::write(&path, "[6, 4] [4, 4]\n\n[1, 4] [3, 4]\n").unwrap();

        let loaded = load_game(&path).unwrap();
        assert_eq!(loaded.history().len(), 2);
    }
}
