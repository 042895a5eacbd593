//! Human and persisted move notation.
//!
//! Two formats cross the engine boundary: algebraic cells typed by the
//! player ("e2 e4") and the save-file line format, which renders a move as
//! two bracketed (rank, file) pairs: `[6, 4] [4, 4]`.

use crate::Cell;
use thiserror::Error;

/// Errors raised when parsing player input or save-file lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed cell '{0}': expected a file letter a-h and a rank digit 1-8")]
    MalformedCell(String),

    #[error("malformed move '{0}': expected two cells, e.g. 'e2 e4'")]
    MalformedMove(String),

    #[error("malformed history line '{0}': expected two bracketed pairs, e.g. '[6, 4] [4, 4]'")]
    MalformedLine(String),
}

/// Parses a single algebraic cell such as "e2".
pub fn parse_cell(s: &str) -> Result<Cell, NotationError> {
    Cell::from_algebraic(s.trim()).ok_or_else(|| NotationError::MalformedCell(s.to_string()))
}

/// Parses a move entered as two cells, e.g. "e2 e4".
pub fn parse_move(s: &str) -> Result<(Cell, Cell), NotationError> {
    let mut parts = s.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NotationError::MalformedMove(s.trim().to_string()));
    };
    match (Cell::from_algebraic(from), Cell::from_algebraic(to)) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(NotationError::MalformedMove(s.trim().to_string())),
    }
}

/// Renders a move as a save-file line: `[rank, file] [rank, file]`.
pub fn format_line(from: Cell, to: Cell) -> String {
    format!(
        "[{}, {}] [{}, {}]",
        from.rank(),
        from.file(),
        to.rank(),
        to.file()
    )
}

/// Parses a save-file line produced by [`format_line`].
pub fn parse_line(s: &str) -> Result<(Cell, Cell), NotationError> {
    let malformed = || NotationError::MalformedLine(s.trim().to_string());

    let mut cells = Vec::with_capacity(2);
    let mut rest = s.trim();
    while !rest.is_empty() {
        let open = rest.find('[').ok_or_else(malformed)?;
        let close = rest.find(']').ok_or_else(malformed)?;
        if close < open {
            return Err(malformed());
        }
        cells.push(parse_pair(&rest[open + 1..close]).ok_or_else(malformed)?);
        rest = rest[close + 1..].trim_start();
    }
    match cells.as_slice() {
        &[from, to] => Ok((from, to)),
        _ => Err(malformed()),
    }
}

fn parse_pair(inner: &str) -> Option<Cell> {
    let (rank, file) = inner.split_once(',')?;
    let rank: u8 = rank.trim().parse().ok()?;
    let file: u8 = file.trim().parse().ok()?;
    Cell::new(rank, file)
}
