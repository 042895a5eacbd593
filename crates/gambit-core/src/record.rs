//! Move history records.

use crate::{Cell, Piece};

/// A recorded move in game history.
///
/// `piece` is an independent snapshot of the moved piece as it was before
/// the move, not a reference to the live piece, so later mutation cannot
/// corrupt history. The last record drives en passant detection; the full
/// list drives save/replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The moved piece, as it was before the move.
    pub piece: Piece,
    /// Origin cell.
    pub from: Cell,
    /// Destination cell as entered. For castling this is the rook's cell,
    /// so replaying the record takes the castling path again.
    pub to: Cell,
}

impl MoveRecord {
    /// Creates a record from a pre-move snapshot.
    pub const fn new(piece: Piece, from: Cell, to: Cell) -> Self {
        MoveRecord { piece, from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    #[test]
    fn snapshot_is_independent_of_the_live_piece() {
        let mut live = Piece::new(PieceKind::Pawn, Color::White, Cell::at(6, 4));
        let record = MoveRecord::new(live, Cell::at(6, 4), Cell::at(4, 4));
        live.relocate(Cell::at(4, 4));
        live.kill();
        assert_eq!(record.piece.cell(), Cell::at(6, 4));
        assert!(!record.piece.has_moved());
        assert!(record.piece.is_alive());
    }
}
