//! Castling resolution.
//!
//! A castle is requested by moving the king onto its own rook's cell. The
//! request shape (never-moved king, live friendly rook at the
//! destination) is what routes a move down this path; once routed, every
//! failed precondition is a hard rejection, never a fall-through to
//! ordinary validation.

use gambit_core::{Cell, PieceKind};

use super::{CastleBlocked, MoveError};
use crate::position::{PieceId, Position};

/// Recognizes a castling request: the selected piece is a king that has
/// never moved and `to` holds a live friendly rook. Returns that rook.
pub(crate) fn castle_request(position: &Position, id: PieceId, to: Cell) -> Option<PieceId> {
    let piece = position.piece(id);
    if piece.kind() != PieceKind::King || piece.has_moved() {
        return None;
    }
    let rook_id = position.occupant(to)?;
    let rook = position.piece(rook_id);
    (rook.kind() == PieceKind::Rook && rook.color() == piece.color()).then_some(rook_id)
}

/// Runs the castling precondition chain and, if every check passes, moves
/// the king two cells toward the rook and the rook to the cell adjacent
/// on the far side. The position is untouched on rejection.
///
/// Returns true for a kingside castle, false for queenside.
pub(crate) fn try_castle(
    position: &mut Position,
    king_id: PieceId,
    rook_id: PieceId,
) -> Result<bool, MoveError> {
    if position.piece(rook_id).has_moved() {
        return Err(CastleBlocked::RookHasMoved.into());
    }

    let king = position.piece(king_id);
    let color = king.color();
    let king_cell = king.cell();
    let rook_cell = position.piece(rook_id).cell();
    if position.king_in_check(color) {
        return Err(CastleBlocked::KingInCheck.into());
    }

    let step: i8 = if rook_cell.file() > king_cell.file() {
        1
    } else {
        -1
    };
    // the two cells the king crosses, final cell inclusive
    let (Some(passed), Some(destination)) =
        (king_cell.offset(0, step), king_cell.offset(0, 2 * step))
    else {
        return Err(CastleBlocked::PathBlocked.into());
    };
    for cell in [passed, destination] {
        if position.occupant(cell).is_some() {
            return Err(CastleBlocked::PathBlocked.into());
        }
        if position.check_after_move(king_id, cell) {
            return Err(CastleBlocked::PathChecked.into());
        }
    }

    position.move_piece(king_id, destination);
    position.move_piece(rook_id, passed);
    Ok(step > 0)
}
