//! En passant resolution.
//!
//! The window is read off the last history entry: it must be an enemy
//! pawn's double-step landing beside the capturing pawn. The capture
//! bypasses ordinary geometry because the destination cell is empty.

use gambit_core::{Cell, MoveRecord, PieceKind};

use crate::position::{PieceId, Position};

/// Detects whether `(id, to)` matches the en passant window. Returns the
/// enemy pawn to capture when it does.
///
/// Preconditions, all required:
/// - the selected piece is a pawn sitting on its passing rank;
/// - the last recorded move was an enemy pawn's double-step from its
///   starting rank onto that same rank;
/// - `to` is one of the capturer's forward-diagonal attack cells and
///   shares the enemy pawn's file.
pub(crate) fn en_passant_target(
    position: &Position,
    history: &[MoveRecord],
    id: PieceId,
    to: Cell,
) -> Option<PieceId> {
    let piece = position.piece(id);
    if piece.kind() != PieceKind::Pawn {
        return None;
    }
    let color = piece.color();
    let last = history.last()?;
    if last.piece.kind() != PieceKind::Pawn || last.piece.color() != color.opposite() {
        return None;
    }
    if last.from.rank() != color.opposite().pawn_rank() || last.to.rank() != color.passing_rank() {
        return None;
    }
    if piece.cell().rank() != color.passing_rank() || to.file() != last.to.file() {
        return None;
    }
    let diagonal = PieceKind::Pawn
        .attack_vectors(color)
        .iter()
        .any(|&(rank_delta, file_delta)| piece.cell().offset(rank_delta, file_delta) == Some(to));
    if !diagonal {
        return None;
    }
    position.occupant(last.to)
}
