//! Move rejection taxonomy and special-move resolvers.
//!
//! Every rejection is recoverable by retry: a rejected move leaves the
//! position exactly as it was, and the front end re-prompts.

mod castling;
mod en_passant;

pub(crate) use castling::{castle_request, try_castle};
pub(crate) use en_passant::en_passant_target;

use gambit_core::Cell;
use thiserror::Error;

/// Why an attempted move was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("no piece at {0}")]
    NoPieceAtOrigin(Cell),

    #[error("the piece at {0} is not yours")]
    NotYourPiece(Cell),

    #[error("the piece cannot move from {from} to {to}")]
    GeometryInvalid { from: Cell, to: Cell },

    #[error("that move would leave your king in check")]
    KingWouldBeInCheck,

    #[error("cannot castle: {0}")]
    Castle(#[from] CastleBlocked),
}

/// Castling precondition failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CastleBlocked {
    #[error("the rook has already moved")]
    RookHasMoved,

    #[error("the king is in check")]
    KingInCheck,

    #[error("a piece blocks the king's path")]
    PathBlocked,

    #[error("the king would pass through check")]
    PathChecked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages() {
        let err = MoveError::NoPieceAtOrigin(Cell::at(4, 4));
        assert_eq!(err.to_string(), "no piece at e4");

        let err = MoveError::GeometryInvalid {
            from: Cell::at(6, 4),
            to: Cell::at(3, 4),
        };
        assert_eq!(err.to_string(), "the piece cannot move from e2 to e5");

        let err = MoveError::from(CastleBlocked::RookHasMoved);
        assert_eq!(err.to_string(), "cannot castle: the rook has already moved");
    }
}
