//! Game state machine: turn sequencing, history, and terminal
//! classification.

use gambit_core::{Cell, Color, MoveRecord, Piece, PieceKind};
use thiserror::Error;

use crate::position::Position;
use crate::rules::{self, MoveError};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// Stalemate: the side to move has no legal move but is not in check.
    Draw,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "Checkmate! White wins."),
            GameResult::BlackWins => write!(f, "Checkmate! Black wins."),
            GameResult::Draw => write!(f, "Stalemate. The game is a draw."),
        }
    }
}

/// What an accepted move did, so the front end can announce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedMove {
    /// An ordinary move; `capture` reports whether a piece was taken.
    Moved { capture: bool },
    /// An en passant capture.
    EnPassant,
    /// A castle; `kingside` tells which wing.
    Castled { kingside: bool },
    /// A pawn move that ended in promotion to `kind`.
    Promoted { kind: PieceKind, capture: bool },
}

/// A persisted move that fails to replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("move {index} does not replay: {source}")]
pub struct ReplayError {
    /// 1-based index of the offending move, matching its save-file line.
    pub index: usize,
    source: MoveError,
}

/// A complete game: the position, whose turn it is, the move history,
/// and the result once the game has ended.
///
/// Turn state is the fixed White/Black order plus an index; there is no
/// other turn bookkeeping. Every accepted move appends a pre-move
/// snapshot to the append-only history.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    /// Index into [`Color::ALL`]; White moves first.
    current: usize,
    history: Vec<MoveRecord>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game at the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            position: Position::new(),
            current: 0,
            history: Vec::new(),
            result: None,
        }
    }

    /// Creates a game from a custom position. The game ends immediately
    /// if `to_move` already has no legal move.
    pub fn from_position(position: Position, to_move: Color) -> Self {
        let mut game = Game {
            position,
            current: to_move.index(),
            history: Vec::new(),
            result: None,
        };
        game.classify_current();
        game
    }

    /// Reconstructs a game by replaying persisted moves through the same
    /// validated path used interactively. Promotions take the Queen
    /// default; the persisted format does not record the choice.
    pub fn replay(moves: &[(Cell, Cell)]) -> Result<Self, ReplayError> {
        let mut game = Game::new();
        for (index, &(from, to)) in moves.iter().enumerate() {
            game.attempt_move(from, to).map_err(|source| ReplayError {
                index: index + 1,
                source,
            })?;
        }
        Ok(game)
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the color to move.
    pub fn current_color(&self) -> Color {
        Color::ALL[self.current]
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns an ordered snapshot of every piece, dead ones included,
    /// for rendering.
    pub fn pieces_snapshot(&self) -> Vec<Piece> {
        self.position.pieces().map(|(_, piece)| *piece).collect()
    }

    /// Returns true if `color`'s king is currently attacked.
    /// Informational: check never blocks play by itself.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.position.king_in_check(color)
    }

    /// Returns true if `color` is checkmated: in check with no move that
    /// escapes it.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.position.has_live_piece(color)
            && self.position.king_in_check(color)
            && !self.position.clone().has_legal_move(color)
    }

    /// Returns true if `color` is stalemated: not in check but with no
    /// legal move. Mutually exclusive with [`is_checkmate`] by the check
    /// condition.
    ///
    /// [`is_checkmate`]: Game::is_checkmate
    pub fn is_stalemate(&self, color: Color) -> bool {
        self.position.has_live_piece(color)
            && !self.position.king_in_check(color)
            && !self.position.clone().has_legal_move(color)
    }

    /// Returns true if moving `from` to `to` would trigger promotion,
    /// letting the front end ask for a kind before submitting the move.
    pub fn would_promote(&self, from: Cell, to: Cell) -> bool {
        let Some(id) = self.position.occupant(from) else {
            return false;
        };
        let piece = self.position.piece(id);
        piece.kind() == PieceKind::Pawn
            && piece.color() == self.current_color()
            && to.rank() == piece.color().promotion_rank()
    }

    /// Attempts a move for the side to move. Promotions, if triggered,
    /// take the Queen default.
    pub fn attempt_move(&mut self, from: Cell, to: Cell) -> Result<AppliedMove, MoveError> {
        self.attempt(from, to, PieceKind::Queen)
    }

    /// Attempts a move with an explicit promotion choice, applied only
    /// if the move actually promotes. Anything other than
    /// Queen/Rook/Bishop/Knight falls back to Queen.
    pub fn attempt_move_with_promotion(
        &mut self,
        from: Cell,
        to: Cell,
        promotion: PieceKind,
    ) -> Result<AppliedMove, MoveError> {
        self.attempt(from, to, promotion)
    }

    fn attempt(
        &mut self,
        from: Cell,
        to: Cell,
        promotion: PieceKind,
    ) -> Result<AppliedMove, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        let color = self.current_color();
        let id = self
            .position
            .occupant(from)
            .ok_or(MoveError::NoPieceAtOrigin(from))?;
        if self.position.piece(id).color() != color {
            return Err(MoveError::NotYourPiece(from));
        }

        // castling: the king onto its own unmoved rook's cell
        if let Some(rook_id) = rules::castle_request(&self.position, id, to) {
            let snapshot = *self.position.piece(id);
            let kingside = rules::try_castle(&mut self.position, id, rook_id)?;
            self.history.push(MoveRecord::new(snapshot, from, to));
            self.finish_turn();
            return Ok(AppliedMove::Castled { kingside });
        }

        // en passant bypasses ordinary geometry: the destination is empty
        if let Some(victim) = rules::en_passant_target(&self.position, &self.history, id, to) {
            self.position.piece_mut(victim).kill();
            if self.position.check_after_move(id, to) {
                self.position.piece_mut(victim).revive();
                return Err(MoveError::KingWouldBeInCheck);
            }
            let snapshot = *self.position.piece(id);
            self.history.push(MoveRecord::new(snapshot, from, to));
            self.position.move_piece(id, to);
            self.finish_turn();
            return Ok(AppliedMove::EnPassant);
        }

        if !self.position.valid_move(id, to) {
            return Err(MoveError::GeometryInvalid { from, to });
        }
        if self.position.check_after_move(id, to) {
            return Err(MoveError::KingWouldBeInCheck);
        }

        let snapshot = *self.position.piece(id);
        self.history.push(MoveRecord::new(snapshot, from, to));
        let capture = self.position.move_piece(id, to).is_some();

        let applied = if snapshot.kind() == PieceKind::Pawn && to.rank() == color.promotion_rank()
        {
            let kind = self.position.promote(id, promotion);
            AppliedMove::Promoted { kind, capture }
        } else {
            AppliedMove::Moved { capture }
        };

        self.finish_turn();
        Ok(applied)
    }

    /// Hands the turn over and classifies the new side to move.
    fn finish_turn(&mut self) {
        self.current = 1 - self.current;
        self.classify_current();
    }

    /// Ends the game if the side to move has no legal move: checkmate
    /// when in check, stalemate otherwise.
    fn classify_current(&mut self) {
        let color = self.current_color();
        if !self.position.has_live_piece(color) {
            return;
        }
        if self.position.has_legal_move(color) {
            return;
        }
        self.result = Some(if self.position.king_in_check(color) {
            match color {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            }
        } else {
            GameResult::Draw
        });
    }
}
