//! Position state: both players' pieces and king-safety simulation.

use gambit_core::{Cell, Color, Piece, PieceKind, Vector};

/// One side: a color and the ordered pieces it owns.
///
/// The collection starts at 16 pieces in the standard placement and only
/// ever grows (promotion appends; captures tombstone in place), so a
/// piece's index is stable for the whole game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    pieces: Vec<Piece>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Player {
    /// Sets up the standard initial placement for `color`.
    pub fn new(color: Color) -> Self {
        let mut pieces = Vec::with_capacity(16);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            pieces.push(Piece::new(
                kind,
                color,
                Cell::at(color.back_rank(), file as u8),
            ));
        }
        for file in 0..8u8 {
            pieces.push(Piece::new(
                PieceKind::Pawn,
                color,
                Cell::at(color.pawn_rank(), file),
            ));
        }
        Player { color, pieces }
    }

    /// Creates a player with no pieces, for building custom positions.
    pub fn empty(color: Color) -> Self {
        Player {
            color,
            pieces: Vec::new(),
        }
    }

    /// Returns the player's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the player's pieces, dead ones included.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
}

/// Identifies a piece by its owner and slot in that player's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceId {
    color: Color,
    index: usize,
}

/// The full piece set for both players, queried as one flat collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    players: [Player; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        Position {
            players: [Player::new(Color::White), Player::new(Color::Black)],
        }
    }

    /// Creates a position with no pieces. Populate it with [`place`].
    ///
    /// [`place`]: Position::place
    pub fn empty() -> Self {
        Position {
            players: [Player::empty(Color::White), Player::empty(Color::Black)],
        }
    }

    /// Adds a piece to its owner's collection and returns its id.
    pub fn place(&mut self, piece: Piece) -> PieceId {
        let player = &mut self.players[piece.color().index()];
        player.pieces.push(piece);
        PieceId {
            color: piece.color(),
            index: player.pieces.len() - 1,
        }
    }

    /// Returns one side.
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Returns the piece with the given id.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.players[id.color.index()].pieces[id.index]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.players[id.color.index()].pieces[id.index]
    }

    /// Iterates over every piece of both players, dead ones included, in
    /// a stable order: all of White's, then all of Black's.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.players.iter().flat_map(|player| {
            player.pieces.iter().enumerate().map(move |(index, piece)| {
                (
                    PieceId {
                        color: player.color,
                        index,
                    },
                    piece,
                )
            })
        })
    }

    /// Iterates over one side's live pieces.
    pub fn live_pieces(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.player(color)
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.is_alive())
            .map(move |(index, piece)| (PieceId { color, index }, piece))
    }

    /// Returns the live piece occupying `cell`, if any.
    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        self.pieces()
            .find(|(_, piece)| piece.is_alive() && piece.cell() == cell)
            .map(|(id, _)| id)
    }

    /// Returns the color of the live piece occupying `cell`, if any.
    pub fn occupant_color(&self, cell: Cell) -> Option<Color> {
        self.occupant(cell).map(|id| self.piece(id).color())
    }

    /// Returns the live king of `color`, if present.
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.live_pieces(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(id, _)| id)
    }

    /// Returns true if `color` still has a live piece.
    pub fn has_live_piece(&self, color: Color) -> bool {
        self.live_pieces(color).next().is_some()
    }

    /// Returns true iff `target` is reachable from the piece's cell by
    /// repeating one of `vectors` 1..=`max_displacement` times.
    ///
    /// The walk along a vector stops at the board edge or at the first
    /// occupied cell; the stopping cell itself is a hit when it is the
    /// target, cells beyond it never are. The piece's own cell, and any
    /// cell held by a live friendly piece, are unreachable.
    pub fn sees(
        &self,
        id: PieceId,
        target: Cell,
        vectors: &[Vector],
        max_displacement: u8,
    ) -> bool {
        let piece = self.piece(id);
        let origin = piece.cell();
        if target == origin {
            return false;
        }
        if self.occupant_color(target) == Some(piece.color()) {
            return false;
        }
        for &(rank_delta, file_delta) in vectors {
            for step in 1..=max_displacement as i8 {
                let Some(cell) = origin.offset(rank_delta * step, file_delta * step) else {
                    break;
                };
                if cell == target {
                    return true;
                }
                if self.occupant(cell).is_some() {
                    break;
                }
            }
        }
        false
    }

    /// Returns true if the piece attacks `target`: [`sees`] over its
    /// attack vectors at its natural displacement.
    ///
    /// [`sees`]: Position::sees
    pub fn attacks(&self, id: PieceId, target: Cell) -> bool {
        let piece = self.piece(id);
        self.sees(
            id,
            target,
            piece.kind().attack_vectors(piece.color()),
            piece.kind().max_displacement(),
        )
    }

    /// Decides ordinary geometric validity of moving the piece to
    /// `target`.
    ///
    /// Attack vectors apply iff the target currently holds a live enemy,
    /// move vectors otherwise; a pawn therefore can never push straight
    /// onto an occupied cell. A pawn that has not moved yet gets a
    /// displacement allowance of 2.
    pub fn valid_move(&self, id: PieceId, target: Cell) -> bool {
        let piece = self.piece(id);
        let target_holds_enemy = self
            .occupant_color(target)
            .is_some_and(|color| color != piece.color());
        let vectors = if target_holds_enemy {
            piece.kind().attack_vectors(piece.color())
        } else {
            piece.kind().move_vectors(piece.color())
        };
        let max_displacement = if piece.kind() == PieceKind::Pawn && !piece.has_moved() {
            2
        } else {
            piece.kind().max_displacement()
        };
        self.sees(id, target, vectors, max_displacement)
    }

    /// Returns true iff any live opposing piece attacks the live king of
    /// `color`.
    pub fn king_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king(color) else {
            return false;
        };
        let king_cell = self.piece(king).cell();
        self.live_pieces(color.opposite())
            .any(|(id, _)| self.attacks(id, king_cell))
    }

    /// Simulates moving the piece to `target` and reports whether its own
    /// king would be attacked afterwards.
    ///
    /// The simulation tombstones any live occupant of the target,
    /// relocates the piece, reads [`king_in_check`], then rolls
    /// everything back: cell, has-moved flag, and the occupant's
    /// liveness. The position compares equal to its pre-call state on
    /// return.
    ///
    /// [`king_in_check`]: Position::king_in_check
    pub fn check_after_move(&mut self, id: PieceId, target: Cell) -> bool {
        let piece = self.piece(id);
        let color = piece.color();
        let origin = piece.cell();
        let had_moved = piece.has_moved();
        debug_assert_ne!(origin, target);

        let captured = self.occupant(target);
        if let Some(captured) = captured {
            self.piece_mut(captured).kill();
        }
        self.piece_mut(id).relocate(target);

        let in_check = self.king_in_check(color);

        self.piece_mut(id).restore(origin, had_moved);
        if let Some(captured) = captured {
            self.piece_mut(captured).revive();
        }
        in_check
    }

    /// Applies a move: any live occupant of `target` is tombstoned
    /// (capture-by-overwrite) and the piece is relocated with its
    /// has-moved flag set. Legality is the caller's responsibility.
    /// Returns the captured piece's id, if any.
    pub(crate) fn move_piece(&mut self, id: PieceId, target: Cell) -> Option<PieceId> {
        let captured = self.occupant(target);
        if let Some(captured) = captured {
            self.piece_mut(captured).kill();
        }
        self.piece_mut(id).relocate(target);
        captured
    }

    /// Replaces a pawn that reached its promotion rank: the pawn is
    /// tombstoned and a new piece of `kind` joins the owner's collection
    /// at the same cell. Anything other than Queen/Rook/Bishop/Knight
    /// becomes a Queen. Returns the kind actually created.
    pub(crate) fn promote(&mut self, id: PieceId, kind: PieceKind) -> PieceKind {
        let kind = if kind.is_promotion_choice() {
            kind
        } else {
            PieceKind::Queen
        };
        let pawn = self.piece(id);
        let (color, cell) = (pawn.color(), pawn.cell());
        self.piece_mut(id).kill();
        self.place(Piece::promoted(kind, color, cell));
        kind
    }

    /// Returns true if `color` has any destination that passes both
    /// geometry and king-safety simulation. Drives checkmate and
    /// stalemate classification.
    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let ids: Vec<PieceId> = self.live_pieces(color).map(|(id, _)| id).collect();
        for id in ids {
            for cell in Cell::all() {
                if self.valid_move(id, cell) && !self.check_after_move(id, cell) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id_at(position: &Position, cell: Cell) -> PieceId {
        position.occupant(cell).unwrap()
    }

    #[test]
    fn standard_setup() {
        let position = Position::new();
        assert_eq!(position.pieces().count(), 32);
        assert_eq!(
            position.piece(id_at(&position, Cell::at(7, 4))).kind(),
            PieceKind::King
        );
        assert_eq!(
            position.piece(id_at(&position, Cell::at(0, 3))).kind(),
            PieceKind::Queen
        );
        assert_eq!(
            position.occupant_color(Cell::at(6, 0)),
            Some(Color::White)
        );
        assert_eq!(position.occupant(Cell::at(4, 4)), None);
    }

    #[test]
    fn rook_is_blocked_by_the_first_occupied_cell() {
        let mut position = Position::empty();
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, Cell::at(7, 0)));
        position.place(Piece::new(PieceKind::Pawn, Color::Black, Cell::at(4, 0)));

        // up to and including the blocker
        assert!(position.valid_move(rook, Cell::at(6, 0)));
        assert!(position.valid_move(rook, Cell::at(5, 0)));
        assert!(position.valid_move(rook, Cell::at(4, 0)));
        // never beyond it
        assert!(!position.valid_move(rook, Cell::at(3, 0)));
        assert!(!position.valid_move(rook, Cell::at(0, 0)));
    }

    #[test]
    fn friendly_occupant_is_unreachable() {
        let mut position = Position::empty();
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, Cell::at(7, 0)));
        position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(4, 0)));

        assert!(!position.valid_move(rook, Cell::at(4, 0)));
        assert!(position.valid_move(rook, Cell::at(5, 0)));
    }

    #[test]
    fn dead_pieces_do_not_block() {
        let mut position = Position::empty();
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, Cell::at(7, 0)));
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::Black, Cell::at(4, 0)));
        position.piece_mut(pawn).kill();

        assert!(position.valid_move(rook, Cell::at(0, 0)));
    }

    #[test]
    fn own_cell_is_never_a_destination() {
        let position = Position::new();
        let rook = id_at(&position, Cell::at(7, 0));
        assert!(!position.valid_move(rook, Cell::at(7, 0)));
    }

    #[test]
    fn pawn_cannot_push_onto_an_occupied_cell() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(6, 4)));
        position.place(Piece::new(PieceKind::Knight, Color::Black, Cell::at(5, 4)));

        // enemy dead ahead forces attack vectors, which do not point there
        assert!(!position.valid_move(pawn, Cell::at(5, 4)));
        assert!(!position.valid_move(pawn, Cell::at(4, 4)));
    }

    #[test]
    fn pawn_double_step_only_before_moving() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(6, 4)));

        assert!(position.valid_move(pawn, Cell::at(5, 4)));
        assert!(position.valid_move(pawn, Cell::at(4, 4)));

        position.move_piece(pawn, Cell::at(4, 4));
        assert!(position.valid_move(pawn, Cell::at(3, 4)));
        assert!(!position.valid_move(pawn, Cell::at(2, 4)));
    }

    #[test]
    fn pawn_double_step_cannot_jump_a_blocker() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(6, 4)));
        position.place(Piece::new(PieceKind::Knight, Color::Black, Cell::at(5, 4)));

        assert!(!position.valid_move(pawn, Cell::at(4, 4)));
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(6, 4)));
        position.place(Piece::new(PieceKind::Knight, Color::Black, Cell::at(5, 3)));

        assert!(position.valid_move(pawn, Cell::at(5, 3)));
        // empty diagonal is a move-vector case, and pawns do not move there
        assert!(!position.valid_move(pawn, Cell::at(5, 5)));
    }

    #[test]
    fn knight_jumps_over_blockers() {
        let position = Position::new();
        let knight = id_at(&position, Cell::at(7, 1));
        assert!(position.valid_move(knight, Cell::at(5, 2)));
        assert!(position.valid_move(knight, Cell::at(5, 0)));
        assert!(!position.valid_move(knight, Cell::at(5, 1)));
    }

    #[test]
    fn king_in_check_by_rook() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(7, 4)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, Cell::at(0, 4)));

        assert!(position.king_in_check(Color::White));
        assert!(!position.king_in_check(Color::Black));
    }

    #[test]
    fn blocked_rook_gives_no_check() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(7, 4)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, Cell::at(0, 4)));
        position.place(Piece::new(PieceKind::Pawn, Color::White, Cell::at(5, 4)));

        assert!(!position.king_in_check(Color::White));
    }

    #[test]
    fn check_after_move_restores_the_position_exactly() {
        let mut position = Position::new();
        let before = position.clone();

        let pawn = id_at(&position, Cell::at(6, 4));
        position.check_after_move(pawn, Cell::at(4, 4));
        assert_eq!(position, before);

        // a capture is rolled back too, liveness included
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(7, 4)));
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, Cell::at(7, 0)));
        position.place(Piece::new(PieceKind::Queen, Color::Black, Cell::at(0, 0)));
        let before = position.clone();

        position.check_after_move(rook, Cell::at(0, 0));
        assert_eq!(position, before);
    }

    #[test]
    fn check_after_move_detects_pins() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(7, 4)));
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, Cell::at(5, 4)));
        position.place(Piece::new(PieceKind::Queen, Color::Black, Cell::at(0, 4)));

        // the rook is pinned to the file; stepping aside exposes the king
        assert!(position.check_after_move(rook, Cell::at(5, 0)));
        // sliding along the pin is fine
        assert!(!position.check_after_move(rook, Cell::at(3, 4)));
    }

    #[test]
    fn has_legal_move_finds_an_escape() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(7, 4)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, Cell::at(0, 4)));

        assert!(position.has_legal_move(Color::White));
    }

    #[test]
    fn has_legal_move_reports_a_smothered_corner() {
        // black king cornered by queen and king: no legal move remains
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::Black, Cell::at(0, 7)));
        position.place(Piece::new(PieceKind::Queen, Color::White, Cell::at(1, 5)));
        position.place(Piece::new(PieceKind::King, Color::White, Cell::at(2, 6)));

        assert!(!position.has_legal_move(Color::Black));
    }

    proptest! {
        // sees never reports a target strictly beyond the first blocker
        // along a vector
        #[test]
        fn sees_stops_at_the_first_blocker(
            rank in 0u8..8,
            blocker_file in 1u8..7,
            target_file in 0u8..8,
        ) {
            prop_assume!(target_file > blocker_file);

            let mut position = Position::empty();
            let rook = position.place(Piece::new(
                PieceKind::Rook,
                Color::White,
                Cell::at(rank, 0),
            ));
            position.place(Piece::new(
                PieceKind::Knight,
                Color::Black,
                Cell::at(rank, blocker_file),
            ));

            let target = Cell::at(rank, target_file);
            let vectors = PieceKind::Rook.move_vectors(Color::White);
            prop_assert!(!position.sees(rook, target, vectors, 7));
        }
    }
}
