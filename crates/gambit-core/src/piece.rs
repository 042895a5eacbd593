//! Piece kinds, movement geometry, and piece state.

use crate::{Cell, Color};

/// A movement direction as a (rank delta, file delta) step, repeated up to
/// a piece's maximum displacement.
pub type Vector = (i8, i8);

const UP: Vector = (-1, 0);
const DOWN: Vector = (1, 0);
const LEFT: Vector = (0, -1);
const RIGHT: Vector = (0, 1);
const UP_LEFT: Vector = (-1, -1);
const UP_RIGHT: Vector = (-1, 1);
const DOWN_LEFT: Vector = (1, -1);
const DOWN_RIGHT: Vector = (1, 1);

const ORTHOGONALS: [Vector; 4] = [UP, DOWN, LEFT, RIGHT];
const DIAGONALS: [Vector; 4] = [UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];
const ALL_DIRECTIONS: [Vector; 8] = [
    UP, DOWN, LEFT, RIGHT, UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT,
];
const KNIGHT_JUMPS: [Vector; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const WHITE_PAWN_PUSHES: [Vector; 1] = [UP];
const BLACK_PAWN_PUSHES: [Vector; 1] = [DOWN];
const WHITE_PAWN_CAPTURES: [Vector; 2] = [UP_LEFT, UP_RIGHT];
const BLACK_PAWN_CAPTURES: [Vector; 2] = [DOWN_LEFT, DOWN_RIGHT];

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Returns the vectors this kind moves along onto empty cells.
    ///
    /// Only the pawn's set depends on color: pawns push straight toward
    /// the enemy side.
    pub fn move_vectors(self, color: Color) -> &'static [Vector] {
        match self {
            PieceKind::King | PieceKind::Queen => &ALL_DIRECTIONS,
            PieceKind::Rook => &ORTHOGONALS,
            PieceKind::Bishop => &DIAGONALS,
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::Pawn => match color {
                Color::White => &WHITE_PAWN_PUSHES,
                Color::Black => &BLACK_PAWN_PUSHES,
            },
        }
    }

    /// Returns the vectors this kind captures along.
    ///
    /// Identical to the move vectors for every kind except the pawn,
    /// which captures on the forward diagonals only.
    pub fn attack_vectors(self, color: Color) -> &'static [Vector] {
        match self {
            PieceKind::Pawn => match color {
                Color::White => &WHITE_PAWN_CAPTURES,
                Color::Black => &BLACK_PAWN_CAPTURES,
            },
            _ => self.move_vectors(color),
        }
    }

    /// Returns how many times a vector may be repeated: 1 for the king,
    /// knight, and pawn; 7 (the longest line on the board) for the
    /// sliding pieces.
    #[inline]
    pub const fn max_displacement(self) -> u8 {
        match self {
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => 7,
            PieceKind::King | PieceKind::Knight | PieceKind::Pawn => 1,
        }
    }

    /// Returns true if a pawn may promote to this kind.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Returns the unicode board symbol for this kind in the given color.
    pub const fn symbol(self, color: Color) -> char {
        match (self, color) {
            (PieceKind::King, Color::White) => '♔',
            (PieceKind::Queen, Color::White) => '♕',
            (PieceKind::Rook, Color::White) => '♖',
            (PieceKind::Bishop, Color::White) => '♗',
            (PieceKind::Knight, Color::White) => '♘',
            (PieceKind::Pawn, Color::White) => '♙',
            (PieceKind::King, Color::Black) => '♚',
            (PieceKind::Queen, Color::Black) => '♛',
            (PieceKind::Rook, Color::Black) => '♜',
            (PieceKind::Bishop, Color::Black) => '♝',
            (PieceKind::Knight, Color::Black) => '♞',
            (PieceKind::Pawn, Color::Black) => '♟',
        }
    }

    /// Returns the letter for this kind, uppercase for White.
    pub const fn letter(self, color: Color) -> char {
        let c = match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: kind, owner, cell, and state flags.
///
/// Captured pieces are tombstoned rather than removed, so a piece keeps
/// its identity for history records and simulation rollback. All occupancy
/// queries filter on liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    cell: Cell,
    has_moved: bool,
    alive: bool,
}

impl Piece {
    /// Creates a live, unmoved piece.
    pub const fn new(kind: PieceKind, color: Color, cell: Cell) -> Self {
        Piece {
            kind,
            color,
            cell,
            has_moved: false,
            alive: true,
        }
    }

    /// Creates a piece materialized by promotion. It counts as having
    /// moved: a rook created mid-game must never qualify for castling.
    pub const fn promoted(kind: PieceKind, color: Color, cell: Cell) -> Self {
        Piece {
            kind,
            color,
            cell,
            has_moved: true,
            alive: true,
        }
    }

    /// Returns the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Returns the owning color.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Returns the current cell.
    #[inline]
    pub const fn cell(self) -> Cell {
        self.cell
    }

    /// Returns true if the piece has ever moved. Consulted by castling
    /// (king and rook) and by the pawn double-step allowance.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.has_moved
    }

    /// Returns true if the piece has not been captured.
    #[inline]
    pub const fn is_alive(self) -> bool {
        self.alive
    }

    /// Relocates the piece and marks it as having moved.
    pub fn relocate(&mut self, cell: Cell) {
        self.cell = cell;
        self.has_moved = true;
    }

    /// Restores the cell and has-moved flag to saved values. The rollback
    /// half of move simulation.
    pub fn restore(&mut self, cell: Cell, has_moved: bool) {
        self.cell = cell;
        self.has_moved = has_moved;
    }

    /// Tombstones the piece.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Brings a tombstoned piece back. Exists solely so simulation can
    /// roll a hypothetical capture back.
    pub fn revive(&mut self) {
        self.alive = true;
    }
}
