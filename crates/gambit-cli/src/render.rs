//! Text board rendering.

use gambit_core::{Cell, Piece};

const SEPARATOR: &str = "  +---+---+---+---+---+---+---+---+\n";

/// Renders the board as an 8x8 grid with file letters across the top and
/// rank digits down the left edge. Dead pieces are not drawn.
pub fn render_board(pieces: &[Piece], ascii: bool) -> String {
    let mut out = String::new();
    out.push_str("    a   b   c   d   e   f   g   h\n");
    out.push_str(SEPARATOR);
    for rank in 0..8u8 {
        out.push(char::from(b'0' + (8 - rank)));
        out.push_str(" |");
        for file in 0..8u8 {
            let cell = Cell::at(rank, file);
            let symbol = pieces
                .iter()
                .find(|p| p.is_alive() && p.cell() == cell)
                .map(|p| {
                    if ascii {
                        p.kind().letter(p.color())
                    } else {
                        p.kind().symbol(p.color())
                    }
                })
                .unwrap_or(' ');
            out.push(' ');
            out.push(symbol);
            out.push_str(" |");
        }
        out.push('\n');
        out.push_str(SEPARATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_engine::Game;

    #[test]
    fn initial_board_layout() {
        let game = Game::new();
        let board = render_board(&game.pieces_snapshot(), false);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[0], "    a   b   c   d   e   f   g   h");
        // black back rank on the top row, white on the bottom
        assert_eq!(lines[2], "8 | ♜ | ♞ | ♝ | ♛ | ♚ | ♝ | ♞ | ♜ |");
        assert_eq!(lines[4], "7 | ♟ | ♟ | ♟ | ♟ | ♟ | ♟ | ♟ | ♟ |");
        assert_eq!(lines[16], "1 | ♖ | ♘ | ♗ | ♕ | ♔ | ♗ | ♘ | ♖ |");
    }

    #[test]
    fn ascii_mode_uses_letters() {
        let game = Game::new();
        let board = render_board(&game.pieces_snapshot(), true);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[2], "8 | r | n | b | q | k | b | n | r |");
        assert_eq!(lines[16], "1 | R | N | B | Q | K | B | N | R |");
    }

    #[test]
    fn dead_pieces_are_not_drawn() {
        let cell = |s| gambit_core::notation::parse_cell(s).unwrap();
        let mut game = Game::new();
        game.attempt_move(cell("e2"), cell("e4")).unwrap();
        game.attempt_move(cell("d7"), cell("d5")).unwrap();
        game.attempt_move(cell("e4"), cell("d5")).unwrap();

        let board = render_board(&game.pieces_snapshot(), true);
        let lines: Vec<&str> = board.lines().collect();
        // the captured black pawn is tombstoned; only the capturer shows
        assert_eq!(lines[8], "5 |   |   |   | P |   |   |   |   |");
        assert_eq!(lines[14], "2 | P | P | P | P |   | P | P | P |");
    }
}
