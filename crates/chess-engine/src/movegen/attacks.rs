//! Attack/safety oracle.
//!
//! Answers "could the opponent capture on this square?" by generating the
//! opponent's pseudo-legal moves and looking for the square among their
//! destinations. This costs a full scan of the board per query, which is
//! fine for interactive use and for the shallow perft runs in the tests.

use super::{pseudo_legal_moves_into, MoveList};
use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if no piece of `defender`'s opponent can capture on `sq`.
///
/// The square is probed as if a `defender` piece stood on it. That way an
/// empty square counts as attacked by a pawn's diagonal but not by its push,
/// exactly like an occupied one.
pub fn is_square_safe(
    board: &Board,
    sq: Square,
    defender: Color,
    en_passant: Option<Square>,
) -> bool {
    let attacker = defender.opposite();

    let mut probe = *board;
    if probe.color_at(sq) != Some(defender) {
        probe.set(sq, Some(Piece::new(PieceKind::Pawn, defender)));
    }

    let mut moves = MoveList::new();
    for (from, piece) in probe.pieces(attacker) {
        moves.clear();
        pseudo_legal_moves_into(&probe, piece, from, en_passant, &mut moves);
        if moves.reaches(sq) {
            return false;
        }
    }

    true
}

/// Returns true if the king of `color` is attacked.
///
/// A board without a king of that color is never in check.
pub fn is_in_check(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    match board.king_square(color) {
        Some(king) => !is_square_safe(board, king, color, en_passant),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_safety() {
        let position = Position::startpos();
        let board = &position.board;

        // e3 is covered by White pawns, so Black cannot safely go there
        assert!(!is_square_safe(board, sq("e3"), Color::Black, None));
        // Nothing of Black's reaches e4 at the start
        assert!(is_square_safe(board, sq("e4"), Color::White, None));
        // Knight on g8 covers f6
        assert!(!is_square_safe(board, sq("f6"), Color::White, None));
    }

    #[test]
    fn pawn_push_is_not_an_attack() {
        // Black pawn on e3 can push to e2 but does not attack it
        let position = Position::from_fen("4k3/8/8/8/8/4p3/8/K7 w - - 0 1").unwrap();
        assert!(is_square_safe(&position.board, sq("e2"), Color::White, None));
        assert!(!is_square_safe(&position.board, sq("d2"), Color::White, None));
        assert!(!is_square_safe(&position.board, sq("f2"), Color::White, None));
    }

    #[test]
    fn sliders_are_blocked() {
        // Black rook a1 is screened from e1 by the bishop on c1
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r1B1K3 w - - 0 1").unwrap();
        assert!(is_square_safe(&position.board, Square::E1, Color::White, None));
        assert!(!is_square_safe(&position.board, Square::B1, Color::White, None));
        assert!(!is_in_check(&position.board, Color::White, None));
    }

    #[test]
    fn in_check_by_each_piece_kind() {
        let checks = [
            "4k3/8/8/8/8/8/3p4/4K3 w - - 0 1",
            "4k3/8/8/8/8/5n2/8/4K3 w - - 0 1",
            "4k3/8/8/8/7b/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/r3K3 w - - 0 1",
            "4k3/8/8/8/4q3/8/8/4K3 w - - 0 1",
        ];
        for fen in checks {
            let position = Position::from_fen(fen).unwrap();
            assert!(is_in_check(&position.board, Color::White, None), "{}", fen);
            assert!(!is_in_check(&position.board, Color::Black, None), "{}", fen);
        }
    }

    #[test]
    fn no_king_is_never_in_check() {
        let position = Position::from_fen("8/8/8/8/8/8/8/q7 w - - 0 1").unwrap();
        assert!(!is_in_check(&position.board, Color::White, None));
    }

    #[test]
    fn own_pieces_do_not_attack() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(is_square_safe(&position.board, sq("a5"), Color::White, None));
        assert!(!is_square_safe(&position.board, sq("a5"), Color::Black, None));
    }
}
