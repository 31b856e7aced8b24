//! Legal move generation: pseudo-legal filtering plus castling.

use super::{board_after, is_in_check, is_square_safe, pseudo_legal_moves_into, MoveList};
use crate::{Board, Position};
use chess_core::{CastleSide, CastlingRights, Color, File, Move, MoveKind, Piece, PieceKind, Square};

/// Generates the legal moves of `piece` standing on `from`.
///
/// Each pseudo-legal candidate is tried on a copy of the board and kept
/// only if the mover's king is not attacked afterwards. Castling moves are
/// appended for a king. Turn order is not checked here; a piece of either
/// color can be asked for.
pub fn legal_moves(
    board: &Board,
    piece: Piece,
    from: Square,
    en_passant: Option<Square>,
    castling: CastlingRights,
) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves_into(board, piece, from, en_passant, &mut moves);

    // The en passant target expires with the move, so the check test runs without it
    moves.retain(|m| !is_in_check(&board_after(board, *m), piece.color, None));

    if piece.kind == PieceKind::King && board.piece_at(from) == Some(piece) {
        for side in CastleSide::ALL {
            if let Some(m) = castling_move(board, piece.color, from, side, en_passant, castling) {
                moves.push(m);
            }
        }
    }

    moves
}

/// Returns the castling move for `color` towards `side` if it is available.
///
/// Castling needs the right, the king on its home square, a rook of the same
/// color on its corner, empty squares between them, and a king that is not
/// in check and does not cross or land on an attacked square.
pub fn castling_move(
    board: &Board,
    color: Color,
    king_from: Square,
    side: CastleSide,
    en_passant: Option<Square>,
    castling: CastlingRights,
) -> Option<Move> {
    let rank = color.back_rank();
    let king_home = Square::new(File::E, rank);

    if !castling.has(color, side) || king_from != king_home {
        return None;
    }
    if board.piece_at(king_home) != Some(Piece::new(PieceKind::King, color)) {
        return None;
    }
    if board.piece_at(side.rook_home(color)) != Some(Piece::new(PieceKind::Rook, color)) {
        return None;
    }

    let is_clear = side
        .between_files()
        .iter()
        .all(|&file| board.is_empty(Square::new(file, rank)));
    if !is_clear {
        return None;
    }

    if !is_square_safe(board, king_home, color, en_passant) {
        return None;
    }
    let is_safe = side
        .king_path_files()
        .iter()
        .all(|&file| is_square_safe(board, Square::new(file, rank), color, en_passant));
    if !is_safe {
        return None;
    }

    let to = Square::new(side.king_target_file(), rank);
    Some(Move::new(king_home, to, MoveKind::Castle(side)))
}

/// Generates every legal move for `color` in `position`, whoever is to move.
pub fn generate_moves_for(position: &Position, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in position.board.pieces(color) {
        let piece_moves = legal_moves(
            &position.board,
            piece,
            from,
            position.en_passant,
            position.castling,
        );
        moves.extend_from(&piece_moves);
    }
    moves
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    generate_moves_for(position, position.side_to_move)
}
