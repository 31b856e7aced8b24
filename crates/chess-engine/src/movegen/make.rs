//! Applying moves to boards and positions.

use crate::{Board, Position, RuleOptions};
use chess_core::{CastleSide, Color, Move, MoveKind, Piece, PieceKind, Square};
use tracing::trace;

/// Square of the pawn taken by an en passant capture from `from` to `to`:
/// the destination's file on the origin's rank.
#[inline]
pub fn en_passant_victim(from: Square, to: Square) -> Square {
    to.with_rank(from.rank())
}

/// Returns the board after `m`, including every side effect on the board.
///
/// Besides relocating the moving piece this removes an en passant victim,
/// brings the rook across when castling and swaps in the promoted piece.
/// The input board is left untouched.
pub fn board_after(board: &Board, m: Move) -> Board {
    let mut next = board.with_move(m.from, m.to);

    match m.kind {
        MoveKind::EnPassant => next.set(en_passant_victim(m.from, m.to), None),
        MoveKind::Castle(side) => {
            let rank = m.from.rank();
            next = next.with_move(
                Square::new(side.rook_file(), rank),
                Square::new(side.rook_target_file(), rank),
            );
        }
        MoveKind::Promotion(kind) => {
            if let Some(pawn) = next.piece_at(m.to) {
                next.set(m.to, Some(Piece::new(kind, pawn.color)));
            }
        }
        MoveKind::Normal | MoveKind::DoublePush => {}
    }

    next
}

/// Makes a move and returns the new position.
///
/// `m` is expected to come from the legal generator for this position. The
/// side to move afterwards is the opponent of the piece that moved. A move
/// from an empty square leaves the position as it was.
pub fn make_move(position: &Position, m: Move, options: &RuleOptions) -> Position {
    let Some(piece) = position.board.piece_at(m.from) else {
        trace!(mv = %m, "no piece to move");
        return position.clone();
    };
    let us = piece.color;
    let them = us.opposite();

    let captured = if m.is_en_passant() {
        position.board.piece_at(en_passant_victim(m.from, m.to))
    } else {
        position.board.piece_at(m.to)
    };

    let mut new_pos = position.clone();
    new_pos.board = board_after(&position.board, m);

    // King move removes all castling rights for that color
    if piece.kind == PieceKind::King {
        new_pos.castling.remove_color(us);
    }
    // Rook leaving its corner removes that side
    if piece.kind == PieceKind::Rook {
        if let Some(side) = CastleSide::from_rook_home(m.from, us) {
            new_pos.castling.remove(us, side);
        }
    }
    // Capturing a rook on its corner removes the opponent's right on that side
    if options.revoke_castling_on_rook_capture
        && captured == Some(Piece::new(PieceKind::Rook, them))
    {
        if let Some(side) = CastleSide::from_rook_home(m.to, them) {
            new_pos.castling.remove(them, side);
        }
    }
    if new_pos.castling != position.castling {
        trace!(before = %position.castling, after = %new_pos.castling, "castling rights changed");
    }

    // The skipped square stays capturable for exactly one ply
    new_pos.en_passant = if m.is_double_push() {
        m.from.offset(0, us.pawn_direction())
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured.is_some() {
        new_pos.halfmove_clock = 0;
    } else {
        new_pos.halfmove_clock = new_pos.halfmove_clock.saturating_add(1);
    }

    if us == Color::Black {
        new_pos.fullmove_number = new_pos.fullmove_number.saturating_add(1);
    }

    new_pos.side_to_move = them;

    trace!(mv = %m, fen = %new_pos.to_fen(), "applied move");
    new_pos
}
