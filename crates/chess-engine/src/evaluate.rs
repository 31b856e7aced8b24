//! Check, checkmate and stalemate detection.
//!
//! All predicates are pure functions of a [`Position`]; nothing here keeps
//! game-phase state. Callers poll them after each move.

use crate::movegen::{is_in_check, legal_moves};
use crate::Position;
use chess_core::Color;
use serde::Serialize;

/// Terminal-state flags for one side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// The side's king is attacked.
    pub in_check: bool,
    /// In check with no legal move.
    pub checkmate: bool,
    /// Not in check with no legal move.
    pub stalemate: bool,
}

impl Status {
    /// True for checkmate or stalemate.
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

/// Returns true if any piece of `color` has a legal move.
///
/// Stops at the first piece that can move.
pub fn has_legal_moves(position: &Position, color: Color) -> bool {
    position.board.pieces(color).any(|(from, piece)| {
        !legal_moves(
            &position.board,
            piece,
            from,
            position.en_passant,
            position.castling,
        )
        .is_empty()
    })
}

/// Returns true if `color`'s king is attacked.
pub fn is_check(position: &Position, color: Color) -> bool {
    is_in_check(&position.board, color, position.en_passant)
}

pub fn is_checkmate(position: &Position, color: Color) -> bool {
    is_check(position, color) && !has_legal_moves(position, color)
}

pub fn is_stalemate(position: &Position, color: Color) -> bool {
    !is_check(position, color) && !has_legal_moves(position, color)
}

/// Evaluates all three predicates for `color`.
pub fn status_for(position: &Position, color: Color) -> Status {
    let in_check = is_check(position, color);
    let stuck = !has_legal_moves(position, color);
    Status {
        in_check,
        checkmate: in_check && stuck,
        stalemate: !in_check && stuck,
    }
}

/// Evaluates the side to move.
pub fn status(position: &Position) -> Status {
    status_for(position, position.side_to_move)
}
