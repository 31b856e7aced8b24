//! Move representation.

use crate::{CastleSide, PieceKind, Square};
use std::fmt;

/// What a move does besides relocating the moving piece.
///
/// These are facts derived while generating moves for a specific position;
/// a caller never needs to construct them by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain move or capture.
    Normal,
    /// Pawn double step from its starting rank.
    DoublePush,
    /// Pawn capture onto the en passant target square.
    EnPassant,
    /// King move that also relocates a rook.
    Castle(CastleSide),
    /// Pawn reaching the last rank, becoming the given piece.
    Promotion(PieceKind),
}

/// A move candidate: origin, destination and the derived kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a normal move (no special effect).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePush)
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns coordinate notation (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion() {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
