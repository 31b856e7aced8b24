//! Move generation.
//!
//! Generation happens in two layers:
//! - pseudo-legal: piece geometry only, defined here per [`PieceKind`]
//! - legal: pseudo-legal moves that do not leave the mover's king in
//!   check, plus castling (see [`legal_moves`])
//!
//! The attack oracle in [`attacks`] reuses the pseudo-legal generators, so
//! piece movement rules live in exactly one place.

mod attacks;
mod legal;
mod make;
pub mod perft;

use crate::Board;
use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Square};

pub use attacks::{is_in_check, is_square_safe};
pub use legal::{castling_move, generate_moves, generate_moves_for, legal_moves};
pub use make::{board_after, en_passant_victim, make_move};

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Appends every move of `other`.
    pub fn extend_from(&mut self, other: &MoveList) {
        for &m in other {
            self.push(m);
        }
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if any move lands on `sq`.
    #[inline]
    pub fn reaches(&self, sq: Square) -> bool {
        self.iter().any(|m| m.to == sq)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            let m = self.moves[read];
            if f(&m) {
                self.moves[write] = m;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of `piece` standing on `from`.
///
/// Pseudo-legal moves follow piece geometry and occupancy but may leave the
/// mover's own king in check. Castling is never pseudo-legal. If `piece` is
/// not actually the occupant of `from`, nothing is generated.
pub fn pseudo_legal_moves(
    board: &Board,
    piece: Piece,
    from: Square,
    en_passant: Option<Square>,
) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves_into(board, piece, from, en_passant, &mut moves);
    moves
}

/// Like [`pseudo_legal_moves`], appending to an existing list.
pub fn pseudo_legal_moves_into(
    board: &Board,
    piece: Piece,
    from: Square,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    if board.piece_at(from) != Some(piece) {
        return;
    }

    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, color, en_passant, moves),
        PieceKind::Knight => step_moves(board, from, color, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => sliding_moves(board, from, color, &DIAGONALS, moves),
        PieceKind::Rook => sliding_moves(board, from, color, &ORTHOGONALS, moves),
        PieceKind::Queen => sliding_moves(board, from, color, &ALL_DIRECTIONS, moves),
        PieceKind::King => step_moves(board, from, color, &ALL_DIRECTIONS, moves),
    }
}

/// Walks each direction until the edge or the first occupied square.
///
/// An enemy blocker is included as a capture, a friendly one is not.
fn sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.color_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(other) => {
                    if other != color {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Single jumps to fixed offsets (knight and king).
fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if board.color_at(to) != Some(color) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

fn pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let dir = color.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            push_pawn_move(from, one, color, moves);

            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two, MoveKind::DoublePush));
                    }
                }
            }
        }
    }

    // Captures and en passant
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != color => push_pawn_move(from, to, color, moves),
            None if en_passant == Some(to) && has_en_passant_victim(board, from, to, color) => {
                moves.push(Move::new(from, to, MoveKind::EnPassant));
            }
            _ => {}
        }
    }
}

/// The target square is only capturable if an enemy pawn sits beside the
/// capturing pawn on the target's file.
fn has_en_passant_victim(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let victim = Piece::new(PieceKind::Pawn, color.opposite());
    board.piece_at(en_passant_victim(from, to)) == Some(victim)
}

fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank() == color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to, MoveKind::Promotion(kind)));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}
