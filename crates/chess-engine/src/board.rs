//! Mailbox board: 64 cells, each holding an optional piece.

use std::fmt;

use chess_core::{Color, Piece, PieceKind, Square};

/// An 8x8 grid of optional pieces.
///
/// `Board` is a small `Copy` value. Mutating methods only ever touch the
/// caller's own copy, so hypothetical moves are tried on a fresh board
/// without affecting any position another caller holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates a board from cells indexed by [`Square::index`].
    pub const fn from_cells(cells: [Option<Piece>; 64]) -> Self {
        Board { cells }
    }

    /// Returns the cells indexed by [`Square::index`].
    pub const fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Puts `piece` on `sq`, replacing whatever was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index() as usize] = piece;
    }

    /// Returns a copy with the occupant of `from` relocated to `to`.
    ///
    /// Whatever stood on `to` is overwritten, which is how captures happen.
    /// No legality is checked here.
    #[must_use]
    pub fn with_move(&self, from: Square, to: Square) -> Board {
        let mut next = *self;
        let piece = next.piece_at(from);
        next.set(from, None);
        next.set(to, piece);
        next
    }

    /// Locates the king of `color` by linear scan.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.iter()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    /// Iterates occupied squares from a1 to h8.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates the pieces of one color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color == color)
    }

    /// Counts the pieces on the board.
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    /// Eight lines, rank 8 first, `.` for an empty square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let sq = Square::from_index(rank * 8 + file).ok_or(fmt::Error)?;
                let c = self.piece_at(sq).map_or('.', Piece::to_fen_char);
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
