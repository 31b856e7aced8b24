//! Chess position representation.

use chess_core::{CastlingRights, Color, Fen, FenError, Piece, Square};

use crate::movegen::generate_moves;
use crate::Board;

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

/// The part of a position that decides whether two positions repeat.
///
/// Clocks are left out: a position reached again at a different move
/// number is still the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen).map_err(|e| {
            tracing::debug!(%fen, error = %e, "rejected malformed FEN");
            e
        })?;
        Ok(Self::from(parsed))
    }

    /// Converts the position to a FEN record.
    pub fn to_fen_record(&self) -> Fen {
        Fen {
            placement: *self.board.cells(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_string()
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Returns the repetition key of this position.
    ///
    /// The en passant square only counts while a legal en passant capture
    /// exists; otherwise it changes nothing about the position.
    pub fn key(&self) -> PositionKey {
        let en_passant = self
            .en_passant
            .filter(|_| generate_moves(self).iter().any(|m| m.is_en_passant()));
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant,
        }
    }
}

impl From<Fen> for Position {
    fn from(fen: Fen) -> Self {
        Position {
            board: Board::from_cells(fen.placement),
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
