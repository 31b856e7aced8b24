//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use std::fmt;

use thiserror::Error;

use crate::{CastlingRights, Color, Piece, Square};

/// Errors that can occur when parsing FEN strings.
///
/// Every variant means the input is malformed; nothing is patched up
/// silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A decoded FEN record.
///
/// The placement is indexed by [`Square::index`]. The engine turns this
/// into its own board and position types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Occupant of each square, a1 first.
    pub placement: [Option<Piece>; 64],
    /// The side to move.
    pub side_to_move: Color,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule).
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_piece_placement(parts[0])?;

        let side_to_move = Color::from_fen(parts[1])
            .ok_or_else(|| FenError::InvalidActiveColor(parts[1].to_string()))?;

        // Unknown castling characters are ignored
        let castling = CastlingRights::from_fen(parts[2]);

        let en_passant = match parts[3] {
            "-" => None,
            square => Some(
                Square::from_algebraic(square)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(square.to_string()))?,
            ),
        };

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = [None; 64];

        // FEN lists rank 8 first
        for (i, rank) in ranks.iter().enumerate() {
            let rank_number = 8 - i;
            let base = (rank_number - 1) * 8;
            let mut squares = 0usize;

            for c in rank.chars() {
                match c {
                    '1'..='8' => squares += (c as u8 - b'0') as usize,
                    _ => {
                        let piece = Piece::from_fen_char(c).ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "invalid character '{}' in rank {}",
                                c, rank_number
                            ))
                        })?;
                        if squares < 8 {
                            board[base + squares] = Some(piece);
                        }
                        squares += 1;
                    }
                }
            }

            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank_number, squares
                )));
            }
        }

        Ok(board)
    }

    fn write_piece_placement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.placement[rank * 8 + file] {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{}", empty_count)?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.to_fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{}", empty_count)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_piece_placement(f)?;
        write!(f, " {} {} ", self.side_to_move.to_fen_char(), self.castling)?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
