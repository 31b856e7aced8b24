//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait, the consumer-facing surface of
//! the engine: start a game, list destinations for a square, apply a move,
//! and read the status of a position. [`StandardChess`] implements it.

mod standard;

pub use standard::StandardChess;

use crate::{MoveList, Position, Status};
use chess_core::{Color, Move, PieceKind, Square};
use serde::Serialize;
use thiserror::Error;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameResult {
    /// White wins (checkmate or resignation).
    WhiteWins,
    /// Black wins (checkmate or resignation).
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// The result of `color` losing.
    pub const fn loss_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }

    /// Returns the winner, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    /// Result tag as written in game records.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// 50-move rule (100 half-moves without pawn move or capture) - claimable.
    FiftyMoveRule,
    /// Threefold repetition - claimable.
    ThreefoldRepetition,
}

/// A requested move that was rejected. The position is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// There is no piece on the origin square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece on the origin square belongs to the side not to move.
    #[error("it is {expected}'s turn to move")]
    WrongSideToMove {
        /// The side to move.
        expected: Color,
    },
    /// The destination is not among the piece's legal moves.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    /// The requested promotion piece is a king or pawn.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Trait for implementing chess rule sets.
///
/// # Example
///
/// ```
/// use chess_engine::{Square, StandardChess};
/// use chess_engine::rules::RuleSet;
///
/// let rules = StandardChess::default();
/// let position = rules.initial_position();
/// let e2 = Square::from_algebraic("e2").unwrap();
/// assert_eq!(rules.legal_moves_for(&position, e2).len(), 2);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this rule set.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Generates the legal moves of the piece on `from`.
    ///
    /// Empty if the square is empty, or if the rule set enforces turn order
    /// and the piece is not the side to move's.
    fn legal_moves_from(&self, position: &Position, from: Square) -> MoveList;

    /// Destination squares of the piece on `from`, each listed once.
    fn legal_moves_for(&self, position: &Position, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = Vec::new();
        for m in &self.legal_moves_from(position, from) {
            if !targets.contains(&m.to) {
                targets.push(m.to);
            }
        }
        targets
    }

    /// Finds the legal move from `from` to `to`.
    ///
    /// For a promotion, `promotion` picks the piece; `None` falls back to the
    /// rule set's default. It is ignored for other moves.
    fn resolve_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError>;

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool {
        self.legal_moves_from(position, m.from)
            .as_slice()
            .contains(&m)
    }

    /// Makes a move on the position, returning the new position.
    ///
    /// The move is not validated; use [`apply_move`](RuleSet::apply_move) for
    /// caller input.
    fn make_move(&self, position: &Position, m: Move) -> Position;

    /// Applies the move from `from` to `to`, promoting to the default piece.
    fn apply_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
    ) -> Result<Position, MoveError> {
        self.apply_move_with_promotion(position, from, to, None)
    }

    /// Applies the move from `from` to `to` with a chosen promotion piece.
    fn apply_move_with_promotion(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Position, MoveError> {
        let m = self.resolve_move(position, from, to, promotion)?;
        Ok(self.make_move(position, m))
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Check, checkmate and stalemate for the side to move.
    fn status(&self, position: &Position) -> Status;

    /// Returns the game result if the position is terminal.
    ///
    /// Only checkmate and stalemate are visible from a single position. For
    /// repetition and fifty-move claims, use the [`Game`](crate::Game) struct
    /// which tracks history.
    fn game_result(&self, position: &Position) -> Option<GameResult> {
        let status = self.status(position);
        if status.checkmate {
            Some(GameResult::loss_for(position.side_to_move))
        } else if status.stalemate {
            Some(GameResult::Draw(DrawReason::Stalemate))
        } else {
            None
        }
    }

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_result(position).is_some()
    }
}
