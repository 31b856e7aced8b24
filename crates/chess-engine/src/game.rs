//! Game management with history tracking.
//!
//! [`Game`] is the explicit owner of the state a UI would otherwise keep
//! ambiently: the current position, the moves played, and the position
//! history needed for repetition claims.

use crate::rules::{DrawReason, GameResult, MoveError, RuleSet, StandardChess};
use crate::{MoveList, Position, PositionKey, RuleOptions, Status};
use chess_core::{FenError, Move, Piece, PieceKind, Square};
use thiserror::Error;

/// A recorded move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    /// The move as generated.
    pub mv: Move,
    /// The piece that moved.
    pub piece: Piece,
    /// The piece taken, including an en passant victim.
    pub captured: Option<Piece>,
}

/// Error type for game operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The starting FEN could not be parsed.
    #[error(transparent)]
    Fen(#[from] FenError),
    /// The move was rejected.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
    /// Cannot claim draw (conditions not met).
    #[error("cannot claim draw: conditions not met")]
    CannotClaimDraw,
}

/// A chess game with history tracking.
///
/// Unlike [`Position`], which represents a single board state, `Game` keeps
/// every earlier position so moves can be undone and repetitions counted.
#[derive(Debug, Clone)]
pub struct Game {
    rules: StandardChess,
    /// Current position.
    position: Position,
    /// Positions before each move, for undo.
    snapshots: Vec<Position>,
    /// Repetition keys of every position reached, current one last.
    history: Vec<PositionKey>,
    moves: Vec<GameMove>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::with_rules(StandardChess::default())
    }

    /// Creates a new game from the starting position under custom options.
    pub fn with_options(options: RuleOptions) -> Self {
        Self::with_rules(StandardChess::new(options))
    }

    fn with_rules(rules: StandardChess) -> Self {
        Self::from_position_with(rules.initial_position(), rules)
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Self::from_position_with(position, StandardChess::default())
    }

    /// Creates a game from a custom starting position under custom options.
    pub fn from_position_with_options(position: Position, options: RuleOptions) -> Self {
        Self::from_position_with(position, StandardChess::new(options))
    }

    fn from_position_with(position: Position, rules: StandardChess) -> Self {
        let mut game = Game {
            rules,
            history: vec![position.key()],
            position,
            snapshots: Vec::new(),
            moves: Vec::new(),
            result: None,
        };
        // The starting position may already be terminal
        game.check_game_end();
        game
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Creates a game from a FEN string under custom options.
    pub fn from_fen_with_options(fen: &str, options: RuleOptions) -> Result<Self, GameError> {
        Ok(Self::from_position_with_options(Position::from_fen(fen)?, options))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the rule set this game is played under.
    pub fn rules(&self) -> &StandardChess {
        &self.rules
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.rules.generate_moves(&self.position)
    }

    /// Destinations of the piece on `from`. Empty once the game is over.
    pub fn legal_moves_for(&self, from: Square) -> Vec<Square> {
        if self.result.is_some() {
            return Vec::new();
        }
        self.rules.legal_moves_for(&self.position, from)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.rules.is_check(&self.position)
    }

    /// Check, checkmate and stalemate for the side to move.
    pub fn status(&self) -> Status {
        self.rules.status(&self.position)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Moves the piece on `from` to `to`, promoting to the default piece.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        self.make_move_with_promotion(from, to, None)
    }

    /// Moves the piece on `from` to `to` with a chosen promotion piece.
    pub fn make_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let m = self
            .rules
            .resolve_move(&self.position, from, to, promotion)?;
        self.apply(m);
        Ok(())
    }

    fn apply(&mut self, m: Move) {
        let board = &self.position.board;
        let captured = if m.is_en_passant() {
            board.piece_at(crate::movegen::en_passant_victim(m.from, m.to))
        } else {
            board.piece_at(m.to)
        };
        // resolve_move only returns moves of an occupied square
        let Some(piece) = board.piece_at(m.from) else {
            return;
        };

        let next = self.rules.make_move(&self.position, m);
        self.snapshots
            .push(std::mem::replace(&mut self.position, next));
        self.moves.push(GameMove {
            mv: m,
            piece,
            captured,
        });
        self.history.push(self.position.key());

        self.check_game_end();
    }

    /// Takes back the last move. Also reopens a game that had ended.
    pub fn undo(&mut self) -> Option<GameMove> {
        let previous = self.snapshots.pop()?;
        self.position = previous;
        self.history.pop();
        let undone = self.moves.pop();
        self.result = None;
        self.check_game_end();
        undone
    }

    fn check_game_end(&mut self) {
        self.result = self.rules.game_result(&self.position);
    }

    /// Counts how many times the current position has occurred.
    pub fn position_count(&self) -> usize {
        let current = self.position.key();
        self.history.iter().filter(|&&k| k == current).count()
    }

    /// Returns true if a draw can be claimed (threefold repetition or 50-move rule).
    pub fn can_claim_draw(&self) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.position_count() >= 3 || self.position.halfmove_clock >= 100
    }

    /// Claims a draw if conditions are met.
    pub fn claim_draw(&mut self) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let reason = if self.position_count() >= 3 {
            DrawReason::ThreefoldRepetition
        } else if self.position.halfmove_clock >= 100 {
            DrawReason::FiftyMoveRule
        } else {
            return Err(GameError::CannotClaimDraw);
        };
        self.result = Some(GameResult::Draw(reason));
        Ok(())
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        self.result = Some(GameResult::loss_for(self.position.side_to_move));
        Ok(())
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceKind};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(game: &mut Game, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            game.make_move(sq(from), sq(to)).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn make_move_records_history() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
        let history = game.move_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].piece, Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(history[0].captured, None);
        assert_eq!(
            history[2].captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn en_passant_records_victim() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
        assert!(game.legal_moves_for(sq("e5")).contains(&sq("d6")));
        play(&mut game, &[("e5", "d6")]);
        let last = game.move_history().last().unwrap();
        assert!(last.mv.is_en_passant());
        assert_eq!(last.captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert!(game.position().piece_at(sq("d5")).is_none());
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        let result = game.make_move(sq("e2"), sq("e5"));
        assert_eq!(
            result,
            Err(GameError::Move(MoveError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            }))
        );
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn bad_fen() {
        assert!(matches!(
            Game::from_fen("not a fen"),
            Err(GameError::Fen(FenError::InvalidPartCount(3)))
        ));
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
        assert!(game.is_game_over());
        assert!(game.status().checkmate);
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert!(game.legal_moves_for(sq("e2")).is_empty());
    }

    #[test]
    fn stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
    }

    #[test]
    fn threefold_repetition() {
        let mut game = Game::new();
        let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 2);
        assert!(!game.can_claim_draw());
        assert_eq!(game.claim_draw(), Err(GameError::CannotClaimDraw));

        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 3);
        assert!(game.can_claim_draw());

        game.claim_draw().unwrap();
        assert!(game.is_game_over());
        assert_eq!(
            game.result(),
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        );
    }

    #[test]
    fn repetition_after_double_push() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        play(&mut game, &[("e2", "e4")]);
        assert_eq!(game.position().en_passant, Some(sq("e3")));

        let shuffle = [("e8", "d8"), ("e1", "d1"), ("d8", "e8"), ("d1", "e1")];
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 2);
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 3);
        assert!(game.can_claim_draw());
        game.claim_draw().unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        );
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = Game::from_fen("8/8/8/8/8/8/8/R3K2k w Q - 99 60").unwrap();
        assert!(!game.can_claim_draw());
        play(&mut game, &[("a1", "a2")]);
        assert_eq!(game.position().halfmove_clock, 100);
        assert!(game.can_claim_draw());

        game.claim_draw().unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn resign() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::BlackWins)); // White resigned
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut game = Game::new();
        game.resign().unwrap();
        let result = game.make_move(sq("e2"), sq("e4"));
        assert_eq!(result, Err(GameError::GameAlreadyOver));
        assert_eq!(game.resign(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn undo_restores_position() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("e7", "e5")]);
        let undone = game.undo().unwrap();
        assert_eq!(undone.mv.to, sq("e5"));
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.position().en_passant, Some(sq("e3")));
        game.undo().unwrap();
        assert_eq!(game.position(), &Position::startpos());
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn undo_reopens_finished_game() {
        let mut game = Game::new();
        play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
        assert!(game.is_game_over());
        game.undo().unwrap();
        assert!(!game.is_game_over());
        assert_eq!(game.position().side_to_move, Color::Black);
    }

    #[test]
    fn fen_with_options() {
        let options = RuleOptions {
            enforce_turn_order: false,
            ..RuleOptions::default()
        };
        let mut game =
            Game::from_fen_with_options("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", options).unwrap();
        assert_eq!(game.rules().options(), &options);
        assert_eq!(game.legal_moves_for(Square::E8).len(), 5);
        play(&mut game, &[("e8", "d8")]);
        assert_eq!(game.position().side_to_move, Color::White);

        assert!(matches!(
            Game::from_fen_with_options("bad", options),
            Err(GameError::Fen(FenError::InvalidPartCount(1)))
        ));
    }

    #[test]
    fn relaxed_turn_order() {
        let mut game = Game::with_options(RuleOptions {
            enforce_turn_order: false,
            ..RuleOptions::default()
        });
        play(&mut game, &[("e2", "e4"), ("d2", "d4")]);
        assert_eq!(game.ply_count(), 2);
        assert_eq!(game.position().side_to_move, Color::Black);
    }
}
