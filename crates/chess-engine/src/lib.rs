//! Chess rules engine over a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces with copy-on-write moves
//! - [`Position`] - board plus side to move, castling rights, en passant and clocks
//! - Move generation: pseudo-legal per piece, legal with castling (see [`movegen`])
//! - [`status`] - check, checkmate and stalemate for a position
//! - [`RuleSet`] - the consumer-facing operations, implemented by [`StandardChess`]
//! - [`Game`] - game management with history, undo and draw claims
//!
//! # Architecture
//!
//! Positions are values. Every move produces a new [`Position`]; legality is
//! tested on board copies, so nothing a caller holds is ever mutated. Attack
//! detection reuses the pseudo-legal generators instead of separate attack
//! tables.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, Square, StandardChess};
//! use chess_engine::rules::RuleSet;
//!
//! // Using positions directly (stateless)
//! let rules = StandardChess::default();
//! let position = rules.initial_position();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let position = rules.apply_move(&position, e2, e4).unwrap();
//! assert!(!rules.status(&position).in_check);
//!
//! // Using Game for full game management
//! let mut game = Game::new();
//! game.make_move(e2, e4).unwrap();
//! println!("Position after 1.e4: {}", game.to_fen());
//! ```

mod board;
mod evaluate;
mod game;
pub mod movegen;
mod options;
mod position;
pub mod rules;

pub use board::Board;
pub use evaluate::{
    has_legal_moves, is_check, is_checkmate, is_stalemate, status, status_for, Status,
};
pub use game::{Game, GameError, GameMove};
pub use movegen::{
    generate_moves, generate_moves_for, is_in_check, is_square_safe, legal_moves, make_move,
    pseudo_legal_moves, MoveList,
};
pub use options::{OptionsError, RuleOptions};
pub use position::{Position, PositionKey};
pub use rules::{DrawReason, GameResult, MoveError, RuleSet, StandardChess};

pub use chess_core::{
    CastleSide, CastlingRights, Color, Fen, FenError, File, Move, MoveKind, Piece, PieceKind,
    Rank, Square,
};
