//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`CastlingRights`] and [`CastleSide`]
//! - [`Move`] and [`MoveKind`] for move candidates
//! - FEN parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
