//! WebAssembly bindings for the chess rules engine.
//!
//! This crate is the boundary a browser board calls into. It owns a
//! [`chess_engine::Game`] and translates squares and pieces to and from
//! strings; every rule lives in the engine.
//!
//! # Usage
//!
//! ```javascript
//! import init, { Game } from 'chess-wasm';
//!
//! await init();
//!
//! const game = new Game();
//! console.log(game.legalMovesFor("e2")); // ["e3", "e4"]
//!
//! game.applyMove("e2", "e4");
//! console.log(game.toFen());
//! console.log(game.status()); // { inCheck: false, checkmate: false, stalemate: false }
//! ```

use chess_engine::{Color, GameResult, PieceKind, RuleOptions, Square};
use wasm_bindgen::prelude::*;

/// A chess game that can be manipulated from JavaScript.
#[wasm_bindgen]
pub struct Game {
    inner: chess_engine::Game,
}

#[wasm_bindgen]
impl Game {
    /// Creates a new game with the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Game {
            inner: chess_engine::Game::new(),
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// Returns an error if the FEN is invalid.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<Game, JsError> {
        let inner = chess_engine::Game::from_fen(fen).map_err(js_error)?;
        Ok(Game { inner })
    }

    /// Creates a new game with rule options given as TOML.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(toml: &str) -> Result<Game, JsError> {
        let options = RuleOptions::from_toml_str(toml).map_err(js_error)?;
        Ok(Game {
            inner: chess_engine::Game::with_options(options),
        })
    }

    /// Creates a game from a FEN string with rule options given as TOML.
    #[wasm_bindgen(js_name = fromFenWithOptions)]
    pub fn from_fen_with_options(fen: &str, toml: &str) -> Result<Game, JsError> {
        let options = RuleOptions::from_toml_str(toml).map_err(js_error)?;
        let inner = chess_engine::Game::from_fen_with_options(fen, options).map_err(js_error)?;
        Ok(Game { inner })
    }

    /// Returns the current position as a FEN string.
    #[wasm_bindgen(js_name = toFen)]
    pub fn to_fen(&self) -> String {
        self.inner.to_fen()
    }

    /// Returns an array of legal moves in UCI format.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<String> {
        self.inner.legal_moves().iter().map(|m| m.to_uci()).collect()
    }

    /// Returns the squares the piece on `square` can move to.
    ///
    /// Empty for an unknown or empty square, or a piece of the side not to move.
    #[wasm_bindgen(js_name = legalMovesFor)]
    pub fn legal_moves_for(&self, square: &str) -> Vec<String> {
        let Some(from) = Square::from_algebraic(square) else {
            return Vec::new();
        };
        self.inner
            .legal_moves_for(from)
            .into_iter()
            .map(|sq| sq.to_algebraic())
            .collect()
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// `promotion` names the piece a pawn becomes ("q", "rook", ...); the
    /// default is a queen. Returns an error if the move is illegal, leaving
    /// the game unchanged.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<String>,
    ) -> Result<(), JsError> {
        let from = parse_square(from)?;
        let to = parse_square(to)?;
        let promotion = match promotion.as_deref() {
            Some(name) => Some(
                parse_piece_kind(name)
                    .ok_or_else(|| JsError::new(&format!("Unknown piece: {}", name)))?,
            ),
            None => None,
        };
        self.inner
            .make_move_with_promotion(from, to, promotion)
            .map_err(js_error)
    }

    /// Returns `{ inCheck, checkmate, stalemate }` for the side to move.
    #[wasm_bindgen]
    pub fn status(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.status()).map_err(js_error)
    }

    /// Returns true if the current side to move is in check.
    #[wasm_bindgen(js_name = isCheck)]
    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    /// Returns true if the game is over (checkmate, stalemate, resignation or claimed draw).
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Returns the game result if the game is over.
    ///
    /// Returns one of: "white_wins", "black_wins", "draw", or null if game is ongoing.
    #[wasm_bindgen]
    pub fn result(&self) -> Option<String> {
        self.inner.result().map(|r| {
            match r {
                GameResult::WhiteWins => "white_wins",
                GameResult::BlackWins => "black_wins",
                GameResult::Draw(_) => "draw",
            }
            .to_string()
        })
    }

    /// Returns true if a threefold repetition or fifty-move draw can be claimed.
    #[wasm_bindgen(js_name = canClaimDraw)]
    pub fn can_claim_draw(&self) -> bool {
        self.inner.can_claim_draw()
    }

    /// Claims a draw. Returns an error if no draw is available.
    #[wasm_bindgen(js_name = claimDraw)]
    pub fn claim_draw(&mut self) -> Result<(), JsError> {
        self.inner.claim_draw().map_err(js_error)
    }

    /// Resigns for the side to move.
    pub fn resign(&mut self) -> Result<(), JsError> {
        self.inner.resign().map_err(js_error)
    }

    /// Takes back the last move. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        self.inner.undo().is_some()
    }

    /// Returns the side to move ("white" or "black").
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        match self.inner.position().side_to_move {
            Color::White => "white".to_string(),
            Color::Black => "black".to_string(),
        }
    }

    /// Returns the piece at the given square in FEN notation.
    ///
    /// Returns null if the square is empty.
    /// Returns a string like "P" (white pawn), "k" (black king), etc.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, square: &str) -> Option<String> {
        let sq = Square::from_algebraic(square)?;
        let piece = self.inner.position().piece_at(sq)?;
        Some(piece.to_fen_char().to_string())
    }

    /// Resets the game to the starting position, keeping its rule options.
    pub fn reset(&mut self) {
        self.inner = chess_engine::Game::with_options(*self.inner.rules().options());
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_square(s: &str) -> Result<Square, JsError> {
    Square::from_algebraic(s).ok_or_else(|| JsError::new(&format!("Invalid square: {}", s)))
}

fn parse_piece_kind(name: &str) -> Option<PieceKind> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return PieceKind::from_char(c);
    }
    match name.to_ascii_lowercase().as_str() {
        "pawn" => Some(PieceKind::Pawn),
        "knight" => Some(PieceKind::Knight),
        "bishop" => Some(PieceKind::Bishop),
        "rook" => Some(PieceKind::Rook),
        "queen" => Some(PieceKind::Queen),
        "king" => Some(PieceKind::King),
        _ => None,
    }
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {}
