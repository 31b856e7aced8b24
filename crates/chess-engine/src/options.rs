//! Rule options loaded from TOML.
//!
//! Every field has a default, so an empty document yields
//! [`RuleOptions::default`].

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading rule options.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// Failed to read the options file from disk.
    #[error("Failed to read options file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the options as valid TOML.
    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured default promotion piece is not a legal promotion target.
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Tunable rule semantics for [`StandardChess`](crate::StandardChess).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Only the side to move may query or move its pieces.
    pub enforce_turn_order: bool,
    /// Capturing a rook on its home corner clears that castling right.
    pub revoke_castling_on_rook_capture: bool,
    /// Piece a pawn becomes on the last rank when the caller does not choose.
    pub default_promotion: PieceKind,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            enforce_turn_order: true,
            revoke_castling_on_rook_capture: true,
            default_promotion: PieceKind::Queen,
        }
    }
}

impl RuleOptions {
    /// Parses options from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] for invalid TOML or unknown values, and
    /// [`OptionsError::InvalidPromotion`] if `default_promotion` is a king or pawn.
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        let options: RuleOptions = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Read`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.default_promotion.is_promotion_target() {
            return Err(OptionsError::InvalidPromotion(self.default_promotion));
        }
        Ok(())
    }
}
