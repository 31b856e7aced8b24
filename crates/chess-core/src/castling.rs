//! Castling sides and castling rights.

use std::fmt;

use crate::{Color, File, Square};

/// The side of the board a king castles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the h-file (O-O).
    Kingside,
    /// Towards the a-file (O-O-O).
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The file the rook starts on.
    #[inline]
    pub const fn rook_file(self) -> File {
        match self {
            CastleSide::Kingside => File::H,
            CastleSide::Queenside => File::A,
        }
    }

    /// The file the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        }
    }

    /// The file the rook lands on, adjacent to the king's destination.
    #[inline]
    pub const fn rook_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::F,
            CastleSide::Queenside => File::D,
        }
    }

    /// Files strictly between king and rook; all must be empty.
    pub const fn between_files(self) -> &'static [File] {
        match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Files the king crosses or lands on; none may be attacked.
    pub const fn king_path_files(self) -> &'static [File] {
        match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::D, File::C],
        }
    }

    /// The rook's home corner for the given color.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        Square::new(self.rook_file(), color.back_rank())
    }

    /// Returns the side whose rook starts on `square` for `color`, if any.
    pub fn from_rook_home(square: Square, color: Color) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.rook_home(color) == square)
    }
}

/// Castling availability, four independent flags.
///
/// Rights only ever get removed during a game; there is no way to grant
/// one back other than decoding a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` still holds the right to castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, CastleSide::Kingside)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, CastleSide::Queenside)
    }

    /// Removes a single right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true if every right in `self` is also held by `other`.
    #[inline]
    pub const fn is_subset_of(self, other: CastlingRights) -> bool {
        self.0 & !other.0 == 0
    }

    /// Parses the FEN castling field.
    ///
    /// `K`, `Q`, `k` and `q` set their right wherever they appear. Any other
    /// character, `-` included, is ignored.
    pub fn from_fen(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights(flags)
    }
}

impl fmt::Display for CastlingRights {
    /// Canonical `KQkq` order, or `-` when no right remains.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (flag, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & flag != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
