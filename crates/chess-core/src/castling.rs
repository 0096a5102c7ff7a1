//! Castling availability.

use std::fmt;

use crate::{Color, FenError};

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// O-O
    Kingside,
    /// O-O-O
    Queenside,
}

/// The four castling-availability flags of a FEN record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => 0b0001,
            (Color::White, CastlingSide::Queenside) => 0b0010,
            (Color::Black, CastlingSide::Kingside) => 0b0100,
            (Color::Black, CastlingSide::Queenside) => 0b1000,
        }
    }

    /// Returns true if `color` may still castle to `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Grants one right.
    #[inline]
    pub fn insert(&mut self, color: Color, side: CastlingSide) {
        self.0 |= Self::flag(color, side);
    }

    /// Returns true if no right is held.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field (`KQkq`, any subset in that order, or `-`).
    pub fn from_fen(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(CastlingRights::NONE);
        }
        if field.is_empty() {
            return Err(FenError::InvalidCastlingRights(field.to_string()));
        }
        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastlingSide::Kingside),
                'Q' => (Color::White, CastlingSide::Queenside),
                'k' => (Color::Black, CastlingSide::Kingside),
                'q' => (Color::Black, CastlingSide::Queenside),
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            rights.insert(color, side);
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the FEN castling field: `K`, `Q`, `k`, `q` for the rights held, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (color, side, c) in [
            (Color::White, CastlingSide::Kingside, 'K'),
            (Color::White, CastlingSide::Queenside, 'Q'),
            (Color::Black, CastlingSide::Kingside, 'k'),
            (Color::Black, CastlingSide::Queenside, 'q'),
        ] {
            if self.has(color, side) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
