//! Replay errors.

use chess_core::{Color, Piece, Square};
use thiserror::Error;

use crate::movetext::MovetextError;
use crate::san::SanError;

/// Why a single half-move could not be played.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    /// The token does not match any recognized SAN shape.
    #[error("malformed move: {0}")]
    Malformed(#[from] SanError),

    /// No piece of the right type and color can make the move.
    #[error("no {color} {piece} can move to {to}")]
    NoLegalOrigin { piece: Piece, color: Color, to: Square },

    /// More than one piece qualifies and nothing in the move tells them apart.
    #[error("ambiguous {color} {piece} move to {to}: {first} and {second} both qualify")]
    AmbiguousOrigin {
        piece: Piece,
        color: Color,
        to: Square,
        first: Square,
        second: Square,
    },

    /// The backward scan for a pushing pawn reached the board edge.
    #[error("no {color} pawn found behind {to}")]
    PawnSourceNotFound { color: Color, to: Square },

    /// A move counter seeded from the starting FEN cannot count any further.
    #[error("{counter} overflows")]
    CounterOverflow { counter: &'static str },
}

/// Errors that abort the replay of a game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// A half-move failed; `ply` counts half-moves from 1.
    #[error("ply {ply} ({token}): {source}")]
    Move {
        ply: u32,
        token: String,
        #[source]
        source: MoveError,
    },

    /// The game is longer than the configured limit.
    #[error("game exceeds the limit of {limit} half-moves")]
    PlyLimitExceeded { limit: usize },

    /// The movetext could not be split into moves.
    #[error(transparent)]
    Movetext(#[from] MovetextError),
}

impl ReplayError {
    /// The half-move error kind, if this error came from a half-move.
    pub fn move_error(&self) -> Option<&MoveError> {
        match self {
            ReplayError::Move { source, .. } => Some(source),
            _ => None,
        }
    }
}
