//! Core types for replaying chess games.
//!
//! This crate provides the value types shared by the replay engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Board`], the 8×8 grid, with piece lookup
//! - [`CastlingRights`] and [`Fen`] for FEN parsing and serialization

mod board;
mod castling;
mod color;
mod fen;
mod piece;
mod square;

pub use board::{Board, Occupant};
pub use castling::{CastlingRights, CastlingSide};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
