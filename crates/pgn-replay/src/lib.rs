//! Replays PGN move text and produces the final position as FEN.
//!
//! Each SAN half-move goes through the same pipeline:
//! - [`san`] parses the token into a [`MoveDescriptor`]
//! - [`resolve`] finds which piece on the board makes the move
//! - [`apply`] writes the move onto the [`Board`](chess_core::Board)
//! - [`state`] updates side to move, castling rights, en passant and clocks
//!
//! [`Replay`] drives the pipeline one half-move at a time; [`final_position`]
//! does it for a whole PGN game.
//!
//! # Example
//!
//! ```
//! use pgn_replay::final_position;
//!
//! let fen = final_position("1. e4 e5 2. Nf3 Nc6 3. Bb5").unwrap();
//! assert_eq!(
//!     fen,
//!     "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
//! );
//! ```

pub mod apply;
mod config;
mod error;
pub mod movetext;
mod replay;
pub mod resolve;
pub mod san;
pub mod state;
pub mod tags;

pub use config::{ConfigError, ReplayConfig};
pub use error::{MoveError, ReplayError};
pub use movetext::{MovetextError, Turn};
pub use replay::{final_position, final_position_with, Replay};
pub use resolve::ResolvedMove;
pub use san::{Disambiguation, MoveDescriptor, SanError};
pub use state::GameState;
