//! Board mutation.

use chess_core::Board;

use crate::resolve::{CastleSquares, ResolvedMove};

/// Applies a resolved half-move to the board in place.
///
/// Only the grid is touched; clocks and rights are the state tracker's concern.
pub fn apply(board: &mut Board, mv: &ResolvedMove) {
    if let Some(side) = mv.castle {
        let squares = CastleSquares::new(mv.color, side);
        let king = board.take(squares.king_from);
        let rook = board.take(squares.rook_from);
        board.set(squares.king_to, king);
        board.set(squares.rook_to, rook);
        return;
    }

    board.take(mv.from);
    if let Some(victim) = mv.en_passant {
        board.take(victim);
    }
    let piece = mv.promotion.unwrap_or(mv.piece);
    board.set(mv.to, Some((piece, mv.color)));
}
