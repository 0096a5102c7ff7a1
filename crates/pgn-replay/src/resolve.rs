//! Origin-square resolution.
//!
//! SAN names the destination and the piece type but usually not the origin.
//! The resolver finds it from the board: candidates are located, narrowed by
//! the token's disambiguation hint, then by movement geometry and path
//! clearance. No legality checking is done (pins, checks); the first
//! qualifying rook, bishop or knight in scan order wins.

use chess_core::{Board, CastlingSide, Color, File, Piece, Square};
use tracing::trace;

use crate::san::{Disambiguation, MoveDescriptor};
use crate::state::GameState;
use crate::{MoveError, ReplayConfig};

/// A half-move with its origin known, ready to be applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMove {
    pub color: Color,
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Piece written on `to` instead of the pawn.
    pub promotion: Option<Piece>,
    /// Set for castling; `from`/`to` are then the king's squares.
    pub castle: Option<CastlingSide>,
    /// Written as a capture (`x`).
    pub capture: bool,
    /// The pawn captured en passant stands on this square, not on `to`.
    pub en_passant: Option<Square>,
}

/// Finds the origin of `descriptor` for the side to move in `state`.
pub fn resolve(
    board: &Board,
    state: &GameState,
    descriptor: &MoveDescriptor,
    config: &ReplayConfig,
) -> Result<ResolvedMove, MoveError> {
    let color = state.active_color();
    match *descriptor {
        MoveDescriptor::Castle(side) => resolve_castle(board, color, side, config.strict_castling),
        MoveDescriptor::Normal {
            piece: Piece::Pawn,
            disambiguation,
            to,
            capture,
            promotion,
        } => {
            let (from, en_passant) = match disambiguation {
                Disambiguation::File(file) if capture => {
                    pawn_capture_origin(board, color, file, to, state.en_passant())?
                }
                _ => (pawn_push_origin(board, color, to)?, None),
            };
            Ok(ResolvedMove {
                color,
                piece: Piece::Pawn,
                from,
                to,
                promotion,
                castle: None,
                capture,
                en_passant,
            })
        }
        MoveDescriptor::Normal {
            piece,
            disambiguation,
            to,
            capture,
            promotion,
        } => {
            let from = resolve_piece(board, piece, color, disambiguation, to)?;
            Ok(ResolvedMove {
                color,
                piece,
                from,
                to,
                promotion,
                castle: None,
                capture,
                en_passant: None,
            })
        }
    }
}

/// Picks the origin of a non-pawn move among the pieces on the board.
pub fn resolve_piece(
    board: &Board,
    piece: Piece,
    color: Color,
    disambiguation: Disambiguation,
    to: Square,
) -> Result<Square, MoveError> {
    let no_origin = MoveError::NoLegalOrigin { piece, color, to };
    let candidates = board.locate(piece, color);
    trace!(?piece, ?color, %to, ?candidates, "locating origin");

    let candidates = if disambiguation.is_none() {
        candidates
    } else {
        let hinted: Vec<Square> = candidates
            .into_iter()
            .filter(|&sq| disambiguation.matches(sq))
            .collect();
        match hinted.as_slice() {
            [] => return Err(no_origin),
            [only] => return Ok(*only),
            _ => hinted,
        }
    };

    match piece {
        Piece::Rook | Piece::Bishop | Piece::Knight => candidates
            .into_iter()
            .find(|&from| can_reach(board, piece, from, to))
            .ok_or(no_origin),
        // A lone queen or king is moved without looking at its path.
        Piece::Queen | Piece::King if candidates.len() == 1 => Ok(candidates[0]),
        Piece::Queen | Piece::King => {
            let reachable: Vec<Square> = candidates
                .into_iter()
                .filter(|&from| can_reach(board, piece, from, to))
                .collect();
            match reachable.as_slice() {
                [] => Err(no_origin),
                [only] => Ok(*only),
                [first, second, ..] => Err(MoveError::AmbiguousOrigin {
                    piece,
                    color,
                    to,
                    first: *first,
                    second: *second,
                }),
            }
        }
        Piece::Pawn => Err(no_origin),
    }
}

/// Returns true if `piece` standing on `from` moves to `to` by its geometry,
/// with every square in between empty for sliding pieces.
pub fn can_reach(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let rows = to.row() as i8 - from.row() as i8;
    let cols = to.col() as i8 - from.col() as i8;
    let straight = rows == 0 || cols == 0;
    let diagonal = rows.abs() == cols.abs();

    match piece {
        Piece::Rook => straight && path_clear(board, from, to),
        Piece::Bishop => diagonal && path_clear(board, from, to),
        Piece::Queen => (straight || diagonal) && path_clear(board, from, to),
        Piece::Knight => matches!((rows.abs(), cols.abs()), (1, 2) | (2, 1)),
        Piece::King => rows.abs() <= 1 && cols.abs() <= 1,
        Piece::Pawn => false,
    }
}

/// Walks the straight or diagonal line strictly between `from` and `to`.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let row_step = (to.row() as i8 - from.row() as i8).signum();
    let col_step = (to.col() as i8 - from.col() as i8).signum();
    // `offset` counts ranks upward, rows count downward.
    let mut sq = from.offset(col_step, -row_step);
    while let Some(current) = sq {
        if current == to {
            return true;
        }
        if !board.is_empty(current) {
            return false;
        }
        sq = current.offset(col_step, -row_step);
    }
    false
}

/// Scans from the destination back toward the mover's side for the first
/// pawn of that color on the same file.
pub fn pawn_push_origin(board: &Board, color: Color, to: Square) -> Result<Square, MoveError> {
    let back = -color.pawn_direction();
    let mut sq = to.offset(0, back);
    while let Some(current) = sq {
        if board.piece_at(current) == Some((Piece::Pawn, color)) {
            return Ok(current);
        }
        sq = current.offset(0, back);
    }
    Err(MoveError::PawnSourceNotFound { color, to })
}

/// The origin of a pawn capture: the given file, one rank behind `to`.
///
/// A capture onto an empty square is en passant and only allowed when `to` is
/// the tracked en passant target; the second value is the square of the pawn
/// it removes.
pub fn pawn_capture_origin(
    board: &Board,
    color: Color,
    file: File,
    to: Square,
    en_passant_target: Option<Square>,
) -> Result<(Square, Option<Square>), MoveError> {
    let no_origin = MoveError::NoLegalOrigin {
        piece: Piece::Pawn,
        color,
        to,
    };
    let back = -color.pawn_direction();
    let files = file.index() as i8 - to.file().index() as i8;

    let from = to.offset(files, back).ok_or(no_origin.clone())?;
    if board.piece_at(from) != Some((Piece::Pawn, color)) {
        return Err(no_origin);
    }
    if !board.is_empty(to) {
        return Ok((from, None));
    }

    let victim = to.offset(0, back);
    let eligible = to.rank() == color.en_passant_rank()
        && en_passant_target == Some(to)
        && victim.and_then(|sq| board.piece_at(sq)) == Some((Piece::Pawn, color.opposite()));
    if eligible {
        Ok((from, victim))
    } else {
        Err(no_origin)
    }
}

/// Castling squares are fixed: the king's home square and its landing square.
fn resolve_castle(
    board: &Board,
    color: Color,
    side: CastlingSide,
    strict: bool,
) -> Result<ResolvedMove, MoveError> {
    let squares = CastleSquares::new(color, side);
    if strict
        && (board.piece_at(squares.king_from) != Some((Piece::King, color))
            || board.piece_at(squares.rook_from) != Some((Piece::Rook, color)))
    {
        return Err(MoveError::NoLegalOrigin {
            piece: Piece::King,
            color,
            to: squares.king_to,
        });
    }
    Ok(ResolvedMove {
        color,
        piece: Piece::King,
        from: squares.king_from,
        to: squares.king_to,
        promotion: None,
        castle: Some(side),
        capture: false,
        en_passant: None,
    })
}

/// King and rook squares of one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastleSquares {
    pub fn new(color: Color, side: CastlingSide) -> Self {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
            },
            (Color::White, CastlingSide::Queenside) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
            },
            (Color::Black, CastlingSide::Kingside) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
            },
            (Color::Black, CastlingSide::Queenside) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
            },
        }
    }
}
