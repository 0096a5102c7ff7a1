//! Game state tracking: side to move, castling rights, en passant target and
//! the two move counters.

use chess_core::{Board, CastlingRights, CastlingSide, Color, Fen, Piece, Square};

use crate::resolve::{CastleSquares, ResolvedMove};
use crate::MoveError;

/// Everything besides piece placement that a FEN record needs.
///
/// Castling rights are not stored directly: they are derived from whether the
/// king and each corner rook have moved, so a right once lost stays lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    active_color: Color,
    king_moved: [bool; 2],
    /// Indexed by color, then kingside (0) / queenside (1).
    rook_moved: [[bool; 2]; 2],
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    plies: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

const fn side_index(side: CastlingSide) -> usize {
    match side {
        CastlingSide::Kingside => 0,
        CastlingSide::Queenside => 1,
    }
}

impl GameState {
    /// State of the standard starting position.
    pub fn new() -> Self {
        GameState {
            active_color: Color::White,
            king_moved: [false; 2],
            rook_moved: [[false; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            plies: 0,
        }
    }

    /// State described by a FEN record. A missing castling right is recorded
    /// as a moved rook.
    pub fn from_fen(fen: &Fen) -> Self {
        let mut rook_moved = [[false; 2]; 2];
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
                rook_moved[color.index()][side_index(side)] = !fen.castling.has(color, side);
            }
        }
        GameState {
            active_color: fen.active_color,
            king_moved: [false; 2],
            rook_moved,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
            plies: 0,
        }
    }

    /// The side to move next.
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Castling rights still held.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::NONE;
        for color in [Color::White, Color::Black] {
            if self.king_moved[color.index()] {
                continue;
            }
            for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
                if !self.rook_moved[color.index()][side_index(side)] {
                    rights.insert(color, side);
                }
            }
        }
        rights
    }

    /// The en passant target left by the previous half-move.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Half-moves played since this state was created.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Records one half-move. `previous` is the board before `mv` was applied,
    /// `board` the board after.
    ///
    /// Fails without touching the state if either move counter would overflow.
    pub fn advance(
        &mut self,
        previous: &Board,
        board: &Board,
        mv: &ResolvedMove,
    ) -> Result<(), MoveError> {
        let color = mv.color;

        // Every White half-move after the first opens a new turn.
        let fullmove_number = if color == Color::White && self.plies > 0 {
            self.fullmove_number
                .checked_add(1)
                .ok_or(MoveError::CounterOverflow { counter: "full-move number" })?
        } else {
            self.fullmove_number
        };

        let capture = mv.capture || mv.en_passant.is_some() || !previous.is_empty(mv.to);
        let halfmove_clock = if mv.piece == Piece::Pawn || (capture && mv.castle.is_none()) {
            0
        } else {
            self.halfmove_clock
                .checked_add(1)
                .ok_or(MoveError::CounterOverflow { counter: "half-move clock" })?
        };

        match mv.piece {
            Piece::King => self.king_moved[color.index()] = true,
            Piece::Rook => {
                for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
                    if mv.from == CastleSquares::new(color, side).rook_from {
                        self.rook_moved[color.index()][side_index(side)] = true;
                    }
                }
            }
            _ => {}
        }

        self.fullmove_number = fullmove_number;
        self.halfmove_clock = halfmove_clock;
        self.en_passant = en_passant_target(previous, board, mv);
        self.active_color = color.opposite();
        self.plies += 1;
        Ok(())
    }

    /// Renders the FEN record for `board` in this state.
    pub fn to_fen(&self, board: &Board) -> Fen {
        Fen {
            board: *board,
            active_color: self.active_color,
            castling: self.castling_rights(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }
}

/// Serializes a board and its state into a six-field FEN string.
pub fn serialize(board: &Board, state: &GameState) -> String {
    state.to_fen(board).to_string()
}

/// The en passant target created by `mv`, found by comparing the boards
/// before and after it.
///
/// A target exists only after a two-square advance from the pawn's home rank,
/// and only when an enemy pawn now stands beside the advanced pawn.
pub fn en_passant_target(previous: &Board, board: &Board, mv: &ResolvedMove) -> Option<Square> {
    if mv.piece != Piece::Pawn || mv.castle.is_some() {
        return None;
    }
    let color = mv.color;
    let pawn = Some((Piece::Pawn, color));
    let dir = color.pawn_direction();

    let double_push = mv.from.rank() == color.pawn_rank() && mv.from.offset(0, 2 * dir) == Some(mv.to);
    let moved = previous.piece_at(mv.from) == pawn && board.is_empty(mv.from) && board.piece_at(mv.to) == pawn;
    if !double_push || !moved {
        return None;
    }

    let enemy = Some((Piece::Pawn, color.opposite()));
    let flanked = [-1, 1]
        .into_iter()
        .filter_map(|files| mv.to.offset(files, 0))
        .any(|sq| board.piece_at(sq) == enemy);
    if flanked {
        mv.from.offset(0, dir)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(color: Color, piece: Piece, from: &str, to: &str) -> ResolvedMove {
        ResolvedMove {
            color,
            piece,
            from: sq(from),
            to: sq(to),
            promotion: None,
            castle: None,
            capture: false,
            en_passant: None,
        }
    }

    fn played(placement_before: &str, m: &ResolvedMove) -> (Board, Board) {
        let before = Board::from_placement(placement_before).unwrap();
        let mut after = before;
        crate::apply::apply(&mut after, m);
        (before, after)
    }

    #[test]
    fn initial_state_serializes_to_startpos() {
        assert_eq!(serialize(&Board::startpos(), &GameState::new()), Fen::STARTPOS);
    }

    #[test]
    fn double_push_without_neighbor_sets_no_target() {
        let m = mv(Color::White, Piece::Pawn, "e2", "e4");
        let (before, after) = played(Board::STARTPOS_PLACEMENT, &m);
        assert_eq!(en_passant_target(&before, &after, &m), None);
    }

    #[test]
    fn double_push_beside_enemy_pawn_sets_target() {
        let m = mv(Color::Black, Piece::Pawn, "f7", "f5");
        let (before, after) = played("4k3/5p2/8/4P3/8/8/8/4K3", &m);
        assert_eq!(en_passant_target(&before, &after, &m), Some(sq("f6")));

        let m = mv(Color::White, Piece::Pawn, "a2", "a4");
        let (before, after) = played("4k3/8/8/8/1p6/8/P7/4K3", &m);
        assert_eq!(en_passant_target(&before, &after, &m), Some(sq("a3")));
    }

    #[test]
    fn single_push_sets_no_target() {
        let m = mv(Color::Black, Piece::Pawn, "f6", "f5");
        let (before, after) = played("4k3/8/5p2/4P3/8/8/8/4K3", &m);
        assert_eq!(en_passant_target(&before, &after, &m), None);
    }

    #[test]
    fn clocks_and_color() {
        let mut state = GameState::new();
        let m = mv(Color::White, Piece::Pawn, "e2", "e4");
        let (before, after) = played(Board::STARTPOS_PLACEMENT, &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.active_color(), Color::Black);
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.fullmove_number(), 1);
        assert_eq!(state.en_passant(), None);

        let m = mv(Color::Black, Piece::Knight, "g8", "f6");
        let before = after;
        let mut after = before;
        crate::apply::apply(&mut after, &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.halfmove_clock(), 1);
        assert_eq!(state.fullmove_number(), 1);

        let m = mv(Color::White, Piece::Knight, "g1", "f3");
        let before = after;
        let mut after = before;
        crate::apply::apply(&mut after, &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.halfmove_clock(), 2);
        assert_eq!(state.fullmove_number(), 2);
        assert_eq!(state.active_color(), Color::Black);
        assert_eq!(state.plies(), 3);
    }

    #[test]
    fn capture_resets_clock() {
        let mut state = GameState::new();
        let m = mv(Color::White, Piece::Knight, "c3", "d5");
        let (before, after) = played("4k3/8/8/3p4/8/2N5/8/4K3", &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.halfmove_clock(), 0);
    }

    #[test]
    fn king_move_clears_both_rights() {
        let mut state = GameState::new();
        let m = mv(Color::White, Piece::King, "e1", "e2");
        let (before, after) = played("r3k2r/8/8/8/8/8/8/R3K2R", &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.castling_rights().to_string(), "kq");
    }

    #[test]
    fn only_corner_rooks_clear_rights() {
        let mut state = GameState::from_fen(&Fen::parse("r3k2r/8/8/R7/8/8/8/R3K2R w KQkq - 0 1").unwrap());
        let m = mv(Color::White, Piece::Rook, "a5", "a3");
        let (before, after) = played("r3k2r/8/8/R7/8/8/8/R3K2R", &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.castling_rights().to_string(), "KQkq");

        let m = mv(Color::Black, Piece::Rook, "h8", "h5");
        let (before, after) = played("r3k2r/8/8/8/8/R7/8/R3K2R", &m);
        state.advance(&before, &after, &m).unwrap();
        assert_eq!(state.castling_rights().to_string(), "KQq");
    }

    #[test]
    fn rights_are_never_restored() {
        let mut state = GameState::new();
        let out = mv(Color::White, Piece::Rook, "h1", "h3");
        let (before, after) = played("4k3/8/8/8/8/8/8/4K2R", &out);
        state.advance(&before, &after, &out).unwrap();
        let back = mv(Color::Black, Piece::King, "e8", "d8");
        let before = after;
        let mut after = before;
        crate::apply::apply(&mut after, &back);
        state.advance(&before, &after, &back).unwrap();
        let home = mv(Color::White, Piece::Rook, "h3", "h1");
        let before = after;
        let mut after = before;
        crate::apply::apply(&mut after, &home);
        state.advance(&before, &after, &home).unwrap();
        assert_eq!(state.castling_rights().to_string(), "Q");
    }

    #[test]
    fn from_fen_keeps_fields() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/R3K3 b Q - 7 31").unwrap();
        let state = GameState::from_fen(&fen);
        assert_eq!(state.active_color(), Color::Black);
        assert_eq!(state.castling_rights().to_string(), "Q");
        assert_eq!(state.halfmove_clock(), 7);
        assert_eq!(state.fullmove_number(), 31);
        assert_eq!(serialize(&fen.board, &state), "4k3/8/8/8/8/8/8/R3K3 b Q - 7 31");
    }

    #[test]
    fn serialize_is_idempotent() {
        let state = GameState::new();
        let board = Board::startpos();
        assert_eq!(serialize(&board, &state), serialize(&board, &state));
    }

    #[test]
    fn halfmove_clock_overflow_is_an_error() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1").unwrap();
        let mut state = GameState::from_fen(&fen);
        let m = mv(Color::White, Piece::King, "e1", "d1");
        let (before, after) = played("4k3/8/8/8/8/8/8/4K3", &m);
        assert_eq!(
            state.advance(&before, &after, &m),
            Err(MoveError::CounterOverflow { counter: "half-move clock" })
        );
        assert_eq!(state, GameState::from_fen(&fen));
    }

    #[test]
    fn fullmove_number_overflow_is_an_error() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        let mut state = GameState::from_fen(&fen);
        let m = mv(Color::Black, Piece::King, "e8", "d8");
        let (before, after) = played("4k3/8/8/8/8/8/8/4K3", &m);
        state.advance(&before, &after, &m).unwrap();

        let m = mv(Color::White, Piece::King, "e1", "d1");
        let (before, after) = played("3k4/8/8/8/8/8/8/4K3", &m);
        let saved = state.clone();
        assert_eq!(
            state.advance(&before, &after, &m),
            Err(MoveError::CounterOverflow { counter: "full-move number" })
        );
        assert_eq!(state, saved);
    }
}
