//! The replay loop: a left-to-right fold of half-moves over one board.

use chess_core::{Board, Fen, FenError};
use tracing::{debug, warn};

use crate::apply::apply;
use crate::movetext::{movetext, parse_turns, Turn};
use crate::resolve::resolve;
use crate::san;
use crate::state::{serialize, GameState};
use crate::{MoveError, ReplayConfig, ReplayError};

/// A game being replayed: the board, its tracked state and the settings.
///
/// Each half-move is parsed, resolved, applied and recorded before the next
/// one is looked at. A failed half-move leaves the board and state untouched.
#[derive(Debug, Clone)]
pub struct Replay {
    board: Board,
    state: GameState,
    config: ReplayConfig,
}

impl Default for Replay {
    fn default() -> Self {
        Self::new()
    }
}

impl Replay {
    /// Starts from the standard initial position.
    pub fn new() -> Self {
        Self::with_config(ReplayConfig::default())
    }

    /// Starts from the standard initial position with custom settings.
    pub fn with_config(config: ReplayConfig) -> Self {
        Replay {
            board: Board::startpos(),
            state: GameState::new(),
            config,
        }
    }

    /// Starts from an arbitrary position.
    pub fn from_fen(fen: &str, config: ReplayConfig) -> Result<Self, FenError> {
        let fen = Fen::parse(fen)?;
        Ok(Replay {
            board: fen.board,
            state: GameState::from_fen(&fen),
            config,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current position as a FEN string.
    pub fn fen(&self) -> String {
        serialize(&self.board, &self.state)
    }

    /// Plays one half-move for the side to move.
    pub fn play(&mut self, token: &str) -> Result<(), ReplayError> {
        let ply = self.state.plies() + 1;
        if let Some(limit) = self.config.max_plies {
            if ply as usize > limit {
                warn!(limit, "half-move limit reached");
                return Err(ReplayError::PlyLimitExceeded { limit });
            }
        }

        self.step(token).map_err(|source| {
            warn!(ply, token, error = %source, "replay aborted");
            ReplayError::Move {
                ply,
                token: token.to_string(),
                source,
            }
        })
    }

    fn step(&mut self, token: &str) -> Result<(), MoveError> {
        let descriptor = san::parse(token)?;
        let mv = resolve(&self.board, &self.state, &descriptor, &self.config)?;

        let mut board = self.board;
        apply(&mut board, &mv);
        self.state.advance(&self.board, &board, &mv)?;
        self.board = board;

        debug!(
            ply = self.state.plies(),
            token,
            from = %mv.from,
            to = %mv.to,
            "applied"
        );
        Ok(())
    }

    /// Plays White's move and, if present, Black's reply.
    pub fn play_turn(&mut self, turn: &Turn) -> Result<(), ReplayError> {
        turn.moves().try_for_each(|token| self.play(token))
    }

    /// Plays a sequence of turns in order, stopping at the first failure.
    pub fn play_turns(&mut self, turns: &[Turn]) -> Result<(), ReplayError> {
        turns.iter().try_for_each(|turn| self.play_turn(turn))
    }
}

/// Replays the movetext of a PGN game from the initial position and returns
/// the final position as FEN.
pub fn final_position(pgn: &str) -> Result<String, ReplayError> {
    final_position_with(pgn, ReplayConfig::default())
}

/// Like [`final_position`], with custom settings.
pub fn final_position_with(pgn: &str, config: ReplayConfig) -> Result<String, ReplayError> {
    let turns = parse_turns(&movetext(pgn))?;
    let mut replay = Replay::with_config(config);
    replay.play_turns(&turns)?;
    debug!(turns = turns.len(), "replay finished");
    Ok(replay.fen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SanError;

    #[test]
    fn zero_moves_is_startpos() {
        assert_eq!(Replay::new().fen(), Fen::STARTPOS);
        assert_eq!(final_position("").unwrap(), Fen::STARTPOS);
    }

    #[test]
    fn failed_move_reports_ply_and_token() {
        let mut replay = Replay::new();
        replay.play("e4").unwrap();
        let err = replay.play("Qz9").unwrap_err();
        assert_eq!(
            err,
            ReplayError::Move {
                ply: 2,
                token: "Qz9".to_string(),
                source: MoveError::Malformed(SanError::InvalidSquare("Qz9".to_string())),
            }
        );
        assert!(err.to_string().contains("ply 2"));
    }

    #[test]
    fn failed_move_leaves_position_untouched() {
        let mut replay = Replay::new();
        replay.play("e4").unwrap();
        let before = replay.fen();
        assert!(replay.play("Bb4").is_err());
        assert_eq!(replay.fen(), before);
    }

    #[test]
    fn ply_limit() {
        let config = ReplayConfig {
            max_plies: Some(2),
            ..ReplayConfig::default()
        };
        let mut replay = Replay::with_config(config);
        replay.play("e4").unwrap();
        replay.play("e5").unwrap();
        assert_eq!(
            replay.play("Nf3"),
            Err(ReplayError::PlyLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn movetext_errors_surface() {
        assert!(matches!(
            final_position("1. e4 {comment} e5"),
            Err(ReplayError::Movetext(_))
        ));
    }

    #[test]
    fn from_fen_rejects_bad_fen() {
        assert!(Replay::from_fen("not a fen", ReplayConfig::default()).is_err());
    }
}
