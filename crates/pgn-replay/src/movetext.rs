//! Splitting PGN movetext into numbered turns.

use thiserror::Error;

/// Errors in the structure of the movetext.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovetextError {
    #[error("move {0} has no moves")]
    EmptyTurn(u32),

    #[error("move before the first move number: {0}")]
    MissingMoveNumber(String),

    #[error("more than two moves after move number {number}: {token}")]
    TooManyMoves { number: u32, token: String },

    #[error("unsupported movetext syntax: {0}")]
    Unsupported(String),
}

/// One numbered turn: White's move and, unless the game ended, Black's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub number: u32,
    pub white: String,
    pub black: Option<String>,
}

impl Turn {
    /// The half-move tokens of this turn in order.
    pub fn moves(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.white.as_str()).chain(self.black.as_deref())
    }
}

/// Returns the movetext of a PGN game: everything after the tag-pair header.
pub fn movetext(pgn: &str) -> String {
    pgn.lines()
        .skip_while(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('[')
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Groups movetext tokens into turns. Parsing stops at a game-termination
/// marker; comments, variations, NAGs and `N...` continuations are rejected.
pub fn parse_turns(text: &str) -> Result<Vec<Turn>, MovetextError> {
    let mut turns = Vec::new();
    let mut current: Option<(u32, Vec<String>)> = None;

    for token in text.split_whitespace() {
        if RESULTS.contains(&token) {
            break;
        }
        if token.starts_with(['{', '}', ';', '(', ')', '$', '%']) {
            return Err(MovetextError::Unsupported(token.to_string()));
        }

        let san = match split_move_number(token)? {
            Some((number, rest)) => {
                if let Some(turn) = current.take() {
                    turns.push(finish(turn)?);
                }
                current = Some((number, Vec::with_capacity(2)));
                if rest.is_empty() {
                    continue;
                }
                rest
            }
            None => token,
        };

        let (number, moves) = current
            .as_mut()
            .ok_or_else(|| MovetextError::MissingMoveNumber(san.to_string()))?;
        if moves.len() == 2 {
            return Err(MovetextError::TooManyMoves {
                number: *number,
                token: san.to_string(),
            });
        }
        moves.push(san.to_string());
    }

    if let Some(turn) = current {
        turns.push(finish(turn)?);
    }
    Ok(turns)
}

fn finish((number, moves): (u32, Vec<String>)) -> Result<Turn, MovetextError> {
    let mut moves = moves.into_iter();
    let white = moves.next().ok_or(MovetextError::EmptyTurn(number))?;
    Ok(Turn {
        number,
        white,
        black: moves.next(),
    })
}

/// Splits `12.` or `12.Nf3` into the number and the remainder.
fn split_move_number(token: &str) -> Result<Option<(u32, &str)>, MovetextError> {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Ok(None);
    }
    let Some(rest) = token[digits..].strip_prefix('.') else {
        return Ok(None);
    };
    if rest.starts_with('.') {
        return Err(MovetextError::Unsupported(token.to_string()));
    }
    let number = token[..digits]
        .parse()
        .map_err(|_| MovetextError::Unsupported(token.to_string()))?;
    Ok(Some((number, rest)))
}
