//! Standard Algebraic Notation (SAN) move descriptors.
//!
//! A SAN token is parsed on its own, without looking at the board. The result
//! is a [`MoveDescriptor`] naming the moving piece, the destination square and
//! whatever hint the token gives about the origin. Finding the origin is the
//! resolver's job.
//!
//! Grammar (check, mate and annotation suffixes `+ # ! ?` are stripped first):
//!
//! ```text
//! san       := castle | piece-move | pawn-move
//! castle    := "O-O" | "O-O-O" | "0-0" | "0-0-0"
//! piece-move:= PIECE [file] [rank] ["x"] square
//! pawn-move := file ["x" file] rank [["="] PROMOTION]
//! ```

use chess_core::{CastlingSide, File, Piece, Rank, Square};
use thiserror::Error;

/// Syntax errors in a SAN token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty move")]
    Empty,

    #[error("unrecognized move syntax: {0}")]
    InvalidFormat(String),

    #[error("invalid piece letter '{0}'")]
    InvalidPiece(char),

    #[error("invalid destination square in {0}")]
    InvalidSquare(String),

    #[error("invalid disambiguation in {0}")]
    InvalidDisambiguation(String),

    #[error("invalid castling notation: {0}")]
    InvalidCastling(String),

    #[error("invalid promotion in {0}")]
    InvalidPromotion(String),

    #[error("pawn move to the last rank without promotion: {0}")]
    MissingPromotion(String),

    #[error("pawn capture must move to an adjacent file: {0}")]
    InvalidPawnCapture(String),
}

/// The origin hint a SAN token gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disambiguation {
    #[default]
    None,
    File(File),
    Rank(Rank),
    Square(Square),
}

impl Disambiguation {
    /// Returns true if `sq` is compatible with the hint.
    pub fn matches(self, sq: Square) -> bool {
        match self {
            Disambiguation::None => true,
            Disambiguation::File(file) => sq.file() == file,
            Disambiguation::Rank(rank) => sq.rank() == rank,
            Disambiguation::Square(square) => sq == square,
        }
    }

    /// Returns true if the token carried no hint.
    pub fn is_none(self) -> bool {
        self == Disambiguation::None
    }
}

/// One parsed half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDescriptor {
    /// `O-O` or `O-O-O`.
    Castle(CastlingSide),
    /// Any other move. Pawn captures carry their origin file as a
    /// [`Disambiguation::File`].
    Normal {
        piece: Piece,
        disambiguation: Disambiguation,
        to: Square,
        capture: bool,
        promotion: Option<Piece>,
    },
}

impl MoveDescriptor {
    /// The piece that moves (the king for castling).
    pub fn piece(&self) -> Piece {
        match self {
            MoveDescriptor::Castle(_) => Piece::King,
            MoveDescriptor::Normal { piece, .. } => *piece,
        }
    }

    /// True if the token was written as a capture.
    pub fn is_capture(&self) -> bool {
        matches!(self, MoveDescriptor::Normal { capture: true, .. })
    }
}

impl std::str::FromStr for MoveDescriptor {
    type Err = SanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses one SAN token.
pub fn parse(token: &str) -> Result<MoveDescriptor, SanError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SanError::Empty);
    }
    if !token.is_ascii() {
        return Err(SanError::InvalidFormat(token.to_string()));
    }

    let body = token.trim_end_matches(['+', '#', '!', '?']);
    let first = body
        .chars()
        .next()
        .ok_or_else(|| SanError::InvalidFormat(token.to_string()))?;

    match first {
        'O' | '0' => parse_castle(body),
        'a'..='h' => parse_pawn(body),
        c if c.is_ascii_uppercase() => {
            let piece = Piece::from_san_char(c).ok_or(SanError::InvalidPiece(c))?;
            parse_piece(piece, &body[1..], body)
        }
        _ => Err(SanError::InvalidFormat(token.to_string())),
    }
}

fn parse_castle(body: &str) -> Result<MoveDescriptor, SanError> {
    match body {
        "O-O" | "0-0" => Ok(MoveDescriptor::Castle(CastlingSide::Kingside)),
        "O-O-O" | "0-0-0" => Ok(MoveDescriptor::Castle(CastlingSide::Queenside)),
        _ => Err(SanError::InvalidCastling(body.to_string())),
    }
}

/// `rest` is everything after the piece letter. The destination is anchored
/// at the end; whatever precedes it (minus a capture mark) is the hint.
fn parse_piece(piece: Piece, rest: &str, body: &str) -> Result<MoveDescriptor, SanError> {
    if rest.len() < 2 {
        return Err(SanError::InvalidSquare(body.to_string()));
    }
    let (head, dest) = rest.split_at(rest.len() - 2);
    let to = Square::from_algebraic(dest).ok_or_else(|| SanError::InvalidSquare(body.to_string()))?;

    let (hint, capture) = match head.strip_suffix('x') {
        Some(hint) => (hint, true),
        None => (head, false),
    };
    let disambiguation =
        parse_disambiguation(hint).ok_or_else(|| SanError::InvalidDisambiguation(body.to_string()))?;

    Ok(MoveDescriptor::Normal {
        piece,
        disambiguation,
        to,
        capture,
        promotion: None,
    })
}

fn parse_disambiguation(hint: &str) -> Option<Disambiguation> {
    let mut chars = hint.chars();
    let hint = match (chars.next(), chars.next(), chars.next()) {
        (None, _, _) => Disambiguation::None,
        (Some(c), None, _) => match (File::from_char(c), Rank::from_char(c)) {
            (Some(file), _) => Disambiguation::File(file),
            (None, Some(rank)) => Disambiguation::Rank(rank),
            (None, None) => return None,
        },
        (Some(_), Some(_), None) => Disambiguation::Square(Square::from_algebraic(hint)?),
        _ => return None,
    };
    Some(hint)
}

fn parse_pawn(body: &str) -> Result<MoveDescriptor, SanError> {
    let bytes = body.as_bytes();
    let capture = bytes.get(1) == Some(&b'x');

    let (dest, tail) = if capture {
        (body.get(2..4), body.get(4..))
    } else {
        (body.get(0..2), body.get(2..))
    };
    let to = dest
        .and_then(Square::from_algebraic)
        .ok_or_else(|| SanError::InvalidSquare(body.to_string()))?;

    let disambiguation = if capture {
        let from_file =
            File::from_char(bytes[0] as char).ok_or_else(|| SanError::InvalidFormat(body.to_string()))?;
        if from_file.index().abs_diff(to.file().index()) != 1 {
            return Err(SanError::InvalidPawnCapture(body.to_string()));
        }
        Disambiguation::File(from_file)
    } else {
        Disambiguation::None
    };

    let promotion = parse_promotion(tail.unwrap_or_default(), body)?;
    let last_rank = matches!(to.rank(), Rank::R1 | Rank::R8);
    match (last_rank, promotion) {
        (true, None) => return Err(SanError::MissingPromotion(body.to_string())),
        (false, Some(_)) => return Err(SanError::InvalidPromotion(body.to_string())),
        _ => {}
    }

    Ok(MoveDescriptor::Normal {
        piece: Piece::Pawn,
        disambiguation,
        to,
        capture,
        promotion,
    })
}

fn parse_promotion(tail: &str, body: &str) -> Result<Option<Piece>, SanError> {
    if tail.is_empty() {
        return Ok(None);
    }
    let letter = tail.strip_prefix('=').unwrap_or(tail);
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match Piece::from_san_char(c) {
            Some(piece) if piece.is_promotion_target() => Ok(Some(piece)),
            _ => Err(SanError::InvalidPromotion(body.to_string())),
        },
        _ => Err(SanError::InvalidPromotion(body.to_string())),
    }
}
