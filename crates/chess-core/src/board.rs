//! The 8×8 board grid.

use std::fmt;

use crate::{Color, FenError, Piece, Square};

/// Contents of a single cell: a piece of some color, or nothing.
pub type Occupant = Option<(Piece, Color)>;

/// An 8×8 grid of cells indexed `[row][col]`, row 0 = rank 8, col 0 = a-file.
///
/// The grid is a plain value: it is mutated in place with [`Board::set`] and
/// [`Board::take`], and copied when a snapshot is needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Occupant; 8]; 8],
}

impl Board {
    /// Piece placement of the standard starting position.
    pub const STARTPOS_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a board with no pieces on it.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        const BACK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut board = Board::empty();
        for (col, piece) in BACK.into_iter().enumerate() {
            board.cells[0][col] = Some((piece, Color::Black));
            board.cells[1][col] = Some((Piece::Pawn, Color::Black));
            board.cells[6][col] = Some((Piece::Pawn, Color::White));
            board.cells[7][col] = Some((piece, Color::White));
        }
        board
    }

    /// Parses the piece-placement field of a FEN record.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(run @ 1..=8) = c.to_digit(10) {
                    col += run as usize;
                } else if let Some(occupant) = Piece::from_fen_char(c) {
                    if col < 8 {
                        board.cells[row][col] = Some(occupant);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }
        Ok(board)
    }

    /// Renders the piece-placement field: ranks 8 to 1 separated by `/`,
    /// empty runs collapsed into a digit.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(64 + 7);
        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty = 0u8;
            for cell in cells {
                match cell {
                    Some((piece, color)) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.to_fen_char(*color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    /// Returns the occupant of a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Occupant {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Overwrites a square.
    #[inline]
    pub fn set(&mut self, sq: Square, occupant: Occupant) {
        self.cells[sq.row() as usize][sq.col() as usize] = occupant;
    }

    /// Empties a square, returning what stood there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Occupant {
        std::mem::take(&mut self.cells[sq.row() as usize][sq.col() as usize])
    }

    /// Returns every square holding `piece` of `color`, in row-major scan
    /// order (a8, b8, ..., h1).
    ///
    /// An empty result is a normal outcome; callers decide what it means.
    pub fn locate(&self, piece: Piece, color: Color) -> Vec<Square> {
        self.occupied()
            .filter(|&(_, occupant)| occupant == (piece, color))
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Counts the pieces of a type and color.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.occupied()
            .filter(|&(_, occupant)| occupant == (piece, color))
            .count()
    }

    /// Iterates over occupied squares in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, (Piece, Color))> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                let occupant = (*cell)?;
                Square::from_row_col(row as u8, col as u8).map(|sq| (sq, occupant))
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            for cell in cells {
                let c = match cell {
                    Some((piece, color)) => piece.to_fen_char(*color),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
