//! Square capture-game board and its rules.
//!
//! The engines only consume a small surface from here: [`Board::legal_moves`],
//! [`Board::apply_move`], cell access and disc counts. Everything else exists
//! to build and display positions.

use std::fmt;

use thiserror::Error;

use crate::constants::{DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    fn glyph(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// A placement on the destination cell `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    /// Column letter followed by the 1-based row, e.g. `d3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{file}{}", self.row + 1)
    }
}

/// Reasons a board cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {0} out of range (2..=26)")]
    InvalidSize(usize),
    #[error("standard opening needs an even board size, got {0}")]
    OddSize(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown cell glyph {glyph:?} at row {row}")]
    UnknownGlyph { glyph: char, row: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Create a board holding the standard four-disc opening in the centre.
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        if size % 2 != 0 {
            return Err(BoardError::OddSize(size));
        }
        let m = size / 2;
        board.set(m - 1, m - 1, Some(Color::White));
        board.set(m, m, Some(Color::White));
        board.set(m - 1, m, Some(Color::Black));
        board.set(m, m - 1, Some(Color::Black));
        Ok(board)
    }

    /// Parse a board from text, one row per line.
    ///
    /// `B`/`X` are black discs, `W`/`O` white discs and `.` empty cells.
    /// Whitespace inside a row and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let mut board = Self::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != board.size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    len: row.len(),
                    expected: board.size,
                });
            }
            for (c, &glyph) in row.iter().enumerate() {
                let cell = match glyph.to_ascii_uppercase() {
                    'B' | 'X' => Some(Color::Black),
                    'W' | 'O' => Some(Color::White),
                    '.' => None,
                    _ => return Err(BoardError::UnknownGlyph { glyph, row: r }),
                };
                board.set(r, c, cell);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Occupant of `(row, col)`, or `None` when empty or off the board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    /// Overwrite a cell. Off-board coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Color>) {
        if row < self.size && col < self.size {
            let i = self.idx(row, col);
            self.cells[i] = cell;
        }
    }

    /// Step `steps` cells from `(row, col)` along `dir`, if still on the board.
    #[inline]
    pub fn offset(
        &self,
        row: usize,
        col: usize,
        dir: (isize, isize),
        steps: usize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + dir.0 * steps as isize;
        let c = col as isize + dir.1 * steps as isize;
        let n = self.size as isize;
        if r < 0 || c < 0 || r >= n || c >= n {
            return None;
        }
        Some((r as usize, c as usize))
    }

    pub fn is_corner(&self, row: usize, col: usize) -> bool {
        let last = self.size - 1;
        (row == 0 || row == last) && (col == 0 || col == last)
    }

    /// The four corner cells.
    pub fn corners(&self) -> [(usize, usize); 4] {
        let last = self.size - 1;
        [(0, 0), (0, last), (last, 0), (last, last)]
    }

    /// Number of discs of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Iterate over every cell as `(row, col, occupant)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<Color>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i / self.size, i % self.size, c))
    }

    /// Length of the opponent run bracketed by `side` from `mv` along `dir`.
    fn run_length(&self, mv: Move, side: Color, dir: (isize, isize)) -> usize {
        let opp = side.opponent();
        let mut steps = 1;
        while let Some((r, c)) = self.offset(mv.row, mv.col, dir, steps) {
            match self.get(r, c) {
                Some(color) if color == opp => steps += 1,
                Some(_) => return steps - 1,
                None => return 0,
            }
        }
        0
    }

    /// Number of discs `side` would flip by playing `mv`.
    pub fn flips(&self, mv: Move, side: Color) -> usize {
        if mv.row >= self.size || mv.col >= self.size || self.get(mv.row, mv.col).is_some() {
            return 0;
        }
        DIRECTIONS
            .iter()
            .map(|&dir| self.run_length(mv, side, dir))
            .sum()
    }

    #[inline]
    pub fn is_legal(&self, mv: Move, side: Color) -> bool {
        self.flips(mv, side) > 0
    }

    /// All legal moves for `side` in row-major order.
    pub fn legal_moves(&self, side: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let mv = Move::new(row, col);
                if self.is_legal(mv, side) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Play `mv` for `side`, flipping every bracketed run.
    ///
    /// The move is expected to be legal; an illegal move still places the
    /// disc but flips nothing.
    pub fn apply_move(&mut self, mv: Move, side: Color) {
        debug_assert!(self.is_legal(mv, side), "illegal move {mv} for {side}");
        for dir in DIRECTIONS {
            let run = self.run_length(mv, side, dir);
            for steps in 1..=run {
                if let Some((r, c)) = self.offset(mv.row, mv.col, dir, steps) {
                    self.set(r, c, Some(side));
                }
            }
        }
        self.set(mv.row, mv.col, Some(side));
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = self.get(row, col).map_or('.', Color::glyph);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_opening() {
        let board = Board::standard(8).unwrap();
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.get(3, 3), Some(Color::White));
        assert_eq!(board.get(3, 4), Some(Color::Black));
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(Board::new(0), Err(BoardError::InvalidSize(0)));
        assert_eq!(Board::new(27), Err(BoardError::InvalidSize(27)));
        assert_eq!(Board::standard(5), Err(BoardError::OddSize(5)));
    }

    #[test]
    fn test_opening_legal_moves() {
        let board = Board::standard(8).unwrap();
        let moves = board.legal_moves(Color::Black);
        assert_eq!(
            moves,
            vec![Move::new(2, 3), Move::new(3, 2), Move::new(4, 5), Move::new(5, 4)]
        );
    }

    #[test]
    fn test_apply_move_flips() {
        let mut board = Board::standard(8).unwrap();
        board.apply_move(Move::new(2, 3), Color::Black);
        assert_eq!(board.get(3, 3), Some(Color::Black));
        assert_eq!(board.count(Color::Black), 4);
        assert_eq!(board.count(Color::White), 1);
    }

    #[test]
    fn test_flips_multiple_directions() {
        let board = Board::parse(
            "B . B
             W W .
             . . .",
        )
        .unwrap();
        // (1,0) bracketed by (0,0), (1,1) bracketed by (0,2)
        assert_eq!(board.flips(Move::new(2, 0), Color::Black), 2);
        // (2,2) flips (1,1) diagonally toward (0,0)
        assert_eq!(board.flips(Move::new(2, 2), Color::Black), 1);
        assert_eq!(board.flips(Move::new(0, 1), Color::Black), 0);
    }

    #[test]
    fn test_parse_rejects_ragged() {
        let err = Board::parse("B.\nW").unwrap_err();
        assert!(matches!(err, BoardError::RaggedRow { row: 1, .. }));
        let err = Board::parse("B?\nW.").unwrap_err();
        assert!(matches!(err, BoardError::UnknownGlyph { glyph: '?', .. }));
    }

    #[test]
    fn test_display_roundtrip() {
        let board = Board::standard(4).unwrap();
        let parsed = Board::parse(&board.to_string()).unwrap();
        assert_eq!(board, parsed);
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(2, 3).to_string(), "d3");
        assert_eq!(Move::new(0, 0).to_string(), "a1");
    }
}
