//! Board coordinates and their textual form.
//!
//! A coordinate is written as a row letter `A`-`J` followed by a column
//! number `1`-`10`, e.g. `A5` or `J10`. Internally rows and columns are
//! zero-based.

use core::fmt;
use core::str::FromStr;

use crate::common::CoordError;
use crate::config::BOARD_SIZE;

/// Orthogonal neighbour offsets.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All eight neighbour offsets.
const ALL_AROUND: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A cell on the 10×10 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// `A1`.
    pub const ORIGIN: Coord = Coord { row: 0, col: 0 };

    /// Build a coordinate from zero-based row and column.
    pub fn new(row: usize, col: usize) -> Result<Self, CoordError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(CoordError::OutOfRange { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Coordinate for a row-major cell index in `0..100`.
    pub fn from_index(index: usize) -> Result<Self, CoordError> {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major index of this cell.
    pub fn index(&self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// Every coordinate on the board, row-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(|i| Coord::from_index(i).ok())
    }

    /// Step by `(dr, dc)`, or `None` when that leaves the board.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Coord> {
        let r = self.row().checked_add_signed(dr)?;
        let c = self.col().checked_add_signed(dc)?;
        Coord::new(r, c).ok()
    }

    /// In-bounds orthogonal neighbours.
    pub fn neighbors4(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }

    /// In-bounds neighbours including diagonals.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        ALL_AROUND
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.row) as char;
        write!(f, "{}{}", letter, self.col as usize + 1)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    /// Accepts `^[A-J]([1-9]|10)$`, case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(CoordError::Empty)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || (letter as u8 - b'A') as usize >= BOARD_SIZE {
            return Err(CoordError::BadRow(letter));
        }
        let digits = chars.as_str();
        let well_formed = !digits.is_empty()
            && digits.len() <= 2
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !digits.starts_with('0');
        if !well_formed {
            return Err(CoordError::BadColumn);
        }
        let number: usize = digits.parse().map_err(|_| CoordError::BadColumn)?;
        if number == 0 || number > BOARD_SIZE {
            return Err(CoordError::BadColumn);
        }
        Coord::new((letter as u8 - b'A') as usize, number - 1)
    }
}
