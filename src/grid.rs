//! The player's own 10×10 ground-truth grid and its map encoding.

use alloc::string::String;
use core::fmt;

use crate::common::BoardError;
use crate::config::BOARD_SIZE;
use crate::coord::Coord;

/// State of one cell on our own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    HitShip,
    Miss,
}

impl Cell {
    /// Ship segment, hit or not.
    pub fn is_ship(self) -> bool {
        matches!(self, Cell::Ship | Cell::HitShip)
    }

    fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship => '#',
            Cell::HitShip => '@',
            Cell::Miss => '~',
        }
    }
}

/// Row-major 10×10 cell matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// A grid with no ships.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.row()][at.col()]
    }

    pub fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.row()][at.col()] = cell;
    }

    /// Parse a board map: 100 cells of `#` (ship) or `.` (empty), row-major.
    /// All whitespace is ignored.
    pub fn from_map(map: &str) -> Result<Self, BoardError> {
        let count = map.chars().filter(|ch| !ch.is_whitespace()).count();
        if count != BOARD_SIZE * BOARD_SIZE {
            return Err(BoardError::InvalidLength(count));
        }
        let mut grid = Grid::new();
        for (index, ch) in map.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
            let cell = match ch {
                '#' => Cell::Ship,
                '.' => Cell::Empty,
                found => return Err(BoardError::InvalidCell { index, found }),
            };
            grid.cells[index / BOARD_SIZE][index % BOARD_SIZE] = cell;
        }
        Ok(grid)
    }

    /// Encode as a 100-character map. Hit ships persist as `#`, misses as `.`.
    pub fn to_map(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|cell| if cell.is_ship() { '#' } else { '.' })
            .collect()
    }

    /// Number of cells holding a ship segment.
    pub fn ship_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_ship()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
