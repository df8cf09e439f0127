//! Ships derived from the grid as connected groups of occupied cells.
//!
//! Ships are detected once when a board is built. Each keeps its fixed
//! coordinate set; whether it is sunk is always read back from the live grid.

use alloc::vec::Vec;

use crate::bitboard::CoordSet;
use crate::common::BoardError;
use crate::config::{fleet_lengths, BOARD_SIZE, NUM_SHIPS};
use crate::coord::Coord;
use crate::grid::{Cell, Grid};

/// One ship: a 4-connected component of ship cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
    mask: CoordSet,
}

impl Ship {
    fn from_cells(mut cells: Vec<Coord>) -> Self {
        cells.sort();
        let mut mask = CoordSet::new();
        for &c in cells.iter() {
            mask.insert(c);
        }
        Ship { cells, mask }
    }

    /// Cells of this ship, row-major.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Ship's length.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.mask.contains(at)
    }

    /// Sunk when every cell of the ship is `HitShip`.
    pub fn is_sunk(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&c| grid.get(c) == Cell::HitShip)
    }

    /// All cells share a row or all share a column, with no gaps.
    fn is_straight(&self) -> bool {
        let (first, last) = match (self.cells.first(), self.cells.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return true,
        };
        let len = self.cells.len();
        (first.row() == last.row() && last.col() - first.col() + 1 == len)
            || (first.col() == last.col() && last.row() - first.row() + 1 == len)
    }
}

/// Label connected components of `Ship`/`HitShip` cells.
///
/// Uses an explicit work list and a visited bitset; the partition does not
/// depend on traversal order.
pub fn detect_ships(grid: &Grid) -> Vec<Ship> {
    let mut visited = CoordSet::new();
    let mut ships = Vec::new();
    let mut stack = Vec::with_capacity(BOARD_SIZE);
    for start in Coord::all() {
        if !grid.get(start).is_ship() || !visited.insert(start) {
            continue;
        }
        let mut cells = Vec::new();
        stack.push(start);
        while let Some(current) = stack.pop() {
            cells.push(current);
            for next in current.neighbors4() {
                if grid.get(next).is_ship() && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        ships.push(Ship::from_cells(cells));
    }
    ships
}

/// All ships on one board plus a cell → ship lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
    owner: [Option<u8>; BOARD_SIZE * BOARD_SIZE],
}

impl Fleet {
    /// Detect the fleet on `grid`.
    pub fn detect(grid: &Grid) -> Self {
        let ships = detect_ships(grid);
        let mut owner = [None; BOARD_SIZE * BOARD_SIZE];
        for (i, ship) in ships.iter().enumerate() {
            for c in ship.cells() {
                owner[c.index()] = Some(i as u8);
            }
        }
        Fleet { ships, owner }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ship occupying `at`, if any.
    pub fn ship_at(&self, at: Coord) -> Option<&Ship> {
        self.owner[at.index()].map(|i| &self.ships[i as usize])
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self, grid: &Grid) -> bool {
        self.ships.iter().all(|s| s.is_sunk(grid))
    }

    /// Number of ships still afloat.
    pub fn afloat(&self, grid: &Grid) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk(grid)).count()
    }

    /// Ship lengths, longest first.
    pub fn lengths(&self) -> Vec<usize> {
        let mut lens: Vec<usize> = self.ships.iter().map(Ship::len).collect();
        lens.sort_unstable_by(|a, b| b.cmp(a));
        lens
    }

    /// Check the standard fleet rules: straight ships, the required
    /// length multiset, and no two ships touching (diagonals included).
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.ships.iter().any(|s| !s.is_straight()) {
            return Err(BoardError::ShipNotStraight);
        }
        if self.ships.len() != NUM_SHIPS || !self.lengths().into_iter().eq(fleet_lengths()) {
            return Err(BoardError::FleetMismatch);
        }
        for (i, ship) in self.ships.iter().enumerate() {
            for &c in ship.cells() {
                let touches_other = c
                    .neighbors8()
                    .any(|n| matches!(self.owner[n.index()], Some(j) if j as usize != i));
                if touches_other {
                    return Err(BoardError::ShipsTouching);
                }
            }
        }
        Ok(())
    }
}
