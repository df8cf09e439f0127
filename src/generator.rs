//! Random fleet layout generation.
//!
//! Ships are placed longest first by bounded generate-and-test: draw an
//! anchor cell and one of four directions, accept if every segment is on the
//! board, free, and has no ship among its eight neighbours. A layout that
//! runs out of attempts is thrown away and the whole fleet restarts.

use alloc::string::String;
use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::bitboard::CoordSet;
use crate::common::GenerateError;
use crate::config::{BOARD_SIZE, FLEET, MAX_GENERATION_RESTARTS, MAX_PLACEMENT_ATTEMPTS};
use crate::coord::Coord;
use crate::grid::{Cell, Grid};

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generate a rule-valid grid, restarting from scratch on exhaustion.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Grid, GenerateError> {
    for restart in 0..MAX_GENERATION_RESTARTS {
        match try_layout(rng) {
            Ok(grid) => return Ok(grid),
            Err(e) => debug!("layout attempt {} abandoned: {}", restart + 1, e),
        }
    }
    Err(GenerateError::Exhausted {
        restarts: MAX_GENERATION_RESTARTS,
    })
}

/// Generate a board in its 100-character map encoding.
pub fn generate_map<R: Rng + ?Sized>(rng: &mut R) -> Result<String, GenerateError> {
    generate(rng).map(|grid| grid.to_map())
}

/// One pass over the whole fleet. Partial layouts are never returned.
pub fn try_layout<R: Rng + ?Sized>(rng: &mut R) -> Result<Grid, GenerateError> {
    let mut layout = Layout::default();
    for &(length, count) in FLEET.iter() {
        for _ in 0..count {
            layout.place_ship(rng, length)?;
        }
    }
    Ok(layout.grid)
}

#[derive(Default)]
struct Layout {
    grid: Grid,
    occupied: CoordSet,
    /// Neighbourhood of every placed segment; only used to reject early.
    no_place: CoordSet,
}

impl Layout {
    fn place_ship<R: Rng + ?Sized>(&mut self, rng: &mut R, length: usize) -> Result<(), GenerateError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let row = rng.random_range(0..BOARD_SIZE);
            let col = rng.random_range(0..BOARD_SIZE);
            let (dr, dc) = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
            let Ok(anchor) = Coord::new(row, col) else {
                continue;
            };
            if let Some(cells) = self.segments(anchor, dr, dc, length) {
                self.commit(&cells);
                return Ok(());
            }
        }
        Err(GenerateError::PlacementExhausted {
            length,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Segments of a ship laid from `anchor`, or `None` if any is unusable.
    fn segments(&self, anchor: Coord, dr: isize, dc: isize, length: usize) -> Option<Vec<Coord>> {
        let mut cells = Vec::with_capacity(length);
        for i in 0..length as isize {
            let c = anchor.offset(dr * i, dc * i)?;
            if self.occupied.contains(c) || self.no_place.contains(c) {
                return None;
            }
            if c.neighbors8().any(|n| self.occupied.contains(n)) {
                return None;
            }
            cells.push(c);
        }
        Some(cells)
    }

    fn commit(&mut self, cells: &[Coord]) {
        for &c in cells {
            self.grid.set(c, Cell::Ship);
            self.occupied.insert(c);
        }
        for &c in cells {
            for n in c.neighbors8() {
                if !self.occupied.contains(n) {
                    self.no_place.insert(n);
                }
            }
        }
    }
}
