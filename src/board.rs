//! Our own board: ground-truth grid, detected fleet and shot history.

use alloc::string::String;
use log::debug;

use crate::bitboard::CoordSet;
use crate::common::{BoardError, ShotOutcome};
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::grid::{Cell, Grid};
use crate::protocol::Message;

/// Main board state: grid, ships, received shots.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    fleet: Fleet,
    shots: CoordSet,
}

impl Board {
    /// Build a board from a grid, detecting its ships once.
    pub fn new(grid: Grid) -> Self {
        let fleet = Fleet::detect(&grid);
        Board {
            grid,
            fleet,
            shots: CoordSet::new(),
        }
    }

    /// Build from a map string. The layout is trusted; see
    /// [`Board::from_map_validated`] for the checked variant.
    pub fn from_map(map: &str) -> Result<Self, BoardError> {
        Ok(Board::new(Grid::from_map(map)?))
    }

    /// Build from a map string and reject layouts that break fleet rules.
    pub fn from_map_validated(map: &str) -> Result<Self, BoardError> {
        let board = Board::from_map(map)?;
        board.fleet.validate()?;
        Ok(board)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Coordinates the opponent has fired at so far.
    pub fn shots_received(&self) -> CoordSet {
        self.shots
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.fleet.all_sunk(&self.grid)
    }

    /// Map encoding of the layout.
    pub fn to_map(&self) -> String {
        self.grid.to_map()
    }

    /// Resolve an incoming shot.
    ///
    /// A coordinate seen before is classified from the current grid without
    /// mutating anything, so repeats are answered identically.
    pub fn receive_shot(&mut self, at: Coord) -> ShotOutcome {
        if !self.shots.insert(at) {
            let outcome = self.classify_repeat(at);
            debug!("repeat shot at {} -> {:?}", at, outcome);
            return outcome;
        }
        let outcome = match self.grid.get(at) {
            Cell::Ship => {
                self.grid.set(at, Cell::HitShip);
                match self.fleet.ship_at(at) {
                    Some(ship) if ship.is_sunk(&self.grid) => {
                        if self.all_sunk() {
                            ShotOutcome::GameOver
                        } else {
                            ShotOutcome::HitSunk
                        }
                    }
                    _ => ShotOutcome::Hit,
                }
            }
            Cell::Empty | Cell::Miss => {
                self.grid.set(at, Cell::Miss);
                ShotOutcome::Miss
            }
            // unreachable with a fresh shot history; answer as a repeat
            Cell::HitShip => self.classify_repeat(at),
        };
        debug!("shot at {} -> {:?}", at, outcome);
        outcome
    }

    fn classify_repeat(&self, at: Coord) -> ShotOutcome {
        match self.grid.get(at) {
            Cell::Empty | Cell::Miss => ShotOutcome::Miss,
            Cell::Ship | Cell::HitShip => match self.fleet.ship_at(at) {
                Some(ship) if ship.is_sunk(&self.grid) => ShotOutcome::HitSunk,
                _ => ShotOutcome::Hit,
            },
        }
    }

    /// Resolve `attacker`'s shot and compose the reply carrying our next shot.
    pub fn respond(&mut self, attacker: Coord, next_shot: Coord) -> Message {
        Message::Reply {
            outcome: self.receive_shot(attacker),
            shot: next_shot,
        }
    }
}
