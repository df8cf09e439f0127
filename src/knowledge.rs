//! What we know about the opponent's grid, built only from our own shots
//! and the outcomes the opponent reports for them.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use log::debug;

use crate::bitboard::CoordSet;
use crate::common::ShotOutcome;
use crate::config::{fleet_lengths, BOARD_SIZE};
use crate::coord::Coord;

/// Belief about one opponent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intel {
    #[default]
    Unknown,
    Miss,
    Hit,
}

/// Knowledge grid plus the ships we have confirmed sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knowledge {
    cells: [[Intel; BOARD_SIZE]; BOARD_SIZE],
    sunk_cells: CoordSet,
    sunk_lengths: Vec<usize>,
    revealed: bool,
}

impl Default for Knowledge {
    fn default() -> Self {
        Self::new()
    }
}

impl Knowledge {
    /// Everything unknown.
    pub fn new() -> Self {
        Self {
            cells: [[Intel::Unknown; BOARD_SIZE]; BOARD_SIZE],
            sunk_cells: CoordSet::new(),
            sunk_lengths: Vec::new(),
            revealed: false,
        }
    }

    pub fn get(&self, at: Coord) -> Intel {
        self.cells[at.row()][at.col()]
    }

    fn set(&mut self, at: Coord, intel: Intel) {
        self.cells[at.row()][at.col()] = intel;
    }

    pub fn is_known(&self, at: Coord) -> bool {
        self.get(at) != Intel::Unknown
    }

    /// Cells still unknown, row-major.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| !self.is_known(c))
    }

    pub fn count(&self, intel: Intel) -> usize {
        self.cells.iter().flatten().filter(|&&i| i == intel).count()
    }

    /// Cells belonging to ships we have seen sink.
    pub fn sunk_cells(&self) -> CoordSet {
        self.sunk_cells
    }

    /// Lengths of the opponent ships we have sunk, in order of sinking.
    pub fn sunk_lengths(&self) -> &[usize] {
        &self.sunk_lengths
    }

    /// Standard fleet lengths minus those already sunk, longest first.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        let mut remaining: Vec<usize> = fleet_lengths().collect();
        for len in self.sunk_lengths.iter() {
            if let Some(pos) = remaining.iter().position(|l| l == len) {
                remaining.remove(pos);
            }
        }
        remaining
    }

    /// Apply the opponent's report for our shot at `at`.
    ///
    /// Returns how many cells were deduced as empty around a sunk ship.
    pub fn record_own_shot_result(&mut self, at: Coord, outcome: ShotOutcome) -> usize {
        match outcome {
            ShotOutcome::Miss => {
                if self.get(at) != Intel::Hit {
                    self.set(at, Intel::Miss);
                }
                0
            }
            _ => {
                self.set(at, Intel::Hit);
                if outcome == ShotOutcome::GameOver {
                    self.revealed = true;
                }
                if outcome.is_sunk() {
                    self.mark_sunk_ship(at)
                } else {
                    0
                }
            }
        }
    }

    /// Recover the sunk ship as the 4-connected run of hits through `at`,
    /// then mark every unknown cell around it as a miss. Ships never touch,
    /// so the whole perimeter must be water.
    fn mark_sunk_ship(&mut self, at: Coord) -> usize {
        let mut parts = CoordSet::new();
        let mut queue = VecDeque::new();
        parts.insert(at);
        queue.push_back(at);
        while let Some(current) = queue.pop_front() {
            for next in current.neighbors4() {
                if self.get(next) == Intel::Hit && parts.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        if !self.sunk_cells.contains(at) {
            self.sunk_lengths.push(parts.count_ones());
            self.sunk_cells |= parts;
        }

        let mut deduced = 0;
        for part in parts.coords() {
            for n in part.neighbors8() {
                if self.get(n) == Intel::Unknown {
                    self.set(n, Intel::Miss);
                    deduced += 1;
                }
            }
        }
        debug!(
            "sunk ship of length {} at {}; {} surrounding cells marked empty",
            parts.count_ones(),
            at,
            deduced
        );
        deduced
    }

    /// Whether the opponent reported losing their last ship.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

impl fmt::Display for Knowledge {
    /// `?` unknown, `~` miss, `@` hit. Once the game is won, hits show as
    /// ships (`#`) and unknown cells as water (`.`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for intel in row.iter() {
                let glyph = match (intel, self.revealed) {
                    (Intel::Hit, true) => '#',
                    (Intel::Hit, false) => '@',
                    (Intel::Miss, _) => '~',
                    (Intel::Unknown, true) => '.',
                    (Intel::Unknown, false) => '?',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
