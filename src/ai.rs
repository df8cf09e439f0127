//! Probability-based targeting over the knowledge grid.

use rand::Rng;

use crate::{config::BOARD_SIZE, coord::Coord, knowledge::{Intel, Knowledge}};

const GRID_SIZE: usize = BOARD_SIZE;

/// Placements covering more unresolved hits get far more weight, so cells
/// next to a damaged ship stand out.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature sharpens sampling towards the likeliest cells.
const TEMPERATURE: f64 = 0.5;

/// Probability density over unknown cells.
///
/// Every straight placement of every remaining ship length is counted if it
/// avoids known water and sunk ships; each one adds weight to the unknown
/// cells it covers. Known cells always get zero.
pub fn calc_pdf(knowledge: &Knowledge) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let sunk = knowledge.sunk_cells();

    for len in knowledge.remaining_lengths() {
        for (dr, dc) in [(0isize, 1isize), (1, 0)] {
            for anchor in Coord::all() {
                let mut n_hits = 0i32;
                let mut cells = [anchor; GRID_SIZE];
                let mut valid = true;
                for (k, slot) in cells.iter_mut().enumerate().take(len) {
                    let Some(c) = anchor.offset(dr * k as isize, dc * k as isize) else {
                        valid = false;
                        break;
                    };
                    match knowledge.get(c) {
                        Intel::Miss => valid = false,
                        Intel::Hit if sunk.contains(c) => valid = false,
                        Intel::Hit => n_hits += 1,
                        Intel::Unknown => {}
                    }
                    if !valid {
                        break;
                    }
                    *slot = c;
                }
                if !valid {
                    continue;
                }
                let weight = libm::pow(HIT_BIAS, n_hits as f64);
                for &c in cells.iter().take(len) {
                    if knowledge.get(c) == Intel::Unknown {
                        matrix[c.row()][c.col()] += weight;
                    }
                }
            }
        }
    }

    normalize(matrix)
}

fn normalize(mut matrix: [[f64; GRID_SIZE]; GRID_SIZE]) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        return matrix;
    }
    for v in matrix.iter_mut().flatten() {
        *v /= total;
    }
    matrix
}

/// Sample an unknown coordinate from a probability matrix using a
/// temperature parameter. Falls back to a uniformly random unknown cell when
/// the matrix carries no weight, and to `None` once nothing is unknown.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[[f64; GRID_SIZE]; GRID_SIZE],
    knowledge: &Knowledge,
    temperature: f64,
    rng: &mut R,
) -> Option<Coord> {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for c in knowledge.unknown_cells() {
        let v = libm::pow(pdf[c.row()][c.col()], 1.0 / temperature);
        adjusted[c.row()][c.col()] = v;
        total += v;
    }
    if total > 0.0 {
        let threshold: f64 = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for c in knowledge.unknown_cells() {
            cumulative += adjusted[c.row()][c.col()];
            if threshold < cumulative {
                return Some(c);
            }
        }
    }
    let unknown = knowledge.unknown_cells().count();
    if unknown == 0 {
        return None;
    }
    knowledge.unknown_cells().nth(rng.random_range(0..unknown))
}

/// Pick the next target. Once every cell is known there is nothing useful
/// left to shoot, so `A1` is returned.
pub fn choose_target<R: Rng + ?Sized>(knowledge: &Knowledge, rng: &mut R) -> Coord {
    let pdf = calc_pdf(knowledge);
    sample_pdf(&pdf, knowledge, TEMPERATURE, rng).unwrap_or(Coord::ORIGIN)
}
