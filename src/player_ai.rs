use crate::{ai, coord::Coord, knowledge::Knowledge, player::Player};
use rand::rngs::SmallRng;

/// Simple AI player that uses probability based targeting.
#[derive(Debug, Default)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, knowledge: &Knowledge) -> Coord {
        ai::choose_target(knowledge, rng)
    }
}
