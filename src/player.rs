use crate::{common::ShotOutcome, coord::Coord, game::GameEngine, knowledge::Knowledge};
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose the next target given what we know about the opponent's grid.
    fn select_target(&mut self, rng: &mut SmallRng, knowledge: &Knowledge) -> Coord;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _at: Coord, _outcome: ShotOutcome) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_shot(&mut self, _at: Coord, _outcome: ShotOutcome) {}

    /// Called once when the session reaches game over.
    fn game_over(&mut self, _engine: &GameEngine) {}
}
