use log::info;

use crate::{
    board::Board,
    common::ShotOutcome,
    coord::Coord,
    knowledge::Knowledge,
    protocol::Message,
};

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Core game logic holding the player's board and what we know of the enemy.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    knowledge: Knowledge,
    status: GameStatus,
    shots_fired: usize,
}

impl GameEngine {
    /// Create an engine around our own board with nothing known about the enemy.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            knowledge: Knowledge::new(),
            status: GameStatus::InProgress,
            shots_fired: 0,
        }
    }

    /// Immutable reference to the player's board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// What we know about the opponent's grid.
    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Handle an opponent shot and build the reply carrying `next_shot`.
    pub fn opponent_shot(&mut self, at: Coord, next_shot: Coord) -> Message {
        let reply = self.board.respond(at, next_shot);
        if reply.is_game_over() {
            info!("opponent sank our last ship at {}", at);
            self.status = GameStatus::Lost;
        }
        reply
    }

    /// Record the outcome the opponent reported for our shot at `at`.
    pub fn record_shot_result(&mut self, at: Coord, outcome: ShotOutcome) {
        self.shots_fired += 1;
        self.knowledge.record_own_shot_result(at, outcome);
        if outcome == ShotOutcome::GameOver {
            info!("sank the opponent's last ship at {}", at);
            self.status = GameStatus::Won;
        }
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of our shots that have been answered.
    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }
}
