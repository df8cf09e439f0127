#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};

use crate::{
    ai,
    common::ShotOutcome,
    coord::Coord,
    game::GameEngine,
    knowledge::Knowledge,
    player::Player,
    ui::{print_final_view, print_knowledge},
};
use rand::rngs::SmallRng;

/// Interactive console player.
pub struct CliPlayer {
    input: Box<dyn BufRead + Send>,
}

impl CliPlayer {
    /// Read targets from standard input.
    pub fn new() -> Self {
        Self::with_input(Box::new(io::BufReader::new(io::stdin())))
    }

    /// Read targets from any line source.
    pub fn with_input(input: Box<dyn BufRead + Send>) -> Self {
        Self { input }
    }

    /// Next input line, `None` on end of input or read failure.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for CliPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, knowledge: &Knowledge) -> Coord {
        std::println!("\n--- YOUR TURN ---");
        print_knowledge(knowledge);
        let suggestion = ai::choose_target(knowledge, rng);
        loop {
            std::print!(
                "Enter target (A-J, 1-10; e.g. A5) [AI suggests: {}] (or 'help'): ",
                suggestion
            );
            let _ = io::stdout().flush();
            let Some(line) = self.read_line() else {
                std::println!("\nNo more input, using AI suggestion: {}", suggestion);
                return suggestion;
            };

            if line.is_empty() {
                std::println!("Using AI suggestion: {}", suggestion);
                return suggestion;
            }

            if line.eq_ignore_ascii_case("help") {
                print_targeting_help();
                continue;
            }

            match line.parse::<Coord>() {
                Ok(at) if knowledge.is_known(at) => {
                    std::println!("✗ {} is already known. Choose another target.", at);
                }
                Ok(at) => return at,
                Err(e) => {
                    std::println!("✗ Invalid coordinate: {}", e);
                    std::println!("   Example: A5, B10, J1");
                }
            }
        }
    }

    fn handle_shot_result(&mut self, at: Coord, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => std::println!("Your shot at {}: miss.", at),
            ShotOutcome::Hit => std::println!("Your shot at {}: HIT!", at),
            ShotOutcome::HitSunk => std::println!("Your shot at {}: HIT AND SUNK!", at),
            ShotOutcome::GameOver => std::println!("Your shot at {} sank their last ship!", at),
        }
    }

    fn handle_opponent_shot(&mut self, at: Coord, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => std::println!(">> Enemy fired at {}: missed.", at),
            ShotOutcome::Hit => std::println!(">> Enemy fired at {}: your ship is hit!", at),
            ShotOutcome::HitSunk => std::println!(">> Enemy fired at {}: your ship is sunk!", at),
            ShotOutcome::GameOver => std::println!(">> Enemy fired at {}: your last ship is gone.", at),
        }
    }

    fn game_over(&mut self, engine: &GameEngine) {
        print_final_view(engine);
    }
}

fn print_targeting_help() {
    std::println!("\nFormat: <ROW><COLUMN>, row letter A-J then column number 1-10.");
    std::println!("Examples: A5, B10, J1");
    std::println!("Board symbols: @ = hit, ~ = water (shot or deduced), ? = unknown");
    std::println!("Press ENTER to fire at the AI suggestion.\n");
}
