#![cfg(feature = "std")]

use crate::{board::Board, game::{GameEngine, GameStatus}, knowledge::Knowledge};

const COLUMN_HEADER: &str = "   1 2 3 4 5 6 7 8 9 10";

fn print_rows(rendered: &str) {
    std::println!("{}", COLUMN_HEADER);
    for (r, line) in rendered.lines().enumerate() {
        let letter = (b'A' + r as u8) as char;
        let cells: Vec<String> = line.chars().map(|ch| ch.to_string()).collect();
        std::println!(" {} {}", letter, cells.join(" "));
    }
}

/// Print our own grid with ships revealed.
pub fn print_own_board(board: &Board) {
    std::println!("Your board:");
    print_rows(&board.grid().to_string());
    std::println!("    Legend: #=Ship  @=Hit  ~=Miss  .=Water");
    std::println!(
        "    Ships afloat: {}/{}",
        board.fleet().afloat(board.grid()),
        board.fleet().ships().len()
    );
}

/// Print what we know about the opponent.
pub fn print_knowledge(knowledge: &Knowledge) {
    std::println!("Opponent board:");
    print_rows(&knowledge.to_string());
    if knowledge.is_revealed() {
        std::println!("    Legend: #=Ship  ~=Water");
    } else {
        std::println!("    Legend: @=Hit  ~=Miss  ?=Unknown");
    }
}

/// Both boards plus the verdict.
pub fn print_final_view(engine: &GameEngine) {
    std::println!("\n══════════════════════ GAME OVER ══════════════════════\n");
    print_knowledge(engine.knowledge());
    std::println!();
    print_own_board(engine.board());
    match engine.status() {
        GameStatus::Won => {
            std::println!("\nVICTORY! You sank every enemy ship in {} shots.", engine.shots_fired());
        }
        GameStatus::Lost => {
            std::println!("\nDEFEAT. Your last ship was sunk.");
        }
        GameStatus::InProgress => {}
    }
}
