#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod coord;
mod fleet;
mod game;
pub mod generator;
mod grid;
mod knowledge;
mod player;
mod player_ai;
pub mod protocol;
#[cfg(feature = "std")]
pub mod logging;
#[cfg(feature = "std")]
pub mod map_file;
#[cfg(feature = "std")]
mod player_cli;
#[cfg(feature = "std")]
pub mod player_node;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::{calc_pdf, choose_target};
pub use bitboard::{BitBoard, BitBoardError, CoordSet};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::Coord;
pub use fleet::{detect_ships, Fleet, Ship};
pub use game::*;
pub use generator::{generate, generate_map};
pub use grid::{Cell, Grid};
pub use knowledge::{Intel, Knowledge};
pub use player::*;
pub use player_ai::*;
pub use protocol::Message;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player_cli::*;
#[cfg(feature = "std")]
pub use player_node::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
