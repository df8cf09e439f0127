//! Loading and saving the 100-character board map.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use rand::Rng;

use crate::{board::Board, generator::generate_map};

/// Read and validate the board stored at `path`.
pub fn load(path: &Path) -> anyhow::Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading map file {}", path.display()))?;
    let board = Board::from_map_validated(&text)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("invalid map file {}", path.display()))?;
    info!("loaded board from {}", path.display());
    Ok(board)
}

/// Use the board at `path` if present, otherwise generate one and save it there.
pub fn load_or_generate<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> anyhow::Result<Board> {
    if path.exists() {
        return load(path);
    }
    let map = generate_map(rng).map_err(|e| anyhow::anyhow!(e))?;
    fs::write(path, &map).with_context(|| format!("writing map file {}", path.display()))?;
    info!("generated a new board and saved it to {}", path.display());
    Board::from_map_validated(&map).map_err(|e| anyhow::anyhow!(e))
}
