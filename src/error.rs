// src/error.rs
use thiserror::Error;

use crate::coord::Coord;
use crate::game_state::GameStatus;
use crate::tiles::Symbol;

/// Rejected click. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("tile at {0} has already been removed")]
    NotVisible(Coord),
    #[error("tile at {0} is not free")]
    NotFree(Coord),
    #[error("game is over ({0:?})")]
    GameOver(GameStatus),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("empty coordinate")]
    Empty,
    #[error("column {0:?} is not in A-H")]
    BadColumn(char),
    #[error("row {0:?} is not in 1-6")]
    BadRow(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("snapshot has {0} cells, expected 48")]
    CellCount(usize),
    #[error("snapshot selection holds {0} tiles")]
    SelectionSize(usize),
    #[error("selected position {0} is not a visible tile")]
    BadSelection(Coord),
    #[error("symbol {0:?} has an odd number of tiles left")]
    Unpaired(Symbol),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot rejected: {0}")]
    Snapshot(#[from] SnapshotError),
}
