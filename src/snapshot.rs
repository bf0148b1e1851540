// src/snapshot.rs
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::coord::Coord;
use crate::error::SnapshotError;
use crate::game_state::GameStatus;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Flat, serializable copy of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    /// Row-major, 48 entries.
    pub board: Vec<Cell>,
    pub selection: Vec<Coord>,
    pub status: GameStatus,
    pub message: String,
    pub tiles_remaining: usize,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Validate and rebuild the board and selection.
    pub fn restore(&self) -> Result<(Board, Vec<Coord>), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version { found: self.version, expected: SNAPSHOT_VERSION });
        }
        let board = Board::from_cells(&self.board)?;
        // tiles only ever leave in pairs
        if let Some((&odd, _)) = board.symbol_counts().iter().find(|&(_, &n)| n % 2 == 1) {
            return Err(SnapshotError::Unpaired(odd));
        }
        // a second pick always resolves immediately, so at most one survives
        if self.selection.len() > 1 {
            return Err(SnapshotError::SelectionSize(self.selection.len()));
        }
        if let Some(&bad) = self.selection.iter().find(|&&c| !board.is_free(c)) {
            return Err(SnapshotError::BadSelection(bad));
        }
        Ok((board, self.selection.clone()))
    }
}
