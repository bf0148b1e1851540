// src/lib.rs
//! Tile-matching board engine for the Mystery Verse Mahjong puzzle.
//!
//! A 6x8 board holds 24 symbols, two of each. A tile can be picked when its
//! left or right neighbour is gone; two picked tiles with the same symbol leave
//! the board. When no free pair is left the remaining tiles are repacked in place.

mod board;
mod config;
mod coord;
mod error;
mod game_state;
mod layout;
pub mod reshuffle;
mod snapshot;
mod store;
mod tiles;

#[cfg(feature = "python")]
mod env;

pub use board::{Board, Cell};
pub use config::{GameConfig, DEFAULT_STORAGE_KEY};
pub use coord::{coordinate_label, Coord, CELL_COUNT, COLS, ROWS};
pub use error::{CoordError, SelectError, SnapshotError, StoreError};
pub use game_state::{Evaluation, GameStatus, SelectOutcome, Session};
pub use layout::Layout;
pub use reshuffle::reshuffle;
pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};
pub use store::{DirStore, MemoryStore, SnapshotStore};
pub use tiles::{Symbol, SYMBOL_COUNT};
