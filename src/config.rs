// src/config.rs
use serde::{Deserialize, Serialize};

use crate::layout::Layout;

pub const DEFAULT_STORAGE_KEY: &str = "mahjong-verse3-state";

/// Per-session settings. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub layout: Layout,
    /// Key the session snapshot is saved under.
    pub storage_key: String,
    /// Write a snapshot after every change.
    pub persist: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Fixed,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn shuffled() -> Self {
        Self { layout: Layout::Shuffled, ..Self::default() }
    }
}
