// src/game_state.rs
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::coord::Coord;
use crate::error::{SelectError, StoreError};
use crate::reshuffle::reshuffle;
use crate::snapshot::{GameSnapshot, SNAPSHOT_VERSION};
use crate::store::{MemoryStore, SnapshotStore};

const MSG_START: &str = "Select two matching tiles to remove them from the board.";
const MSG_RESTART: &str = "New game started! Select two matching tiles.";
const MSG_DESELECTED: &str = "Tile deselected. Choose tiles to match.";
const MSG_RESHUFFLED: &str = "🔄 No valid moves found! Tiles have been reshuffled to continue the game.";
const MSG_WON: &str = "🎉 Congratulations! All tiles cleared! The harmony is restored.";
const MSG_LOST: &str = "💀 No valid moves possible even after reshuffle. This is extremely rare! Try a new game.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection emptied by clicking the selected tile again.
    Idle,
    OneSelected(Coord),
    /// Pair removed. `reshuffled` is set when the board hit a stalemate and was repacked.
    MatchFound { reshuffled: bool },
    MatchFailed,
    Won,
    Lost,
}

/// Result of re-checking the board after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Playing,
    Reshuffled,
    Won,
    Lost,
}

/// One game: board, pending selection, status and the last message for the player.
pub struct Session<S: SnapshotStore = MemoryStore, R: Rng = StdRng> {
    config: GameConfig,
    store: S,
    rng: R,
    board: Board,
    selection: Vec<Coord>,
    status: GameStatus,
    message: String,
    tiles_remaining: usize,
}

impl Session<MemoryStore, StdRng> {
    /// Unpersisted session with a fixed seed, handy for bots and tests.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, MemoryStore::new(), StdRng::seed_from_u64(seed))
    }
}

impl<S: SnapshotStore, R: Rng> Session<S, R> {
    /// Fresh board; whatever is in the store is ignored and left untouched.
    pub fn new(config: GameConfig, store: S, mut rng: R) -> Self {
        let board = Board::generate(config.layout, &mut rng);
        let mut session = Self::from_board(board, config, store, rng);
        // a shuffled deal can open in a stalemate
        session.check_progress();
        session
    }

    /// Play the given board as is. No revalidation happens until the first match
    /// or an explicit [`Session::evaluate`].
    pub fn from_board(board: Board, config: GameConfig, store: S, rng: R) -> Self {
        let tiles_remaining = board.visible_count();
        Self {
            config,
            store,
            rng,
            board,
            selection: Vec::new(),
            status: GameStatus::Playing,
            message: MSG_START.to_string(),
            tiles_remaining,
        }
    }

    /// Resume the stored game if there is a usable one, otherwise deal a new board.
    pub fn open(config: GameConfig, store: S, rng: R) -> Self {
        let mut session = Self::new(config, store, rng);
        if session.config.persist {
            match session.load_snapshot() {
                Ok(Some((snap, board, selection))) => {
                    session.board = board;
                    session.selection = selection;
                    session.status = snap.status;
                    session.message = snap.message;
                    log::info!("[SESSION] resumed key:{}", session.config.storage_key);
                }
                Ok(None) => {}
                Err(e) => log::warn!("[STORE] ignoring snapshot key:{} error:{}", session.config.storage_key, e),
            }
        }
        session.evaluate();
        session
    }

    fn load_snapshot(&mut self) -> Result<Option<(GameSnapshot, Board, Vec<Coord>)>, StoreError> {
        let Some(raw) = self.store.load(&self.config.storage_key)? else {
            return Ok(None);
        };
        let snap = GameSnapshot::from_json(&raw)?;
        let (board, selection) = snap.restore()?;
        Ok(Some((snap, board, selection)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tiles_remaining(&self) -> usize {
        self.tiles_remaining
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a click on `coord`.
    pub fn select(&mut self, coord: Coord) -> Result<SelectOutcome, SelectError> {
        if self.status != GameStatus::Playing {
            return Err(SelectError::GameOver(self.status));
        }
        if !coord.in_bounds() {
            return Err(SelectError::OutOfBounds(coord));
        }
        if !self.board.is_visible(coord) {
            return Err(SelectError::NotVisible(coord));
        }
        if !self.board.is_free(coord) {
            self.message = format!(
                "❌ Tile at {coord} is not free! It must have at least one open side (left or right)."
            );
            self.persist();
            return Err(SelectError::NotFree(coord));
        }

        let outcome = if let Some(pos) = self.selection.iter().position(|&c| c == coord) {
            self.selection.remove(pos);
            self.message = MSG_DESELECTED.to_string();
            SelectOutcome::Idle
        } else if let Some(&first) = self.selection.first() {
            self.selection.clear();
            self.resolve_pair(first, coord)
        } else {
            self.selection.push(coord);
            self.message = format!(
                "Selected {coord} ({}). Choose a matching tile.",
                self.glyph_at(coord)
            );
            SelectOutcome::OneSelected(coord)
        };
        self.persist();
        Ok(outcome)
    }

    fn glyph_at(&self, coord: Coord) -> char {
        self.board.cell(coord).map_or('?', |c| c.symbol.to_unicode())
    }

    fn resolve_pair(&mut self, first: Coord, second: Coord) -> SelectOutcome {
        let same = match (self.board.cell(first), self.board.cell(second)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };
        if !same {
            self.message = format!(
                "❌ {first} ({}) and {second} ({}) don't match. Try again.",
                self.glyph_at(first),
                self.glyph_at(second)
            );
            return SelectOutcome::MatchFailed;
        }

        self.board.hide(first);
        self.board.hide(second);
        self.message = format!("✅ Match found! {first} and {second} removed.");
        match self.check_progress() {
            Evaluation::Playing => SelectOutcome::MatchFound { reshuffled: false },
            Evaluation::Reshuffled => SelectOutcome::MatchFound { reshuffled: true },
            Evaluation::Won => SelectOutcome::Won,
            Evaluation::Lost => SelectOutcome::Lost,
        }
    }

    /// Recount tiles, detect a win, and repack the board on a stalemate.
    pub fn evaluate(&mut self) -> Evaluation {
        let result = self.check_progress();
        self.persist();
        result
    }

    fn check_progress(&mut self) -> Evaluation {
        self.tiles_remaining = self.board.visible_count();

        if self.tiles_remaining == 0 {
            self.status = GameStatus::Won;
            self.selection.clear();
            self.message = MSG_WON.to_string();
            log::info!("[SESSION] won");
            return Evaluation::Won;
        }

        if self.board.has_legal_move() {
            self.status = GameStatus::Playing;
            return Evaluation::Playing;
        }

        let mut repacked = self.board.clone();
        reshuffle(&mut repacked);
        if repacked.has_legal_move() {
            self.board = repacked;
            // symbols moved, so an old pick may now point at a different tile
            self.selection.clear();
            self.status = GameStatus::Playing;
            self.message = MSG_RESHUFFLED.to_string();
            log::info!("[SESSION] reshuffled remaining:{}", self.tiles_remaining);
            Evaluation::Reshuffled
        } else {
            self.status = GameStatus::Lost;
            self.selection.clear();
            self.message = MSG_LOST.to_string();
            log::warn!("[SESSION] no moves after reshuffle remaining:{}", self.tiles_remaining);
            Evaluation::Lost
        }
    }

    /// Drop the stored game and deal a new board.
    pub fn restart(&mut self) {
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            log::warn!("[STORE] remove failed key:{} error:{}", self.config.storage_key, e);
        }
        self.board = Board::generate(self.config.layout, &mut self.rng);
        self.selection.clear();
        self.check_progress();
        self.message = MSG_RESTART.to_string();
        self.persist();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            board: self.board.cells().to_vec(),
            selection: self.selection.clone(),
            status: self.status,
            message: self.message.clone(),
            tiles_remaining: self.tiles_remaining,
        }
    }

    // Won games are not kept around; everything else is saved.
    fn persist(&mut self) {
        if !self.config.persist {
            return;
        }
        let key = self.config.storage_key.clone();
        let result = if self.status == GameStatus::Won {
            self.store.remove(&key)
        } else {
            self.snapshot()
                .to_json()
                .map_err(StoreError::from)
                .and_then(|raw| self.store.save(&key, &raw))
        };
        if let Err(e) = result {
            log::warn!("[STORE] save failed key:{} error:{}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::error::SnapshotError;
    use crate::tiles::Symbol::*;

    fn c(label: &str) -> Coord {
        label.parse().unwrap()
    }

    fn quiet() -> GameConfig {
        GameConfig { persist: false, ..GameConfig::default() }
    }

    fn on_board(board: Board) -> Session {
        Session::from_board(board, quiet(), MemoryStore::new(), StdRng::seed_from_u64(0))
    }

    #[test]
    fn first_click_selects_second_click_matches() {
        let mut s = Session::seeded(quiet(), 1);
        assert_eq!(s.select(c("A1")), Ok(SelectOutcome::OneSelected(c("A1"))));
        assert_eq!(s.selection(), &[c("A1")]);
        assert!(s.message().starts_with("Selected A1 (🀀)"));

        assert_eq!(s.select(c("H6")), Ok(SelectOutcome::MatchFound { reshuffled: false }));
        assert!(s.selection().is_empty());
        assert_eq!(s.tiles_remaining(), 46);
        assert!(!s.board().is_visible(c("A1")));
        assert_eq!(s.message(), "✅ Match found! A1 and H6 removed.");
    }

    #[test]
    fn mismatch_clears_selection_and_keeps_tiles() {
        let mut s = Session::seeded(quiet(), 1);
        s.select(c("A1")).unwrap();
        assert_eq!(s.select(c("H1")), Ok(SelectOutcome::MatchFailed));
        assert!(s.selection().is_empty());
        assert_eq!(s.board().visible_count(), 48);
        assert!(s.message().contains("don't match"));
    }

    #[test]
    fn clicking_selected_tile_deselects() {
        let mut s = Session::seeded(quiet(), 1);
        s.select(c("A2")).unwrap();
        assert_eq!(s.select(c("A2")), Ok(SelectOutcome::Idle));
        assert!(s.selection().is_empty());
        assert_eq!(s.message(), MSG_DESELECTED);
    }

    #[test]
    fn blocked_and_removed_tiles_are_rejected() {
        let mut s = Session::seeded(quiet(), 1);
        s.select(c("A1")).unwrap();
        assert_eq!(s.select(c("C3")), Err(SelectError::NotFree(c("C3"))));
        assert!(s.message().contains("C3 is not free"));
        // selection survives a rejected click
        assert_eq!(s.selection(), &[c("A1")]);

        s.select(c("H6")).unwrap();
        assert_eq!(s.select(c("A1")), Err(SelectError::NotVisible(c("A1"))));
        assert_eq!(s.select(Coord::new(6, 0)), Err(SelectError::OutOfBounds(Coord::new(6, 0))));
    }

    #[test]
    fn last_pair_wins() {
        let mut s = on_board(Board::with_visible(&[(c("A1"), Red), (c("H6"), Red)]));
        s.select(c("A1")).unwrap();
        assert_eq!(s.select(c("H6")), Ok(SelectOutcome::Won));
        assert_eq!(s.status(), GameStatus::Won);
        assert_eq!(s.tiles_remaining(), 0);
        assert_eq!(s.select(c("B1")), Err(SelectError::GameOver(GameStatus::Won)));
    }

    #[test]
    fn two_distinct_tiles_end_in_loss() {
        let mut s = on_board(Board::with_visible(&[(c("A1"), Red), (c("H6"), Green)]));
        s.select(c("A1")).unwrap();
        assert_eq!(s.select(c("H6")), Ok(SelectOutcome::MatchFailed));
        assert_eq!(s.board().visible_count(), 2);
        assert!(!s.board().has_legal_move());

        assert_eq!(s.evaluate(), Evaluation::Lost);
        assert_eq!(s.status(), GameStatus::Lost);
        assert_eq!(s.message(), MSG_LOST);
        assert_eq!(s.select(c("A1")), Err(SelectError::GameOver(GameStatus::Lost)));
    }

    #[test]
    fn stalemate_after_match_reshuffles() {
        // after A1/H1 go, B1..E1 sit in a blocked row with split pairs
        let board = Board::with_visible(&[
            (c("A1"), Red),
            (c("B1"), East),
            (c("C1"), South),
            (c("D1"), East),
            (c("E1"), South),
            (c("H1"), Red),
        ]);
        let mut s = on_board(board);
        s.select(c("A1")).unwrap();
        assert_eq!(s.select(c("H1")), Ok(SelectOutcome::MatchFound { reshuffled: true }));
        assert_eq!(s.message(), MSG_RESHUFFLED);
        assert_eq!(s.status(), GameStatus::Playing);
        assert!(s.board().has_legal_move());
        assert_eq!(s.tiles_remaining(), 4);
    }

    #[test]
    fn restart_deals_full_board() {
        let mut s = Session::seeded(GameConfig { persist: false, ..GameConfig::shuffled() }, 5);
        let (a, b) = s.board().legal_moves()[0];
        s.select(a).unwrap();
        s.select(b).unwrap();
        assert_eq!(s.tiles_remaining(), 46);

        s.restart();
        assert_eq!(s.tiles_remaining(), 48);
        assert_eq!(s.board().visible_count(), 48);
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.message(), MSG_RESTART);
    }

    fn stalemate_seed() -> u64 {
        (0..2000u64)
            .find(|&seed| !Board::shuffled(&mut StdRng::seed_from_u64(seed)).has_legal_move())
            .expect("some shuffled deal opens without a free pair")
    }

    #[test]
    fn stalemate_deal_is_repacked_on_new() {
        let seed = stalemate_seed();
        let raw = Board::shuffled(&mut StdRng::seed_from_u64(seed));
        let config = GameConfig { persist: false, ..GameConfig::shuffled() };
        let s = Session::new(config, MemoryStore::new(), StdRng::seed_from_u64(seed));

        assert_ne!(s.board(), &raw);
        assert!(s.board().has_legal_move());
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.board().symbol_counts(), raw.symbol_counts());
        assert_eq!(s.board().visible_count(), 48);
        assert_eq!(s.message(), MSG_RESHUFFLED);
    }

    #[test]
    fn stalemate_deal_is_repacked_on_restart() {
        let seed = stalemate_seed();
        let raw = Board::shuffled(&mut StdRng::seed_from_u64(seed));
        let config = GameConfig { persist: false, ..GameConfig::shuffled() };
        // from_board leaves the rng untouched, so restart deals the stalemate
        let mut s = Session::from_board(Board::new_fixed(), config, MemoryStore::new(), StdRng::seed_from_u64(seed));
        s.restart();

        assert_ne!(s.board(), &raw);
        assert!(s.board().has_legal_move());
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.board().symbol_counts(), raw.symbol_counts());
        assert_eq!(s.tiles_remaining(), 48);
    }

    #[test]
    fn unpaired_snapshot_is_a_store_error() {
        let mut snap = Session::seeded(quiet(), 1).snapshot();
        snap.board[c("A1").index()].visible = false;
        let mut store = MemoryStore::new();
        store.insert(DEFAULT_STORAGE_KEY, &snap.to_json().unwrap());

        let mut s = Session::new(GameConfig::default(), store, StdRng::seed_from_u64(1));
        assert!(matches!(
            s.load_snapshot(),
            Err(StoreError::Snapshot(SnapshotError::Unpaired(East)))
        ));

        let s = Session::open(GameConfig::default(), s.store().clone(), StdRng::seed_from_u64(1));
        assert_eq!(s.board(), &Board::new_fixed());
        assert_eq!(s.tiles_remaining(), 48);
    }
}
