// src/env.rs
use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::GameConfig;
use crate::coord::{Coord, COLS, ROWS};
use crate::error::SelectError;
use crate::game_state::{GameStatus, SelectOutcome, Session};
use crate::layout::Layout;
use crate::store::MemoryStore;

/// Python-facing game. Snapshots stay in memory; the host owns persistence.
#[pyclass]
struct Env {
    session: Session,
    layout: Layout,
}

fn make_session(layout: Layout, seed: Option<u64>) -> Session {
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let config = GameConfig { layout, persist: false, ..GameConfig::default() };
    Session::new(config, MemoryStore::new(), rng)
}

fn outcome_name(outcome: SelectOutcome) -> &'static str {
    match outcome {
        SelectOutcome::Idle => "idle",
        SelectOutcome::OneSelected(_) => "one_selected",
        SelectOutcome::MatchFound { .. } => "match_found",
        SelectOutcome::MatchFailed => "match_failed",
        SelectOutcome::Won => "won",
        SelectOutcome::Lost => "lost",
    }
}

#[pymethods]
impl Env {
    #[new]
    #[pyo3(signature = (seed=None, shuffled=false))]
    fn new(seed: Option<u64>, shuffled: bool) -> Self {
        let layout = if shuffled { Layout::Shuffled } else { Layout::Fixed };
        Self { session: make_session(layout, seed), layout }
    }

    /// Starts a new game and returns the symbol grid.
    #[pyo3(signature = (seed=None))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: Option<u64>) -> PyResult<Bound<'py, PyArray2<i8>>> {
        self.session = make_session(self.layout, seed);
        self.grid(py)
    }

    /// Clicks (row, col). Returns (grid, outcome, done, info).
    /// Rejected clicks come back as outcome "rejected" with the reason in info["error"].
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        row: usize,
        col: usize,
    ) -> PyResult<(Bound<'py, PyArray2<i8>>, &'static str, bool, Bound<'py, PyDict>)> {
        let info = PyDict::new_bound(py);
        let outcome = match self.session.select(Coord::new(row, col)) {
            Ok(outcome) => {
                if let SelectOutcome::MatchFound { reshuffled } = outcome {
                    info.set_item("reshuffled", reshuffled)?;
                }
                outcome_name(outcome)
            }
            Err(e @ SelectError::OutOfBounds(_)) => return Err(PyValueError::new_err(e.to_string())),
            Err(e) => {
                info.set_item("error", e.to_string())?;
                "rejected"
            }
        };
        info.set_item("message", self.session.message())?;
        info.set_item("tiles_remaining", self.session.tiles_remaining())?;
        let done = self.session.status() != GameStatus::Playing;
        Ok((self.grid(py)?, outcome, done, info))
    }

    /// Symbol ids per cell, -1 where the tile has been removed.
    fn grid<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<i8>>> {
        let flat: Vec<i8> = self
            .session
            .board()
            .cells()
            .iter()
            .map(|c| if c.visible { c.symbol.id() as i8 } else { -1 })
            .collect();
        PyArray1::from_vec_bound(py, flat).reshape([ROWS, COLS])
    }

    fn free_mask<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let board = self.session.board();
        let flat: Vec<bool> = Coord::all().map(|c| board.is_free(c)).collect();
        PyArray1::from_vec_bound(py, flat).reshape([ROWS, COLS])
    }

    fn legal_moves(&self) -> Vec<((usize, usize), (usize, usize))> {
        self.session
            .board()
            .legal_moves()
            .into_iter()
            .map(|(a, b)| ((a.row, a.col), (b.row, b.col)))
            .collect()
    }

    fn render(&self) -> String {
        self.session.board().render()
    }

    fn message(&self) -> String {
        self.session.message().to_string()
    }

    fn tiles_remaining(&self) -> usize {
        self.session.tiles_remaining()
    }

    #[staticmethod]
    fn coordinate_label(row: usize, col: usize) -> String {
        Coord::new(row, col).label()
    }
}

#[pymodule]
fn verse_tiles(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Env>()?;
    Ok(())
}
