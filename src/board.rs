// src/board.rs
use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, CELL_COUNT, COLS};
use crate::error::SnapshotError;
use crate::layout::{self, Layout};
use crate::tiles::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub symbol: Symbol,
    pub visible: bool,
}

/// 6x8 tile grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Fully visible board with the given symbols in row-major order.
    pub fn from_symbols(symbols: [Symbol; CELL_COUNT]) -> Self {
        let mut cells = [Cell { symbol: Symbol::East, visible: true }; CELL_COUNT];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            cell.symbol = symbol;
        }
        Self { cells }
    }

    pub fn new_fixed() -> Self {
        Self::from_symbols(layout::fixed_deal())
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_symbols(layout::shuffled_deal(rng))
    }

    pub fn generate<R: Rng + ?Sized>(layout: Layout, rng: &mut R) -> Self {
        Self::from_symbols(layout::deal(layout, rng))
    }

    /// Board where only the listed tiles remain; every other cell is removed.
    pub fn with_visible(tiles: &[(Coord, Symbol)]) -> Self {
        let mut cells = [Cell { symbol: Symbol::East, visible: false }; CELL_COUNT];
        for &(coord, symbol) in tiles {
            if coord.in_bounds() {
                cells[coord.index()] = Cell { symbol, visible: true };
            }
        }
        Self { cells }
    }

    /// Rebuild from a row-major cell list (snapshot restore).
    pub fn from_cells(cells: &[Cell]) -> Result<Self, SnapshotError> {
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| SnapshotError::CellCount(cells.len()))?;
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        coord.in_bounds().then(|| &self.cells[coord.index()])
    }

    pub fn is_visible(&self, coord: Coord) -> bool {
        self.cell(coord).map_or(false, |c| c.visible)
    }

    /// A visible tile is free when its left or right neighbour is missing
    /// (off the grid or already removed). Vertical neighbours never block.
    pub fn is_free(&self, coord: Coord) -> bool {
        if !self.is_visible(coord) {
            return false;
        }
        let left_blocked = coord.col > 0 && self.is_visible(Coord::new(coord.row, coord.col - 1));
        let right_blocked = coord.col + 1 < COLS && self.is_visible(Coord::new(coord.row, coord.col + 1));
        !left_blocked || !right_blocked
    }

    pub fn free_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_free(c)).collect()
    }

    /// Every pair of free tiles sharing a symbol, in row-major order.
    pub fn legal_moves(&self) -> Vec<(Coord, Coord)> {
        let free = self.free_cells();
        let mut moves = Vec::new();
        for (i, &a) in free.iter().enumerate() {
            for &b in &free[i + 1..] {
                if self.cells[a.index()].symbol == self.cells[b.index()].symbol {
                    moves.push((a, b));
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self) -> bool {
        let free = self.free_cells();
        free.iter().enumerate().any(|(i, &a)| {
            free[i + 1..]
                .iter()
                .any(|&b| self.cells[a.index()].symbol == self.cells[b.index()].symbol)
        })
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visible).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.visible_count() == 0
    }

    /// Visible positions with their symbols, row-major.
    pub fn visible_tiles(&self) -> Vec<(Coord, Symbol)> {
        Coord::all()
            .zip(self.cells.iter())
            .filter(|(_, c)| c.visible)
            .map(|(coord, c)| (coord, c.symbol))
            .collect()
    }

    /// How many visible tiles carry each symbol.
    pub fn symbol_counts(&self) -> BTreeMap<Symbol, usize> {
        let mut counts = BTreeMap::new();
        for c in self.cells.iter().filter(|c| c.visible) {
            *counts.entry(c.symbol).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn hide(&mut self, coord: Coord) {
        if coord.in_bounds() {
            self.cells[coord.index()].visible = false;
        }
    }

    pub(crate) fn set_symbol(&mut self, coord: Coord, symbol: Symbol) {
        if coord.in_bounds() {
            self.cells[coord.index()].symbol = symbol;
        }
    }

    /// Glyph grid with column letters and row numbers; removed tiles show as '·'.
    pub fn render(&self) -> String {
        let mut out = String::from("  ");
        for col in 0..COLS {
            out.push(' ');
            out.push((b'A' + col as u8) as char);
        }
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx % COLS == 0 {
                out.push('\n');
                out.push_str(&format!("{:>2}", idx / COLS + 1));
            }
            out.push(' ');
            out.push(if cell.visible { cell.symbol.to_unicode() } else { '·' });
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new_fixed()
    }
}
