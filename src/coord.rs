// src/coord.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoordError;

pub const ROWS: usize = 6;
pub const COLS: usize = 8;
pub const CELL_COUNT: usize = ROWS * COLS;

/// Zero-based grid position. Shown to players as column letter + row number ("A1".."H6").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Row-major index into the 48-cell grid.
    pub fn index(self) -> usize {
        self.row * COLS + self.col
    }

    pub fn from_index(idx: usize) -> Self {
        Self { row: idx / COLS, col: idx % COLS }
    }

    pub fn is_corner(self) -> bool {
        (self.row == 0 || self.row == ROWS - 1) && (self.col == 0 || self.col == COLS - 1)
    }

    pub fn is_edge(self) -> bool {
        self.row == 0 || self.row == ROWS - 1 || self.col == 0 || self.col == COLS - 1
    }

    /// "A1" style label. Out-of-range positions fall back to "(row,col)".
    pub fn label(self) -> String {
        self.to_string()
    }

    /// Every position in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(CoordError::Empty)?;
        let col = match letter.to_ascii_uppercase() {
            c @ 'A'..='H' => (c as u8 - b'A') as usize,
            _ => return Err(CoordError::BadColumn(letter)),
        };
        let rest = chars.as_str();
        let row: usize = rest.parse().map_err(|_| CoordError::BadRow(rest.to_string()))?;
        if row == 0 || row > ROWS {
            return Err(CoordError::BadRow(rest.to_string()));
        }
        Ok(Coord::new(row - 1, col))
    }
}

/// Label for a raw (row, col) pair.
pub fn coordinate_label(row: usize, col: usize) -> String {
    Coord::new(row, col).label()
}
