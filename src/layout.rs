// src/layout.rs
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::coord::{CELL_COUNT, COLS, ROWS};
use crate::tiles::{Symbol, SYMBOL_COUNT};

/// How a fresh board is dealt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Same hand-built table every game.
    #[default]
    Fixed,
    /// Two-of-each deck shuffled with the session RNG.
    Shuffled,
}

// Rows 1-3 hold the 24 symbols in order, rows 4-6 hold them reversed,
// so row 6 mirrors row 1, row 5 mirrors row 2 and row 4 mirrors row 3.
fn fixed_table() -> [[Symbol; COLS]; ROWS] {
    let mut table = [[Symbol::East; COLS]; ROWS];
    for (i, &s) in Symbol::ALL.iter().enumerate() {
        table[i / COLS][i % COLS] = s;
        let mirrored = CELL_COUNT - 1 - i;
        table[mirrored / COLS][mirrored % COLS] = s;
    }
    table
}

/// 48 symbols in row-major order for the fixed layout.
pub fn fixed_deal() -> [Symbol; CELL_COUNT] {
    let mut out = [Symbol::East; CELL_COUNT];
    for (row, line) in fixed_table().iter().enumerate() {
        out[row * COLS..(row + 1) * COLS].copy_from_slice(line);
    }
    out
}

/// Two copies of every symbol, shuffled.
pub fn shuffled_deal<R: Rng + ?Sized>(rng: &mut R) -> [Symbol; CELL_COUNT] {
    let mut deck: Vec<Symbol> = Vec::with_capacity(CELL_COUNT);
    for &s in Symbol::ALL.iter() {
        deck.push(s);
        deck.push(s);
    }
    debug_assert_eq!(deck.len(), SYMBOL_COUNT * 2);
    deck.shuffle(rng);

    let mut out = [Symbol::East; CELL_COUNT];
    out.copy_from_slice(&deck);
    out
}

pub fn deal<R: Rng + ?Sized>(layout: Layout, rng: &mut R) -> [Symbol; CELL_COUNT] {
    match layout {
        Layout::Fixed => fixed_deal(),
        Layout::Shuffled => shuffled_deal(rng),
    }
}
