// src/reshuffle.rs
use std::cmp::Reverse;

use crate::board::Board;
use crate::coord::Coord;
use crate::tiles::{Symbol, SYMBOL_COUNT};

/// Placement category: corners 3, edges 2, interior 1.
pub fn position_priority(coord: Coord) -> u8 {
    if coord.is_corner() {
        3
    } else if coord.is_edge() {
        2
    } else {
        1
    }
}

/// Visible positions ordered best slot first: category, then free before blocked.
/// Ties keep row-major order.
pub fn ranked_positions(board: &Board) -> Vec<Coord> {
    let mut positions: Vec<Coord> = Coord::all().filter(|&c| board.is_visible(c)).collect();
    positions.sort_by_key(|&c| Reverse((position_priority(c), board.is_free(c))));
    positions
}

/// Redistribute the remaining symbols over the same visible positions so that
/// pairs land next to each other in the most accessible slots.
///
/// Visibility is never touched and the multiset of visible symbols is kept.
/// The result is not guaranteed to have a legal move; callers re-check with
/// [`Board::has_legal_move`].
pub fn reshuffle(board: &mut Board) {
    let tiles = board.visible_tiles();

    // first-seen order keeps the plan deterministic
    let mut counts = [0usize; SYMBOL_COUNT];
    let mut order: Vec<Symbol> = Vec::new();
    for &(_, s) in &tiles {
        if counts[s.id() as usize] == 0 {
            order.push(s);
        }
        counts[s.id() as usize] += 1;
    }

    let mut placement: Vec<Symbol> = Vec::with_capacity(tiles.len());
    for &s in &order {
        for _ in 0..counts[s.id() as usize] / 2 {
            placement.push(s);
            placement.push(s);
        }
    }
    // odd leftovers cannot happen while tiles leave in pairs; park them last
    for &s in &order {
        if counts[s.id() as usize] % 2 == 1 {
            placement.push(s);
        }
    }

    let ranked = ranked_positions(board);
    for (coord, symbol) in ranked.into_iter().zip(placement) {
        board.set_symbol(coord, symbol);
    }
    log::debug!("[BOARD] reshuffled remaining:{}", tiles.len());
}
