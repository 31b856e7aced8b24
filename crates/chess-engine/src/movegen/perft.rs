//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::{generate_moves, make_move};
use crate::{Position, RuleOptions};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    perft_with(position, depth, &RuleOptions::default())
}

fn perft_with(position: &Position, depth: u32, options: &RuleOptions) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft_with(&make_move(position, *m, options), depth - 1, options))
        .sum()
}

/// Perft with divide - node count below each root move, sorted by UCI text.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let options = RuleOptions::default();
    let moves = generate_moves(position);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let new_pos = make_move(position, *m, &options);
            let nodes = if depth > 1 {
                perft_with(&new_pos, depth - 1, &options)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
