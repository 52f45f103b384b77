//! Bounded-search driver helpers.
//!
//! Wraps a [`UctTree`] search call with caller-supplied limits and picks
//! the move to play from the resulting snapshot. The most-visited child is
//! chosen rather than the best mean: visit counts are far more robust
//! against a handful of lucky rollouts.

use crate::game_state::reversi_types::Move;
use crate::search::uct::{SearchLimits, SearchResult, UctTree};

/// Run one bounded search and return its snapshot.
pub fn run_search(tree: &mut UctTree, limits: &SearchLimits) -> SearchResult {
    tree.search(limits)
}

/// Pick the most-visited root child. Single-child results short-circuit;
/// ties resolve to the first child encountered. `None` when the root has
/// no children (terminal position).
pub fn select_best_move(result: &SearchResult) -> Option<Move> {
    let first = result.children.first()?;
    if result.children.len() == 1 {
        return Some(first.mv);
    }
    let mut best = first;
    for info in &result.children[1..] {
        if info.visits > best.visits {
            best = info;
        }
    }
    Some(best.mv)
}
