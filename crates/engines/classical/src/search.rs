//! Alpha-beta search with cache-guided move ordering.
//!
//! Values are always from White's side: White raises `alpha`, Black lowers
//! `beta`, and a node is cut once `beta <= alpha`. The cache only steers move
//! ordering; a stored search value never replaces a search, so the result is
//! the same with the cache disabled.

use chess_core::{
    BoardState, Color, Move, SearchMemo, TimeControl, TranspositionTable, all_legal_moves,
    is_checked,
};

use crate::eval::Evaluator;
use crate::score::{CHECKMATE, better_for, is_mate_score, mate_at, plies_to_mate};

/// A searched value and the line that reaches it.
pub type Line = (i32, Vec<Move>);

pub struct Searcher<'a> {
    tt: &'a TranspositionTable,
    evaluator: &'a Evaluator,
    tc: &'a TimeControl,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(tt: &'a TranspositionTable, evaluator: &'a Evaluator, tc: &'a TimeControl) -> Self {
        Self {
            tt,
            evaluator,
            tc,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `state` to `depth` plies. `static_eval` is the evaluator's
    /// score for `state` and `ply` its distance from the root, used to rank
    /// mates by length.
    ///
    /// Returns `None` once the time control stops the search; the partial
    /// result is meaningless and must be dropped.
    pub fn search(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        static_eval: i32,
        ply: u8,
    ) -> Option<Line> {
        if self.tc.is_stopped() {
            return None;
        }
        self.nodes += 1;
        if self.tc.should_check_time(self.nodes) && self.tc.check_time() {
            return None;
        }

        if is_mate_score(static_eval) {
            return Some((mate_at(static_eval, ply), Vec::new()));
        }
        if depth == 0 {
            return Some((static_eval, Vec::new()));
        }

        let mover = state.to_move();
        let children = self.ordered_children(state);
        if children.is_empty() {
            // Mates arrive through the static evaluation; this is stalemate
            // unless the caller passed a stale evaluation.
            let value = if is_checked(self.tt, state, mover) {
                mate_at(-sign(mover) * CHECKMATE, ply)
            } else {
                0
            };
            return Some((value, Vec::new()));
        }

        let mut best: Option<(i32, Vec<Move>)> = None;
        for (mv, eval) in children {
            let (value, tail) = self.search(&mv.state, depth - 1, alpha, beta, eval, ply + 1)?;
            if best
                .as_ref()
                .is_none_or(|(b, _)| better_for(mover, value, *b))
            {
                let mut line = Vec::with_capacity(tail.len() + 1);
                line.push(mv);
                line.extend(tail);
                best = Some((value, line));
            }
            match mover {
                Color::White => alpha = alpha.max(value),
                Color::Black => beta = beta.min(value),
            }
            if beta <= alpha {
                break;
            }
        }

        let (value, line) = best?;
        self.remember(state, depth, value, ply, &line);
        Some((value, line))
    }

    /// Legal moves paired with their static evaluation, best first for the
    /// side to move. Children flagged as principal variation lead; the rest
    /// are ranked by their memoized search value, falling back to the static
    /// evaluation. Ties keep generation order.
    pub fn ordered_children(&self, state: &BoardState) -> Vec<(Move, i32)> {
        let s = sign(state.to_move());
        let mut scored: Vec<(bool, i32, Move, i32)> = all_legal_moves(self.tt, state)
            .into_iter()
            .map(|mv| {
                let eval = self.evaluator.evaluate(self.tt, &mv.state);
                let entry = self.tt.lookup(mv.state.hash());
                let key = entry.search().map_or(eval, |memo| memo.value);
                (entry.is_pv(), s * key, mv, eval)
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        scored.into_iter().map(|(_, _, mv, eval)| (mv, eval)).collect()
    }

    fn remember(&self, state: &BoardState, depth: u8, value: i32, ply: u8, line: &[Move]) {
        let mate_plies = plies_to_mate(value)
            .map_or(0, |p| p.saturating_sub(ply as u32).min(u8::MAX as u32) as u8);
        self.tt.lookup(state.hash()).store_search(SearchMemo {
            value,
            depth,
            mate_plies,
        });
        if let Some(first) = line.first() {
            self.tt.lookup(first.state.hash()).mark_pv();
        }
    }
}

pub(crate) fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
