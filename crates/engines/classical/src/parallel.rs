//! Root-split parallel search and iterative deepening.

use chess_core::{
    BoardState, Move, SearchMemo, TimeControl, TranspositionTable, all_legal_moves, move_to_uci,
};
use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::debug;

use crate::eval::Evaluator;
use crate::score::{INFINITY, better_for, is_mate_score, plies_to_mate};
use crate::search::Searcher;

/// Outcome of one completed depth.
#[derive(Debug, Clone)]
pub struct RootResult {
    pub best_move: Move,
    pub score: i32,
    /// Principal variation, starting with `best_move`.
    pub line: Vec<Move>,
    pub depth: u8,
    pub nodes: u64,
}

/// Shared pieces every root task needs.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub pool: &'a ThreadPool,
    pub tt: &'a TranspositionTable,
    pub evaluator: &'a Evaluator,
}

/// Searches every root move of `state` to `depth` plies on the pool.
///
/// Each root move gets a full window, so its value is exact and the winner
/// does not depend on which task finishes first. Ties go to the earliest
/// move in generation order. Returns `None` when `state` has no legal move
/// or `tc` stopped any task; a cancelled depth is never partially used.
pub fn parallel_search(
    ctx: SearchContext<'_>,
    state: &BoardState,
    depth: u8,
    tc: &TimeControl,
) -> Option<RootResult> {
    let moves = all_legal_moves(ctx.tt, state);
    let depth = depth.max(1);

    let results: Vec<Option<(i32, Vec<Move>, u64)>> = ctx.pool.install(|| {
        moves
            .par_iter()
            .map(|mv| search_root_move(ctx, mv, depth, tc))
            .collect()
    });

    fold_root(ctx.tt, state, depth, moves, results)
}

/// Single-threaded twin of [`parallel_search`], visiting root moves in the
/// same order with the same fold.
pub fn serial_search(
    tt: &TranspositionTable,
    evaluator: &Evaluator,
    state: &BoardState,
    depth: u8,
    tc: &TimeControl,
) -> Option<RootResult> {
    let moves = all_legal_moves(tt, state);
    let depth = depth.max(1);
    let mut results = Vec::with_capacity(moves.len());
    for mv in &moves {
        let mut searcher = Searcher::new(tt, evaluator, tc);
        let eval = evaluator.evaluate(tt, &mv.state);
        let found = searcher.search(&mv.state, depth - 1, -INFINITY, INFINITY, eval, 1);
        let nodes = searcher.nodes();
        results.push(found.map(|(value, line)| (value, line, nodes)));
    }
    fold_root(tt, state, depth, moves, results)
}

fn search_root_move(
    ctx: SearchContext<'_>,
    mv: &Move,
    depth: u8,
    tc: &TimeControl,
) -> Option<(i32, Vec<Move>, u64)> {
    if tc.is_stopped() {
        return None;
    }
    let mut searcher = Searcher::new(ctx.tt, ctx.evaluator, tc);
    let eval = ctx.evaluator.evaluate(ctx.tt, &mv.state);
    let (value, line) = searcher.search(&mv.state, depth - 1, -INFINITY, INFINITY, eval, 1)?;
    Some((value, line, searcher.nodes()))
}

fn fold_root(
    tt: &TranspositionTable,
    state: &BoardState,
    depth: u8,
    moves: Vec<Move>,
    results: Vec<Option<(i32, Vec<Move>, u64)>>,
) -> Option<RootResult> {
    let mover = state.to_move();
    let mut best: Option<RootResult> = None;
    let mut nodes = 1;
    for (mv, found) in moves.into_iter().zip(results) {
        let (score, tail, n) = found?;
        nodes += n;
        if best
            .as_ref()
            .is_none_or(|b| better_for(mover, score, b.score))
        {
            let mut line = Vec::with_capacity(tail.len() + 1);
            line.push(mv);
            line.extend(tail);
            best = Some(RootResult {
                best_move: mv,
                score,
                line,
                depth,
                nodes: 0,
            });
        }
    }

    let mut best = best?;
    best.nodes = nodes;
    tt.lookup(state.hash()).store_search(SearchMemo {
        value: best.score,
        depth,
        mate_plies: plies_to_mate(best.score).map_or(0, |p| p.min(u8::MAX as u32) as u8),
    });
    tt.lookup(best.best_move.state.hash()).mark_pv();
    Some(best)
}

/// Tunables for [`start_search`].
#[derive(Debug, Clone, Copy)]
pub struct DeepeningLimits {
    pub min_depth: u8,
    pub max_depth: u8,
}

/// Iterative deepening under `tc`.
///
/// `min_depth` is searched to completion whatever the deadline, so a move is
/// always available. Deeper iterations run until `tc` stops one, which is
/// then discarded whole. A completed iteration replaces the kept result only
/// when its score is strictly better for the mover.
///
/// Returns the kept result, the deepest completed depth, the total node
/// count and whether the deadline cut the search short. `None` when the
/// position has no legal move.
pub fn start_search(
    ctx: SearchContext<'_>,
    state: &BoardState,
    limits: DeepeningLimits,
    tc: &TimeControl,
) -> Option<DeepeningOutcome> {
    let mover = state.to_move();
    let unbounded = TimeControl::new(None);
    let mut kept = parallel_search(ctx, state, limits.min_depth, &unbounded)?;
    let mut completed = kept.depth;
    let mut nodes = kept.nodes;
    let mut stopped = false;
    log_depth(&kept);

    for depth in (limits.min_depth.max(1)..limits.max_depth).map(|d| d + 1) {
        if is_mate_score(kept.score) && better_for(mover, kept.score, 0) {
            // A shallower pass already found the fastest forced mate.
            break;
        }
        if tc.check_time() {
            stopped = true;
            break;
        }
        match parallel_search(ctx, state, depth, tc) {
            Some(result) => {
                completed = depth;
                nodes += result.nodes;
                log_depth(&result);
                if better_for(mover, result.score, kept.score) {
                    kept = result;
                }
            }
            None => {
                debug!(depth, "deadline reached, discarding depth");
                stopped = true;
                break;
            }
        }
    }

    Some(DeepeningOutcome {
        result: kept,
        completed_depth: completed,
        nodes,
        stopped,
    })
}

#[derive(Debug, Clone)]
pub struct DeepeningOutcome {
    pub result: RootResult,
    pub completed_depth: u8,
    pub nodes: u64,
    pub stopped: bool,
}

fn log_depth(result: &RootResult) {
    debug!(
        depth = result.depth,
        score = result.score,
        best = %move_to_uci(&result.best_move),
        nodes = result.nodes,
        "depth complete"
    );
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod parallel_tests;
