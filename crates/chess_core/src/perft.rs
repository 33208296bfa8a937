use crate::board::BoardState;
use crate::movegen::all_legal_moves;
use crate::pieces::Move;
use crate::tt::TranspositionTable;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(tt: &TranspositionTable, state: &BoardState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = all_legal_moves(tt, state);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(tt, &mv.state, depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(tt: &TranspositionTable, state: &BoardState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    all_legal_moves(tt, state)
        .into_iter()
        .map(|mv| {
            let nodes = perft(tt, &mv.state, depth - 1);
            (mv, nodes)
        })
        .collect()
}
