use super::*;
use chess_core::fen::parse;
use chess_core::move_to_uci;

use crate::score::INFINITY;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
const MATE_IN_ONE_BLACK: &str = "4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1";

fn run(tt: &TranspositionTable, fen: &str, depth: u8) -> Option<Line> {
    let evaluator = Evaluator::default();
    let tc = TimeControl::new(None);
    let state = parse(fen).unwrap();
    let eval = evaluator.evaluate(tt, &state);
    Searcher::new(tt, &evaluator, &tc).search(&state, depth, -INFINITY, INFINITY, eval, 0)
}

/// Plain minimax over every move, no pruning and no ordering.
fn minimax(
    tt: &TranspositionTable,
    evaluator: &Evaluator,
    state: &BoardState,
    depth: u8,
    eval: i32,
    ply: u8,
) -> i32 {
    if is_mate_score(eval) {
        return mate_at(eval, ply);
    }
    if depth == 0 {
        return eval;
    }
    let mover = state.to_move();
    let moves = all_legal_moves(tt, state);
    if moves.is_empty() {
        return if is_checked(tt, state, mover) {
            mate_at(-sign(mover) * CHECKMATE, ply)
        } else {
            0
        };
    }
    let values = moves.iter().map(|mv| {
        let child_eval = evaluator.evaluate(tt, &mv.state);
        minimax(tt, evaluator, &mv.state, depth - 1, child_eval, ply + 1)
    });
    match mover {
        Color::White => values.max().unwrap(),
        Color::Black => values.min().unwrap(),
    }
}

/// Minimax value of every root move, in generation order.
fn root_values(
    tt: &TranspositionTable,
    evaluator: &Evaluator,
    state: &BoardState,
    depth: u8,
) -> Vec<(Move, i32)> {
    all_legal_moves(tt, state)
        .into_iter()
        .map(|mv| {
            let eval = evaluator.evaluate(tt, &mv.state);
            (mv, minimax(tt, evaluator, &mv.state, depth - 1, eval, 1))
        })
        .collect()
}

/// The best root move, if no other root move reaches the same value.
fn unique_best(mover: Color, values: &[(Move, i32)]) -> Option<Move> {
    let (best, value) = values
        .iter()
        .copied()
        .reduce(|a, b| if better_for(mover, b.1, a.1) { b } else { a })?;
    let ties = values.iter().filter(|(_, v)| *v == value).count();
    (ties == 1).then_some(best)
}

#[test]
fn test_finds_mate_in_one() {
    let tt = TranspositionTable::new(1 << 16);
    let (value, line) = run(&tt, MATE_IN_ONE, 1).unwrap();
    assert_eq!(value, CHECKMATE - 1);
    assert_eq!(move_to_uci(&line[0]), "e1e8");
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let tt = TranspositionTable::new(1 << 16);
    let (value, line) = run(&tt, MATE_IN_ONE_BLACK, 1).unwrap();
    assert_eq!(value, -(CHECKMATE - 1));
    assert_eq!(move_to_uci(&line[0]), "e8e1");
}

#[test]
fn test_prefers_the_faster_mate() {
    let tt = TranspositionTable::new(1 << 16);
    let (value, line) = run(&tt, MATE_IN_ONE, 3).unwrap();
    assert_eq!(value, CHECKMATE - 1);
    assert_eq!(move_to_uci(&line[0]), "e1e8");
    assert_eq!(line.len(), 1);
}

#[test]
fn test_mated_and_stalemated_roots() {
    let tt = TranspositionTable::new(1 << 16);
    let (value, line) = run(&tt, "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3).unwrap();
    assert_eq!(value, CHECKMATE);
    assert!(line.is_empty());

    let (value, line) = run(&tt, "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 3).unwrap();
    assert_eq!(value, 0);
    assert!(line.is_empty());
}

#[test]
fn test_depth_zero_is_static_eval() {
    let tt = TranspositionTable::new(1 << 16);
    let state = parse(KIWIPETE).unwrap();
    let eval = Evaluator::default().evaluate(&tt, &state);
    assert_eq!(run(&tt, KIWIPETE, 0).unwrap(), (eval, Vec::new()));
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let evaluator = Evaluator::default();
    let mut unique = 0;
    for (fen, depth) in [(ENDGAME, 3), (KIWIPETE, 2), (MATE_IN_ONE, 3)] {
        let tt = TranspositionTable::new(1 << 16);
        let state = parse(fen).unwrap();
        let eval = evaluator.evaluate(&tt, &state);
        let expected = minimax(&tt, &evaluator, &state, depth, eval, 0);
        let (value, line) = run(&tt, fen, depth).unwrap();
        assert_eq!(value, expected, "{fen} at depth {depth}");

        let disabled = TranspositionTable::disabled();
        let values = root_values(&disabled, &evaluator, &state, depth);
        if let Some(best) = unique_best(state.to_move(), &values) {
            unique += 1;
            assert_eq!(line[0], best, "{fen} at depth {depth}");
        }
    }
    assert!(unique > 0);
}

#[test]
fn test_cache_does_not_change_values() {
    let warm = TranspositionTable::new(1 << 16);
    // Two passes so the second one orders by memoized values.
    run(&warm, ENDGAME, 2).unwrap();
    let (cached, cached_line) = run(&warm, ENDGAME, 3).unwrap();
    let disabled = TranspositionTable::disabled();
    let (uncached, uncached_line) = run(&disabled, ENDGAME, 3).unwrap();
    assert_eq!(cached, uncached);

    let state = parse(ENDGAME).unwrap();
    let values = root_values(&disabled, &Evaluator::default(), &state, 3);
    if let Some(best) = unique_best(state.to_move(), &values) {
        assert_eq!(cached_line[0], best);
        assert_eq!(uncached_line[0], best);
    }
}

#[test]
fn test_line_is_playable() {
    let tt = TranspositionTable::new(1 << 16);
    let (_, line) = run(&tt, KIWIPETE, 3).unwrap();
    assert_eq!(line.len(), 3);
    let mut state = parse(KIWIPETE).unwrap();
    for mv in line {
        assert!(all_legal_moves(&tt, &state).contains(&mv));
        state = mv.state;
    }
}

#[test]
fn test_children_ordered_best_first() {
    let tt = TranspositionTable::new(1 << 16);
    let evaluator = Evaluator::default();
    let tc = TimeControl::new(None);
    let state = parse(ENDGAME).unwrap();
    let searcher = Searcher::new(&tt, &evaluator, &tc);

    let children = searcher.ordered_children(&state);
    assert_eq!(children.len(), all_legal_moves(&tt, &state).len());
    for pair in children.windows(2) {
        assert!(pair[0].1 >= pair[1].1, "white children should descend");
    }
}

#[test]
fn test_principal_variation_leads_ordering() {
    let tt = TranspositionTable::new(1 << 16);
    let (_, line) = run(&tt, ENDGAME, 3).unwrap();

    let evaluator = Evaluator::default();
    let tc = TimeControl::new(None);
    let state = parse(ENDGAME).unwrap();
    let children = Searcher::new(&tt, &evaluator, &tc).ordered_children(&state);
    assert_eq!(children[0].0, line[0]);
}

#[test]
fn test_stopped_search_returns_none() {
    let tt = TranspositionTable::new(1 << 16);
    let evaluator = Evaluator::default();
    let tc = TimeControl::new(None);
    tc.stop();
    let state = BoardState::default_state();
    let mut searcher = Searcher::new(&tt, &evaluator, &tc);
    assert!(searcher.search(&state, 4, -INFINITY, INFINITY, 0, 0).is_none());
    assert_eq!(searcher.nodes(), 0);
}

#[test]
fn test_counts_nodes() {
    let tt = TranspositionTable::new(1 << 16);
    let evaluator = Evaluator::default();
    let tc = TimeControl::new(None);
    let state = BoardState::default_state();
    let mut searcher = Searcher::new(&tt, &evaluator, &tc);
    searcher.search(&state, 1, -INFINITY, INFINITY, 0, 0).unwrap();
    // Root plus its twenty children.
    assert_eq!(searcher.nodes(), 21);
}
