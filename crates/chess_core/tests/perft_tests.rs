use std::time::Instant;

use rayon::prelude::*;

use chess_core::fen::parse as parse_fen;
use chess_core::{BoardState, TranspositionTable, move_to_uci, perft, perft_divide};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 5_000_000;

/// Reference counts in EPD layout: `fen ;D1 n ;D2 n ...`.
const STANDARD_EPD: &str = "\
rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ;D1 20 ;D2 400 ;D3 8902 ;D4 197281 ;D5 4865609 ;D6 119060324
r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1 ;D1 48 ;D2 2039 ;D3 97862 ;D4 4085603
8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1 ;D1 14 ;D2 191 ;D3 2812 ;D4 43238 ;D5 674624 ;D6 11030083
r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1 ;D1 6 ;D2 264 ;D3 9467 ;D4 422333
r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1 ;D1 6 ;D2 264 ;D3 9467 ;D4 422333
rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8 ;D1 44 ;D2 1486 ;D3 62379 ;D4 2103487
r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10 ;D1 46 ;D2 2079 ;D3 89890 ;D4 3894594
";

fn parse_epd_line(line: &str) -> Option<(String, Vec<(u8, u64)>)> {
    let mut parts = line.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut items = part.split_whitespace();
        let key = items.next().unwrap_or("");
        let val = items.next().unwrap_or("");
        if !key.starts_with('D') {
            continue;
        }
        let depth: u8 = key[1..]
            .parse()
            .unwrap_or_else(|_| panic!("Invalid depth token in EPD: {}", key));
        let expected: u64 = val
            .parse()
            .unwrap_or_else(|_| panic!("Invalid node count in EPD: {}", val));
        depths.push((depth, expected));
    }
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some((fen.to_string(), depths))
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let cases: Vec<(usize, String, Vec<(u8, u64)>)> = STANDARD_EPD
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_epd_line(line.trim()).map(|(fen, depths)| (idx, fen, depths))
        })
        .collect();
    assert_eq!(cases.len(), 7);

    cases.par_iter().for_each(|(idx, fen, depths)| {
        let tt = TranspositionTable::new(1 << 16);
        let state = parse_fen(fen).unwrap_or_else(|e| panic!("case {}: {e}", idx + 1));
        let mut ran_depths = Vec::new();
        let mut total_nodes: u64 = 0;
        let case_start = Instant::now();

        for (depth, expected) in depths {
            if !full && *expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {} for case {} (expected {} nodes); set {}=1 to run all.",
                    depth,
                    idx + 1,
                    expected,
                    FULL_PERFT_ENV
                );
                continue;
            }
            let got = perft(&tt, &state, *depth);
            assert!(
                got == *expected,
                "Perft mismatch for FEN '{}' at depth {}: expected {}, got {}",
                fen,
                depth,
                expected,
                got
            );

            ran_depths.push(*depth);
            total_nodes += got;
        }

        let case_elapsed = case_start.elapsed();
        if !ran_depths.is_empty() {
            println!(
                "Case {:03} done: depths {:?}, total nodes {}, elapsed {:.3?} ({:.1} Mn/s)",
                idx + 1,
                ran_depths,
                total_nodes,
                case_elapsed,
                (total_nodes as f64 / 1_000_000.0) / case_elapsed.as_secs_f64()
            );
        }
    });
}

#[test]
fn perft_without_cache_matches() {
    let cached = TranspositionTable::new(1 << 16);
    let disabled = TranspositionTable::disabled();
    let state =
        parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&disabled, &state, 3), 97_862);
    assert_eq!(perft(&cached, &state, 3), 97_862);
}

#[test]
fn divide_matches_known_split() {
    let tt = TranspositionTable::new(1 << 16);
    let start = BoardState::default_state();
    let divide = perft_divide(&tt, &start, 3);
    assert_eq!(divide.len(), 20);
    let e2e4 = divide
        .iter()
        .find(|(mv, _)| move_to_uci(mv) == "e2e4")
        .map(|(_, n)| *n);
    assert_eq!(e2e4, Some(600));
    let g1f3 = divide
        .iter()
        .find(|(mv, _)| move_to_uci(mv) == "g1f3")
        .map(|(_, n)| *n);
    assert_eq!(g1f3, Some(440));
}
