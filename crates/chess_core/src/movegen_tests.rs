use super::*;
use crate::fen::parse;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn table() -> TranspositionTable {
    TranspositionTable::new(1 << 12)
}

#[test]
fn test_startpos_moves() {
    let tt = table();
    let moves = all_legal_moves(&tt, &BoardState::default_state());
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
    assert!(moves.iter().all(|m| m.state.to_move() == Color::Black));
}

#[test]
fn test_kiwipete_moves() {
    let tt = table();
    let pos = parse(KIWIPETE).unwrap();
    let moves = all_legal_moves(&tt, &pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
    assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 8);
}

#[test]
fn test_disabled_table_agrees() {
    let cached = table();
    let disabled = TranspositionTable::disabled();
    let pos = parse(KIWIPETE).unwrap();
    let a: Vec<(u8, u8)> = all_legal_moves(&cached, &pos)
        .iter()
        .map(|m| (m.from, m.to))
        .collect();
    let b: Vec<(u8, u8)> = all_legal_moves(&disabled, &pos)
        .iter()
        .map(|m| (m.from, m.to))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_only_side_to_move_has_moves() {
    let tt = table();
    let state = BoardState::default_state();
    // e7 pawn belongs to Black, who is not on move.
    assert!(legal_moves(&tt, &state, 6, 4).is_empty());
    assert_eq!(legal_moves(&tt, &state, 1, 4).len(), 2);
    assert_eq!(legal_moves(&tt, &state, 0, 6).len(), 2);
    assert!(legal_moves(&tt, &state, 3, 3).is_empty());
    assert!(legal_moves(&tt, &state, 8, 0).is_empty());
}

#[test]
fn test_pinned_piece_cannot_move() {
    let tt = table();
    // Knight on e2 is pinned by the rook on e8.
    let state = parse("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let e2 = coord_to_sq("e2").unwrap();
    assert!(legal_moves_from(&tt, &state, e2).is_empty());
}

#[test]
fn test_check_must_be_answered() {
    let tt = table();
    // Rook on e8 checks down the e-file; the knight can only interpose.
    let state = parse("4r1k1/8/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
    assert!(is_checked(&tt, &state, Color::White));
    let moves = all_legal_moves(&tt, &state);
    for mv in &moves {
        assert!(!is_checked(&tt, &mv.state, Color::White));
    }
    let mut blocks: Vec<String> = moves
        .iter()
        .filter(|m| m.kind() == PieceKind::Knight)
        .map(|m| sq_to_coord(m.to))
        .collect();
    blocks.sort();
    assert_eq!(blocks, vec!["e2".to_string(), "e4".to_string()]);
}

#[test]
fn test_no_castling_out_of_check() {
    let tt = table();
    let state = parse("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(all_legal_moves(&tt, &state).iter().all(|m| !m.is_castle));
}

#[test]
fn test_never_leaves_own_king_attacked() {
    let tt = table();
    for fen in [
        KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ] {
        let state = parse(fen).unwrap();
        let mover = state.to_move();
        for mv in all_legal_moves(&tt, &state) {
            assert!(!is_checked(&TranspositionTable::disabled(), &mv.state, mover), "{fen}");
            for reply in all_legal_moves(&tt, &mv.state) {
                assert!(
                    !is_checked(&TranspositionTable::disabled(), &reply.state, mover.other()),
                    "{fen}"
                );
            }
        }
    }
}

#[test]
fn test_missing_king_is_never_checked() {
    let tt = table();
    let state = parse("8/8/8/8/8/8/8/r7 w - - 0 1").unwrap();
    assert!(!is_checked(&tt, &state, Color::White));
}

#[test]
fn test_attack_matrix_includes_defended_pieces() {
    let tt = table();
    let state = BoardState::default_state();
    let white = attack_matrix(&tt, &state, Color::White);
    // Every rank-2 and rank-3 square, plus the defended back-rank pieces
    // other than the two rooks on a1/h1.
    assert!(white.contains(coord_to_sq("e3").unwrap()));
    assert!(white.contains(coord_to_sq("e2").unwrap()));
    assert!(white.contains(coord_to_sq("b1").unwrap()));
    assert!(!white.contains(coord_to_sq("a1").unwrap()));
    assert!(!white.contains(coord_to_sq("e4").unwrap()));
    assert_eq!(white.popcount(), 22);
}

#[test]
fn test_game_result_checkmate() {
    let tt = table();
    // Fool's mate.
    let state = parse("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(game_result(&tt, &state), Some(GameResult::Winner(Color::Black)));
}

#[test]
fn test_game_result_stalemate() {
    let tt = table();
    let state = parse("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(game_result(&tt, &state), Some(GameResult::Draw));
}

#[test]
fn test_game_result_ongoing() {
    let tt = table();
    assert_eq!(game_result(&tt, &BoardState::default_state()), None);
}

#[test]
fn test_promote_replaces_pawn() {
    let state = parse("P3k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    let a8 = coord_to_sq("a8").unwrap();
    let promoted = promote(&state, a8, PieceKind::Knight);
    assert_eq!(promoted.piece_at(a8), Some(Piece::new(Color::White, PieceKind::Knight)));
    assert_eq!(promoted.piece_count(), state.piece_count());
    assert_eq!(promoted.hash(), promoted.compute_hash());
    assert_eq!(promoted.to_move(), state.to_move());
}

#[test]
#[should_panic(expected = "not a pawn")]
fn test_promote_rejects_non_pawn() {
    let state = BoardState::default_state();
    promote(&state, coord_to_sq("b1").unwrap(), PieceKind::Queen);
}
