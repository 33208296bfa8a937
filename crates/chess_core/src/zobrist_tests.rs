use super::*;
use crate::types::{Color, Piece, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    // Verify that piece keys are unique (no collisions in small sample)
    let mut seen = std::collections::HashSet::new();

    for sq in 0..64 {
        for nibble in 0..12 {
            let key = ZOBRIST.pieces[sq][nibble];
            assert!(seen.insert(key), "Duplicate Zobrist key found");
        }
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );

    for key in ZOBRIST.castle.iter().chain(ZOBRIST.en_passant.iter()) {
        assert!(seen.insert(*key), "Flag byte key collision");
    }
}

#[test]
fn test_empty_nibble_has_no_key() {
    for sq in 0..64u8 {
        assert_eq!(ZOBRIST.piece_key(sq, Piece::EMPTY_NIBBLE), 0);
    }
}

#[test]
fn test_zobrist_piece_key() {
    let nibble = Piece::new(Color::White, PieceKind::Pawn).to_nibble();
    let key1 = ZOBRIST.piece_key(0, nibble);
    let key2 = ZOBRIST.piece_key(1, nibble);
    assert_ne!(key1, key2);
}

#[test]
fn test_keys_are_deterministic() {
    let fresh = ZobristKeys::new();
    assert_eq!(fresh.side_to_move, ZOBRIST.side_to_move);
    assert_eq!(fresh.pieces[17][3], ZOBRIST.pieces[17][3]);
    assert_eq!(fresh.en_passant[0x1C], ZOBRIST.en_passant[0x1C]);
}
