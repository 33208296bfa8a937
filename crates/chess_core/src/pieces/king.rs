use super::{Move, MoveList, leaper_attacks, leaper_moves, transition};
use crate::bitboard::Bitboard;
use crate::board::{BoardState, CASTLE_BLACK_KING, CASTLE_BLACK_QUEEN, CASTLE_WHITE_KING, CASTLE_WHITE_QUEEN};
use crate::movegen::attack_matrix;
use crate::tt::TranspositionTable;
use crate::types::*;

const OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const KING_COL: i8 = 4;

/// One castle: the blocked bit guarding it, rook column, and the columns king
/// and rook land on.
struct Castle {
    bit: u8,
    rook_col: i8,
    king_to: i8,
    rook_to: i8,
}

fn castles(c: Color) -> [Castle; 2] {
    let (king_side, queen_side) = match c {
        Color::White => (CASTLE_WHITE_KING, CASTLE_WHITE_QUEEN),
        Color::Black => (CASTLE_BLACK_KING, CASTLE_BLACK_QUEEN),
    };
    [
        Castle {
            bit: king_side,
            rook_col: 7,
            king_to: 6,
            rook_to: 5,
        },
        Castle {
            bit: queen_side,
            rook_col: 0,
            king_to: 2,
            rook_to: 3,
        },
    ]
}

pub fn moves(tt: &TranspositionTable, state: &BoardState, from: u8) -> MoveList {
    let mut out = leaper_moves(state, from, &OFFSETS);
    gen_castle(tt, state, from, &mut out);
    out
}

fn gen_castle(tt: &TranspositionTable, state: &BoardState, from: u8, out: &mut MoveList) {
    let c = state.piece_at(from).expect("no king on from-square").color;
    let row = c.back_rank() as i8;
    if sq(row, KING_COL) != Some(from) {
        return;
    }

    let mut open = castles(c)
        .into_iter()
        .filter(|castle| !state.is_castle_blocked(castle.bit))
        .peekable();
    if open.peek().is_none() {
        return;
    }

    let enemy = attack_matrix(tt, state, c.other());
    // Can't castle out of check.
    if enemy.contains(from) {
        return;
    }

    for castle in open {
        let Some(rook_from) = sq(row, castle.rook_col) else {
            continue;
        };
        if state.piece_at(rook_from) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }

        let (lo, hi) = if castle.rook_col > KING_COL {
            (KING_COL + 1, castle.rook_col - 1)
        } else {
            (castle.rook_col + 1, KING_COL - 1)
        };
        let path_clear = (lo..=hi).all(|col| sq(row, col).is_some_and(|s| state.piece_at(s).is_none()));
        if !path_clear {
            continue;
        }

        // Squares the king crosses and lands on must not be attacked.
        let step = (castle.king_to - KING_COL).signum();
        let mut col = KING_COL + step;
        let mut safe = true;
        loop {
            if sq(row, col).is_none_or(|s| enemy.contains(s)) {
                safe = false;
                break;
            }
            if col == castle.king_to {
                break;
            }
            col += step;
        }
        if !safe {
            continue;
        }

        let (Some(king_to), Some(rook_to)) = (sq(row, castle.king_to), sq(row, castle.rook_to))
        else {
            continue;
        };
        let mut next = transition(state, from, king_to);
        next.put(rook_from, None);
        next.put(rook_to, Some(Piece::new(c, PieceKind::Rook)));
        out.push(Move {
            from,
            to: king_to,
            captured: None,
            state: next,
            is_castle: true,
            is_promotion: false,
        });
    }
}

/// Adjacent squares only; castling never attacks.
pub fn attacks(_state: &BoardState, from: u8) -> Bitboard {
    leaper_attacks(from, &OFFSETS)
}

pub fn attack_count(state: &BoardState, from: u8) -> u32 {
    attacks(state, from).popcount()
}
