use super::{Move, MoveList, transition};
use crate::bitboard::Bitboard;
use crate::board::{AdditionalState, BoardState};
use crate::types::*;

fn start_row(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => 6,
    }
}

fn promo_row(c: Color) -> i8 {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Row a pawn of colour `c` must stand on to capture en passant.
fn en_passant_row(c: Color) -> i8 {
    match c {
        Color::White => 4,
        Color::Black => 3,
    }
}

pub fn moves(state: &BoardState, from: u8, auto_promote: bool) -> MoveList {
    let c = state.piece_at(from).expect("no pawn on from-square").color;
    let r = row_of(from);
    let f = col_of(from);
    let dir = c.forward();
    let mut out = MoveList::new();

    // forward 1
    if let Some(to) = sq(r + dir, f)
        && state.piece_at(to).is_none()
    {
        push_advance(state, from, to, None, auto_promote, &mut out);

        // forward 2 from start
        if r == start_row(c)
            && let Some(to2) = sq(r + 2 * dir, f)
            && state.piece_at(to2).is_none()
        {
            let mut next = transition(state, from, to2);
            next.set_en_passant(AdditionalState::encode_en_passant(c, f as u8));
            out.push(Move {
                from,
                to: to2,
                captured: None,
                state: next,
                is_castle: false,
                is_promotion: false,
            });
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(r + dir, f + df) else {
            continue;
        };
        match state.piece_at(to) {
            Some(target) if target.color != c => {
                push_advance(state, from, to, Some(to), auto_promote, &mut out);
            }
            Some(_) => {}
            None => {
                if let Some(mv) = en_passant(state, from, c, to) {
                    out.push(mv);
                }
            }
        }
    }
    out
}

/// Capture onto the empty square `to`, removing the pawn that just passed it.
fn en_passant(state: &BoardState, from: u8, c: Color, to: u8) -> Option<Move> {
    let (pushed_by, col) = state.en_passant_target()?;
    if pushed_by != c.other() || col as i8 != col_of(to) || row_of(from) != en_passant_row(c) {
        return None;
    }
    let victim = sq(row_of(from), col_of(to))?;
    match state.piece_at(victim) {
        Some(pc) if pc.color != c && pc.kind == PieceKind::Pawn => {}
        _ => return None,
    }
    let mut next = transition(state, from, to);
    next.put(victim, None);
    Some(Move {
        from,
        to,
        captured: Some(victim),
        state: next,
        is_castle: false,
        is_promotion: false,
    })
}

/// Pushes a single-step advance or capture, expanding promotions when asked.
fn push_advance(
    state: &BoardState,
    from: u8,
    to: u8,
    captured: Option<u8>,
    auto_promote: bool,
    out: &mut MoveList,
) {
    let c = state.piece_at(from).expect("no pawn on from-square").color;
    let base = Move {
        from,
        to,
        captured,
        state: transition(state, from, to),
        is_castle: false,
        is_promotion: false,
    };
    if row_of(to) != promo_row(c) {
        out.push(base);
        return;
    }
    if !auto_promote {
        out.push(Move {
            is_promotion: true,
            ..base
        });
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        let mut mv = Move {
            is_promotion: true,
            ..base
        };
        mv.state.put(to, Some(Piece::new(c, kind)));
        out.push(mv);
    }
}

/// The two forward diagonals, occupied or not.
pub fn attacks(state: &BoardState, from: u8) -> Bitboard {
    let c = state.piece_at(from).expect("no pawn on from-square").color;
    let mut bb = Bitboard::EMPTY;
    for df in [-1, 1] {
        if let Some(to) = sq(row_of(from) + c.forward(), col_of(from) + df) {
            bb.set(to);
        }
    }
    bb
}

pub fn attack_count(state: &BoardState, from: u8) -> u32 {
    attacks(state, from).popcount()
}
