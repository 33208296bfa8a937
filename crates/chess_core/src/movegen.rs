//! Legal move filtering and game-state queries.
//!
//! Attack maps and check status are memoized per position in the
//! transposition table; pass [`TranspositionTable::disabled`] to compute
//! everything from scratch.

use crate::bitboard::Bitboard;
use crate::board::BoardState;
use crate::pieces::{self, Move, MoveList};
use crate::tt::TranspositionTable;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Draw,
    Winner(Color),
}

/// Union of every square attacked by `color`'s pieces.
pub fn attack_matrix(tt: &TranspositionTable, state: &BoardState, color: Color) -> Bitboard {
    let entry = tt.lookup(state.hash());
    if let Some(bb) = entry.attacks(color) {
        return bb;
    }
    let mut bb = Bitboard::EMPTY;
    for from in state.occupied_by(color) {
        bb |= pieces::attacks(state, from);
    }
    entry.store_attacks(color, bb);
    bb
}

/// Whether `color`'s king stands on a square the opponent attacks.
/// A side without a king is never in check.
pub fn is_checked(tt: &TranspositionTable, state: &BoardState, color: Color) -> bool {
    let Some(king) = state.king_position(color) else {
        return false;
    };
    let entry = tt.lookup(state.hash());
    if let Some(checked) = entry.is_checked(color) {
        return checked;
    }
    let checked = attack_matrix(tt, state, color.other()).contains(king);
    entry.store_checked(color, checked);
    checked
}

/// Legal moves of the piece on (`row`, `col`). Only the side to move has
/// legal moves; promotions are expanded into all four pieces.
pub fn legal_moves(tt: &TranspositionTable, state: &BoardState, row: u8, col: u8) -> MoveList {
    match sq(row as i8, col as i8) {
        Some(from) => legal_moves_from(tt, state, from),
        None => MoveList::new(),
    }
}

pub fn legal_moves_from(tt: &TranspositionTable, state: &BoardState, from: u8) -> MoveList {
    let mover = state.to_move();
    match state.piece_at(from) {
        Some(pc) if pc.color == mover => {}
        _ => return MoveList::new(),
    }
    let mut out = pieces::moves(tt, state, from, true);
    out.retain(|mv| !is_checked(tt, &mv.state, mover));
    out
}

/// Every legal move of the side to move, squares walked in row-major order.
pub fn all_legal_moves(tt: &TranspositionTable, state: &BoardState) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for from in state.occupied_by(state.to_move()) {
        out.extend(legal_moves_from(tt, state, from));
    }
    out
}

pub fn has_legal_move(tt: &TranspositionTable, state: &BoardState) -> bool {
    state
        .occupied_by(state.to_move())
        .any(|from| !legal_moves_from(tt, state, from).is_empty())
}

/// `None` while the side to move still has a legal move.
pub fn game_result(tt: &TranspositionTable, state: &BoardState) -> Option<GameResult> {
    if has_legal_move(tt, state) {
        return None;
    }
    let mover = state.to_move();
    if is_checked(tt, state, mover) {
        Some(GameResult::Winner(mover.other()))
    } else {
        Some(GameResult::Draw)
    }
}

/// Replaces the pawn on `square` with `kind` of the same colour.
///
/// # Panics
/// Panics when `square` holds no pawn or `kind` is not a promotion piece.
pub fn promote(state: &BoardState, square: u8, kind: PieceKind) -> BoardState {
    let pawn = state
        .piece_at(square)
        .expect("promote: no piece on square");
    assert_eq!(pawn.kind, PieceKind::Pawn, "promote: piece is not a pawn");
    assert!(
        PieceKind::PROMOTIONS.contains(&kind),
        "promote: cannot promote to {kind:?}"
    );
    let mut next = *state;
    next.put(square, Some(Piece::new(pawn.color, kind)));
    next
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
