//! Per-piece move rules.
//!
//! Each piece module produces candidate moves (not yet filtered for leaving
//! the own king in check) and the set of squares the piece attacks. A
//! candidate already carries the board state it produces.

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use smallvec::SmallVec;

use crate::bitboard::Bitboard;
use crate::board::{BoardState, castle_bits, corner_castle_bit};
use crate::tt::TranspositionTable;
use crate::types::*;

/// Most moves a single piece can have (a queen in the centre).
pub const MAX_SQUARE_MOVES: usize = 28;

pub type MoveList = SmallVec<[Move; MAX_SQUARE_MOVES]>;

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    /// Square of the captured piece; differs from `to` for en passant.
    pub captured: Option<u8>,
    /// Position after the move, with the turn handed over.
    pub state: BoardState,
    pub is_castle: bool,
    pub is_promotion: bool,
}

impl Move {
    /// Kind of the piece standing on the destination afterwards, so a
    /// promotion reports the chosen piece.
    pub fn kind(&self) -> PieceKind {
        self.state
            .piece_at(self.to)
            .expect("move destination holds no piece")
            .kind
    }

    /// Chosen promotion piece, if this move promoted.
    pub fn promotion(&self) -> Option<PieceKind> {
        if !self.is_promotion {
            return None;
        }
        match self.kind() {
            PieceKind::Pawn => None,
            kind => Some(kind),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Candidate moves for the piece on `sq`. Empty squares yield nothing.
pub fn moves(tt: &TranspositionTable, state: &BoardState, sq: u8, auto_promote: bool) -> MoveList {
    let Some(pc) = state.piece_at(sq) else {
        return MoveList::new();
    };
    match pc.kind {
        PieceKind::Pawn => pawn::moves(state, sq, auto_promote),
        PieceKind::Knight => knight::moves(state, sq),
        PieceKind::Bishop => bishop::moves(state, sq),
        PieceKind::Rook => rook::moves(state, sq),
        PieceKind::Queen => queen::moves(state, sq),
        PieceKind::King => king::moves(tt, state, sq),
    }
}

/// Squares attacked by the piece on `sq`.
pub fn attacks(state: &BoardState, sq: u8) -> Bitboard {
    let Some(pc) = state.piece_at(sq) else {
        return Bitboard::EMPTY;
    };
    match pc.kind {
        PieceKind::Pawn => pawn::attacks(state, sq),
        PieceKind::Knight => knight::attacks(state, sq),
        PieceKind::Bishop => bishop::attacks(state, sq),
        PieceKind::Rook => rook::attacks(state, sq),
        PieceKind::Queen => queen::attacks(state, sq),
        PieceKind::King => king::attacks(state, sq),
    }
}

pub fn attack_count(state: &BoardState, sq: u8) -> u32 {
    let Some(pc) = state.piece_at(sq) else {
        return 0;
    };
    match pc.kind {
        PieceKind::Pawn => pawn::attack_count(state, sq),
        PieceKind::Knight => knight::attack_count(state, sq),
        PieceKind::Bishop => bishop::attack_count(state, sq),
        PieceKind::Rook => rook::attack_count(state, sq),
        PieceKind::Queen => queen::attack_count(state, sq),
        PieceKind::King => king::attack_count(state, sq),
    }
}

/// Moves the piece on `from` to `to` and hands the turn to the opponent.
///
/// Blocks castle rights touched by the move (king moves, rooks leaving or
/// being captured on a corner) and clears en-passant eligibility. Double
/// pushes, en-passant removal, promotion and the castling rook are applied
/// by the piece rules on the returned state.
pub(crate) fn transition(state: &BoardState, from: u8, to: u8) -> BoardState {
    let piece = state
        .piece_at(from)
        .expect("no piece on from-square");
    let mut next = *state;
    next.put(from, None);
    next.put(to, Some(piece));

    let mut blocked = 0;
    if piece.kind == PieceKind::King {
        blocked |= castle_bits(piece.color);
    }
    blocked |= corner_castle_bit(from).unwrap_or(0);
    blocked |= corner_castle_bit(to).unwrap_or(0);
    if blocked != 0 {
        next.block_castle(blocked);
    }

    next.clear_en_passant();
    next.set_to_move(piece.color.other());
    next
}

/// Builds the move to `to` unless a friendly piece stands there.
pub(crate) fn step_to(state: &BoardState, from: u8, color: Color, to: u8) -> Option<Move> {
    let captured = match state.piece_at(to) {
        Some(pc) if pc.color == color => return None,
        Some(_) => Some(to),
        None => None,
    };
    Some(Move {
        from,
        to,
        captured,
        state: transition(state, from, to),
        is_castle: false,
        is_promotion: false,
    })
}

pub(crate) fn leaper_moves(state: &BoardState, from: u8, offsets: &[(i8, i8)]) -> MoveList {
    let color = state.piece_at(from).expect("no piece on from-square").color;
    let (r, c) = (row_of(from), col_of(from));
    offsets
        .iter()
        .filter_map(|(dr, dc)| sq(r + dr, c + dc))
        .filter_map(|to| step_to(state, from, color, to))
        .collect()
}

pub(crate) fn leaper_attacks(from: u8, offsets: &[(i8, i8)]) -> Bitboard {
    let (r, c) = (row_of(from), col_of(from));
    let mut bb = Bitboard::EMPTY;
    for (dr, dc) in offsets {
        if let Some(to) = sq(r + dr, c + dc) {
            bb.set(to);
        }
    }
    bb
}

/// Walks each direction up to 7 steps, stopping on the first occupied square
/// (kept when it holds an enemy).
pub(crate) fn slider_moves(state: &BoardState, from: u8, dirs: &[(i8, i8)]) -> MoveList {
    let color = state.piece_at(from).expect("no piece on from-square").color;
    let mut out = MoveList::new();
    for (dr, dc) in dirs {
        let mut r = row_of(from) + dr;
        let mut c = col_of(from) + dc;
        while let Some(to) = sq(r, c) {
            let occupied = state.piece_at(to).is_some();
            if let Some(mv) = step_to(state, from, color, to) {
                out.push(mv);
            }
            if occupied {
                break;
            }
            r += dr;
            c += dc;
        }
    }
    out
}

/// Like [`slider_moves`] but keeps the first blocker whatever its colour.
pub(crate) fn slider_attacks(state: &BoardState, from: u8, dirs: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for (dr, dc) in dirs {
        let mut r = row_of(from) + dr;
        let mut c = col_of(from) + dc;
        while let Some(to) = sq(r, c) {
            bb.set(to);
            if state.piece_at(to).is_some() {
                break;
            }
            r += dr;
            c += dc;
        }
    }
    bb
}
