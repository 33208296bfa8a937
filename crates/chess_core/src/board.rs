//! Packed board state.
//!
//! 64 squares are stored as 4-bit nibbles, two per byte, the column parity
//! selecting the nibble. The state is `Copy`: the search hands every branch
//! its own copy and drops it on backtrack.

use std::fmt;
use std::sync::LazyLock;

use crate::bitboard::Bitboard;
use crate::fen::to_fen;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Castle-blocked bit for White's king side (h1 rook).
pub const CASTLE_WHITE_KING: u8 = 1 << 0;
/// Castle-blocked bit for White's queen side (a1 rook).
pub const CASTLE_WHITE_QUEEN: u8 = 1 << 1;
/// Castle-blocked bit for Black's king side (h8 rook).
pub const CASTLE_BLACK_KING: u8 = 1 << 2;
/// Castle-blocked bit for Black's queen side (a8 rook).
pub const CASTLE_BLACK_QUEEN: u8 = 1 << 3;
pub const CASTLE_ALL: u8 = 0x0F;

const EP_COL_MASK: u8 = 0x07;
const EP_BLACK: u8 = 0x08;
const EP_VALID: u8 = 0x10;

const KING_SQ_MASK: u16 = 0x3F;
const KING_PRESENT: [u16; 2] = [1 << 12, 1 << 13];

/// Both castle bits belonging to `color`.
pub fn castle_bits(color: Color) -> u8 {
    match color {
        Color::White => CASTLE_WHITE_KING | CASTLE_WHITE_QUEEN,
        Color::Black => CASTLE_BLACK_KING | CASTLE_BLACK_QUEEN,
    }
}

/// The castle bit guarded by the rook starting on `sq`, if `sq` is a corner.
pub fn corner_castle_bit(sq: u8) -> Option<u8> {
    match sq {
        7 => Some(CASTLE_WHITE_KING),
        0 => Some(CASTLE_WHITE_QUEEN),
        63 => Some(CASTLE_BLACK_KING),
        56 => Some(CASTLE_BLACK_QUEEN),
        _ => None,
    }
}

/// Castling and en-passant flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AdditionalState {
    /// One bit per corner; a set bit means that castle is no longer available.
    pub castle_blocked: u8,
    /// Column, side that just double-pushed, and a valid bit.
    pub en_passant: u8,
}

impl AdditionalState {
    pub fn encode_en_passant(pushed_by: Color, col: u8) -> u8 {
        let side = match pushed_by {
            Color::White => 0,
            Color::Black => EP_BLACK,
        };
        EP_VALID | side | (col & EP_COL_MASK)
    }

    /// The side whose pawn may be captured en passant and its column.
    pub fn en_passant_target(&self) -> Option<(Color, u8)> {
        if self.en_passant & EP_VALID == 0 {
            return None;
        }
        let color = if self.en_passant & EP_BLACK != 0 {
            Color::Black
        } else {
            Color::White
        };
        Some((color, self.en_passant & EP_COL_MASK))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    squares: [u8; 32],
    /// White king square in bits 0-5, Black in 6-11, presence in bits 12-13.
    kings: u16,
    black_to_move: bool,
    piece_count: u8,
    extra: AdditionalState,
    hash: u64,
}

static EMPTY_STATE: LazyLock<BoardState> = LazyLock::new(|| {
    let mut state = BoardState {
        squares: [0xFF; 32],
        kings: 0,
        black_to_move: false,
        piece_count: 0,
        extra: AdditionalState {
            castle_blocked: CASTLE_ALL,
            en_passant: 0,
        },
        hash: 0,
    };
    state.hash = state.compute_hash();
    state
});

static DEFAULT_STATE: LazyLock<BoardState> = LazyLock::new(|| {
    let mut state = *EMPTY_STATE;
    let back = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    for (col, &kind) in back.iter().enumerate() {
        let col = col as u8;
        state.set_piece(0, col, Some(Piece::new(Color::White, kind)));
        state.set_piece(1, col, Some(Piece::new(Color::White, PieceKind::Pawn)));
        state.set_piece(6, col, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        state.set_piece(7, col, Some(Piece::new(Color::Black, kind)));
    }
    state.set_castle_blocked(0);
    state
});

impl BoardState {
    /// The standard opening position.
    pub fn default_state() -> Self {
        *DEFAULT_STATE
    }

    /// No pieces, White to move, every castle blocked.
    pub fn empty_state() -> Self {
        *EMPTY_STATE
    }

    #[inline]
    pub fn nibble_at(&self, sq: u8) -> u8 {
        let byte = self.squares[(sq / 2) as usize];
        if sq % 2 == 0 { byte & 0x0F } else { byte >> 4 }
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        Piece::from_nibble(self.nibble_at(sq))
    }

    pub fn get_piece(&self, row: u8, col: u8) -> Option<Piece> {
        self.piece_at(row * 8 + col)
    }

    pub fn set_piece(&mut self, row: u8, col: u8, piece: Option<Piece>) {
        self.put(row * 8 + col, piece);
    }

    /// Writes a square, keeping the piece count, king cache and hash in step.
    pub fn put(&mut self, sq: u8, piece: Option<Piece>) {
        let nibble = piece.map_or(Piece::EMPTY_NIBBLE, Piece::to_nibble);
        let old = self.nibble_at(sq);
        if old == nibble {
            return;
        }

        self.hash ^= ZOBRIST.piece_key(sq, old);
        self.hash ^= ZOBRIST.piece_key(sq, nibble);

        let idx = (sq / 2) as usize;
        self.squares[idx] = if sq % 2 == 0 {
            (self.squares[idx] & 0xF0) | nibble
        } else {
            (self.squares[idx] & 0x0F) | (nibble << 4)
        };

        if old == Piece::EMPTY_NIBBLE {
            self.piece_count += 1;
        } else if nibble == Piece::EMPTY_NIBBLE {
            self.piece_count -= 1;
        }

        if let Some(prev) = Piece::from_nibble(old)
            && prev.kind == PieceKind::King
            && self.king_position(prev.color) == Some(sq)
        {
            self.kings &= !KING_PRESENT[prev.color.idx()];
        }
        if let Some(pc) = piece
            && pc.kind == PieceKind::King
        {
            let shift = 6 * pc.color.idx() as u16;
            self.kings &= !(KING_SQ_MASK << shift);
            self.kings |= ((sq as u16) << shift) | KING_PRESENT[pc.color.idx()];
        }
    }

    pub fn to_move(&self) -> Color {
        if self.black_to_move {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn set_to_move(&mut self, color: Color) {
        if self.to_move() != color {
            self.hash ^= ZOBRIST.side_to_move;
            self.black_to_move = color == Color::Black;
        }
    }

    pub fn king_position(&self, color: Color) -> Option<u8> {
        if self.kings & KING_PRESENT[color.idx()] == 0 {
            return None;
        }
        Some(((self.kings >> (6 * color.idx())) & KING_SQ_MASK) as u8)
    }

    pub fn piece_count(&self) -> u8 {
        self.piece_count
    }

    pub fn additional(&self) -> AdditionalState {
        self.extra
    }

    pub fn castle_blocked(&self) -> u8 {
        self.extra.castle_blocked
    }

    /// True when every bit in `mask` is blocked.
    pub fn is_castle_blocked(&self, mask: u8) -> bool {
        (self.extra.castle_blocked & mask) == mask
    }

    pub fn set_castle_blocked(&mut self, blocked: u8) {
        let blocked = blocked & CASTLE_ALL;
        self.hash ^= ZOBRIST.castle_key(self.extra.castle_blocked);
        self.extra.castle_blocked = blocked;
        self.hash ^= ZOBRIST.castle_key(blocked);
    }

    pub fn block_castle(&mut self, mask: u8) {
        self.set_castle_blocked(self.extra.castle_blocked | mask);
    }

    pub fn en_passant(&self) -> u8 {
        self.extra.en_passant
    }

    pub fn set_en_passant(&mut self, en_passant: u8) {
        self.hash ^= ZOBRIST.ep_key(self.extra.en_passant);
        self.extra.en_passant = en_passant;
        self.hash ^= ZOBRIST.ep_key(en_passant);
    }

    pub fn clear_en_passant(&mut self) {
        self.set_en_passant(0);
    }

    pub fn en_passant_target(&self) -> Option<(Color, u8)> {
        self.extra.en_passant_target()
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recomputes the hash from every field. Only construction and tests need this.
    pub fn compute_hash(&self) -> u64 {
        let mut h = 0u64;
        for sq in 0..64u8 {
            h ^= ZOBRIST.piece_key(sq, self.nibble_at(sq));
        }
        if self.black_to_move {
            h ^= ZOBRIST.side_to_move;
        }
        h ^= ZOBRIST.castle_key(self.extra.castle_blocked);
        h ^= ZOBRIST.ep_key(self.extra.en_passant);
        h
    }

    /// Squares holding a piece of `color`, ascending.
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for sq in 0..64u8 {
            if let Some(pc) = self.piece_at(sq)
                && pc.color == color
            {
                bb.set(sq);
            }
        }
        bb
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::default_state()
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("fen", &to_fen(self))
            .field("pieces", &self.piece_count)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
