//! Zobrist hashing for packed board states.
//!
//! Every mutation of a [`BoardState`](crate::BoardState) XORs the hash with the
//! key of the old value and the key of the new value, so the hash always
//! matches the position without ever being recomputed after construction.
//!
//! Keys exist for:
//! - Each piece nibble on each square (12 nibbles × 64 squares; empty is 0)
//! - Side to move (XOR when Black is to move)
//! - Every value of the castle-blocked byte (256 values)
//! - Every value of the en-passant byte (256 values)

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Pre-computed random values for Zobrist hashing.
/// Generated from a fixed seed so hashes are reproducible within a build.
pub struct ZobristKeys {
    /// Indexed by [square][nibble]. Nibble 12..=15 keys are zero.
    pub pieces: [[u64; 16]; 64],
    /// Random value for black to move
    pub side_to_move: u64,
    /// Indexed by the castle-blocked byte
    pub castle: [u64; 256],
    /// Indexed by the en-passant byte
    pub en_passant: [u64; 256],
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut pieces = [[0u64; 16]; 64];
        for square in pieces.iter_mut() {
            for key in square.iter_mut().take(12) {
                *key = rng.r#gen();
            }
        }

        let side_to_move = rng.r#gen();

        let mut castle = [0u64; 256];
        for key in castle.iter_mut() {
            *key = rng.r#gen();
        }

        let mut en_passant = [0u64; 256];
        for key in en_passant.iter_mut() {
            *key = rng.r#gen();
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castle,
            en_passant,
        }
    }

    /// Get the Zobrist key for a nibble on a square.
    #[inline(always)]
    pub fn piece_key(&self, sq: u8, nibble: u8) -> u64 {
        self.pieces[sq as usize][(nibble & 0x0F) as usize]
    }

    #[inline(always)]
    pub fn castle_key(&self, blocked: u8) -> u64 {
        self.castle[blocked as usize]
    }

    #[inline(always)]
    pub fn ep_key(&self, en_passant: u8) -> u64 {
        self.en_passant[en_passant as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide keys, built on first use and read-only afterwards.
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
