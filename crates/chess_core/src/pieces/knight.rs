use super::{MoveList, leaper_attacks, leaper_moves};
use crate::bitboard::Bitboard;
use crate::board::BoardState;

const OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub fn moves(state: &BoardState, from: u8) -> MoveList {
    leaper_moves(state, from, &OFFSETS)
}

pub fn attacks(_state: &BoardState, from: u8) -> Bitboard {
    leaper_attacks(from, &OFFSETS)
}

pub fn attack_count(state: &BoardState, from: u8) -> u32 {
    attacks(state, from).popcount()
}
