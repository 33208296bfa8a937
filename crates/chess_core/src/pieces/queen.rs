use super::{DIAGONAL, MoveList, ORTHOGONAL, slider_attacks, slider_moves};
use crate::bitboard::Bitboard;
use crate::board::BoardState;

const DIRECTIONS: [(i8, i8); 8] = [
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

pub fn moves(state: &BoardState, from: u8) -> MoveList {
    slider_moves(state, from, &DIRECTIONS)
}

pub fn attacks(state: &BoardState, from: u8) -> Bitboard {
    slider_attacks(state, from, &DIRECTIONS)
}

pub fn attack_count(state: &BoardState, from: u8) -> u32 {
    attacks(state, from).popcount()
}
