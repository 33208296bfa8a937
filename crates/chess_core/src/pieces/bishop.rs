use super::{DIAGONAL, MoveList, slider_attacks, slider_moves};
use crate::bitboard::Bitboard;
use crate::board::BoardState;

pub fn moves(state: &BoardState, from: u8) -> MoveList {
    slider_moves(state, from, &DIAGONAL)
}

pub fn attacks(state: &BoardState, from: u8) -> Bitboard {
    slider_attacks(state, from, &DIAGONAL)
}

pub fn attack_count(state: &BoardState, from: u8) -> u32 {
    attacks(state, from).popcount()
}
