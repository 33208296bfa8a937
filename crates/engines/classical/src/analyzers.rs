//! Independent scoring modules summed by the evaluator.
//!
//! Every analyzer scores from White's side: it computes the same quantity for
//! both colours and returns White's total minus Black's. Raw scores are kept
//! in exact integer units and scaled once at the end, so a colour-mirrored
//! position scores exactly the negation.

use chess_core::{
    Bitboard, BoardState, Color, Piece, PieceKind, TranspositionTable, attack_matrix, col_of,
    has_legal_move, is_checked, row_of,
};

use crate::score::CHECKMATE;

pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Raw score, positive favouring White.
    fn score(&self, tt: &TranspositionTable, state: &BoardState) -> f32;

    fn weight(&self) -> i32;
}

fn pieces(state: &BoardState, color: Color) -> impl Iterator<Item = (u8, Piece)> + '_ {
    state
        .occupied_by(color)
        .filter_map(move |sq| state.piece_at(sq).map(|pc| (sq, pc)))
}

/// Distance to the board edge: 0 on the rim, 3 on the four centre squares.
fn ring(sq: u8) -> i32 {
    let (r, c) = (row_of(sq) as i32, col_of(sq) as i32);
    r.min(7 - r).min(c).min(7 - c)
}

/// Pawn counts, weighted by the material weight.
pub struct Material {
    pub weight: i32,
}

impl Analyzer for Material {
    fn name(&self) -> &'static str {
        "material"
    }

    fn score(&self, _tt: &TranspositionTable, state: &BoardState) -> f32 {
        let side = |color| -> i32 {
            pieces(state, color)
                .map(|(_, pc)| pc.kind.material() as i32)
                .sum()
        };
        (side(Color::White) - side(Color::Black)) as f32
    }

    fn weight(&self) -> i32 {
        self.weight
    }
}

/// Checkmate detection. Not weighted; the evaluator returns its sentinel
/// directly and skips the other analyzers.
pub struct Win;

impl Win {
    /// `-CHECKMATE` when White is mated, `CHECKMATE` when Black is, else 0.
    pub fn sentinel(&self, tt: &TranspositionTable, state: &BoardState) -> i32 {
        let mover = state.to_move();
        if !is_checked(tt, state, mover) || has_legal_move(tt, state) {
            return 0;
        }
        match mover {
            Color::White => -CHECKMATE,
            Color::Black => CHECKMATE,
        }
    }
}

/// Attacked squares, worth more near the centre and when they hold
/// material, and half again when the opponent also attacks them.
pub struct Control {
    pub weight: i32,
}

impl Control {
    fn side(state: &BoardState, own: Bitboard, enemy: Bitboard) -> i32 {
        own.map(|sq| {
            let material = state.piece_at(sq).map_or(0, |pc| pc.kind.material() as i32);
            let contested = if enemy.contains(sq) { 3 } else { 2 };
            (ring(sq) + 1) * (material + 1) * contested
        })
        .sum()
    }
}

impl Analyzer for Control {
    fn name(&self) -> &'static str {
        "control"
    }

    fn score(&self, tt: &TranspositionTable, state: &BoardState) -> f32 {
        let white = attack_matrix(tt, state, Color::White);
        let black = attack_matrix(tt, state, Color::Black);
        // ring + 1 runs 1..=4 and contested is 2 or 3: a quiet centre square is 1.0.
        (Self::side(state, white, black) - Self::side(state, black, white)) as f32 / 8.0
    }

    fn weight(&self) -> i32 {
        self.weight
    }
}

/// Pieces close to the enemy king.
pub struct Aggression {
    pub weight: i32,
}

impl Aggression {
    fn side(state: &BoardState, color: Color) -> i32 {
        let Some(king) = state.king_position(color.other()) else {
            return 0;
        };
        pieces(state, color)
            .filter(|(_, pc)| pc.kind != PieceKind::King)
            .map(|(sq, _)| {
                let dr = (row_of(sq) - row_of(king)).abs() as i32;
                let dc = (col_of(sq) - col_of(king)).abs() as i32;
                7 - dr.max(dc)
            })
            .sum()
    }
}

impl Analyzer for Aggression {
    fn name(&self) -> &'static str {
        "aggression"
    }

    fn score(&self, _tt: &TranspositionTable, state: &BoardState) -> f32 {
        (Self::side(state, Color::White) - Self::side(state, Color::Black)) as f32 / 7.0
    }

    fn weight(&self) -> i32 {
        self.weight
    }
}

/// Pawn advancement and central files, doubled when the pawn is defended and
/// halved when it is attacked.
pub struct PawnStructure {
    pub weight: i32,
}

impl PawnStructure {
    fn side(tt: &TranspositionTable, state: &BoardState, color: Color) -> i32 {
        let own = attack_matrix(tt, state, color);
        let enemy = attack_matrix(tt, state, color.other());
        pieces(state, color)
            .filter(|(_, pc)| pc.kind == PieceKind::Pawn)
            .map(|(sq, _)| {
                let advance = match color {
                    Color::White => row_of(sq) as i32 - 1,
                    Color::Black => 6 - row_of(sq) as i32,
                };
                let central = match col_of(sq) {
                    3 | 4 => 2,
                    2 | 5 => 1,
                    _ => 0,
                };
                let defended = if own.contains(sq) { 2 } else { 1 };
                let safe = if enemy.contains(sq) { 1 } else { 2 };
                (advance + central) * defended * safe
            })
            .sum()
    }
}

impl Analyzer for PawnStructure {
    fn name(&self) -> &'static str {
        "pawn_structure"
    }

    fn score(&self, tt: &TranspositionTable, state: &BoardState) -> f32 {
        // Units are quarters: base 0.5 per step, x2 defended, x0.5 attacked.
        (Self::side(tt, state, Color::White) - Self::side(tt, state, Color::Black)) as f32 / 4.0
    }

    fn weight(&self) -> i32 {
        self.weight
    }
}

/// Piece-square tables in centipawns, from White's perspective.
/// Index is `row * 8 + col`, row 0 being White's back rank.
#[rustfmt::skip]
const PAWN_PST: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i16; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i16; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i16; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i16; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  5,  5,  5,  5,  5,  0,-10,
     0,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
   -10,  0,  5,  5,  5,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_PST_MIDDLEGAME: [i16; 64] = [
    20, 30, 10,  0,  0, 10, 30, 20,
    20, 20,  0,  0,  0,  0, 20, 20,
   -10,-20,-20,-20,-20,-20,-20,-10,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
const KING_PST_ENDGAME: [i16; 64] = [
   -50,-30,-30,-30,-30,-30,-30,-50,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -50,-40,-30,-20,-20,-30,-40,-50,
];

pub struct PieceSquare {
    pub weight: i32,
    /// Total piece count at or below which the endgame king table applies.
    pub endgame_pieces: u8,
}

impl PieceSquare {
    fn table(&self, kind: PieceKind, endgame: bool) -> &'static [i16; 64] {
        match kind {
            PieceKind::Pawn => &PAWN_PST,
            PieceKind::Knight => &KNIGHT_PST,
            PieceKind::Bishop => &BISHOP_PST,
            PieceKind::Rook => &ROOK_PST,
            PieceKind::Queen => &QUEEN_PST,
            PieceKind::King if endgame => &KING_PST_ENDGAME,
            PieceKind::King => &KING_PST_MIDDLEGAME,
        }
    }

    fn side(&self, state: &BoardState, color: Color, endgame: bool) -> i32 {
        pieces(state, color)
            .map(|(sq, pc)| {
                // Black reads the table with ranks flipped.
                let idx = match color {
                    Color::White => sq,
                    Color::Black => sq ^ 56,
                };
                self.table(pc.kind, endgame)[idx as usize] as i32
            })
            .sum()
    }
}

impl Analyzer for PieceSquare {
    fn name(&self) -> &'static str {
        "piece_square"
    }

    fn score(&self, _tt: &TranspositionTable, state: &BoardState) -> f32 {
        let endgame = state.piece_count() <= self.endgame_pieces;
        // Centipawns; a weight of 10 puts them on the pawn = 1000 scale.
        (self.side(state, Color::White, endgame) - self.side(state, Color::Black, endgame)) as f32
    }

    fn weight(&self) -> i32 {
        self.weight
    }
}

#[cfg(test)]
#[path = "analyzers_tests.rs"]
mod analyzers_tests;
