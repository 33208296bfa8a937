//! Forsyth-Edwards Notation codec.
//!
//! The half-move clock is required and the full-move number optional; both
//! are validated but not stored, and [`to_fen`] emits them as zeros.

use thiserror::Error;

use crate::board::{
    AdditionalState, BoardState, CASTLE_ALL, CASTLE_BLACK_KING, CASTLE_BLACK_QUEEN,
    CASTLE_WHITE_KING, CASTLE_WHITE_QUEEN,
};
use crate::types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> FenError {
    FenError::InvalidFormat {
        field,
        reason: reason.into(),
    }
}

const CASTLE_CHARS: [(char, u8); 4] = [
    ('K', CASTLE_WHITE_KING),
    ('Q', CASTLE_WHITE_QUEEN),
    ('k', CASTLE_BLACK_KING),
    ('q', CASTLE_BLACK_QUEEN),
];

const COUNTER_FIELDS: [&str; 2] = ["half-move clock", "full-move number"];

pub fn parse(fen: &str) -> Result<BoardState, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 5 || parts.len() > 6 {
        return Err(invalid(
            "layout",
            format!("expected 5 or 6 fields, found {}", parts.len()),
        ));
    }

    let mut state = BoardState::empty_state();
    parse_placement(&mut state, parts[0])?;

    let side = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(invalid("side to move", format!("`{other}`"))),
    };
    state.set_to_move(side);

    state.set_castle_blocked(parse_castling(parts[2])?);

    if parts[3] != "-" {
        let target =
            coord_to_sq(parts[3]).ok_or_else(|| invalid("en passant", format!("`{}`", parts[3])))?;
        // The target sits behind the pawn that just made the double push.
        let pushed_by = match row_of(target) {
            2 => Color::White,
            5 => Color::Black,
            _ => return Err(invalid("en passant", format!("`{}` is not on row 3 or 6", parts[3]))),
        };
        state.set_en_passant(AdditionalState::encode_en_passant(
            pushed_by,
            col_of(target) as u8,
        ));
    }

    for (field, text) in COUNTER_FIELDS.into_iter().zip(&parts[4..]) {
        text.parse::<u32>()
            .map_err(|_| invalid(field, format!("`{text}` is not a number")))?;
    }

    Ok(state)
}

fn parse_placement(state: &mut BoardState, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(
            "placement",
            format!("expected 8 ranks, found {}", ranks.len()),
        ));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut col: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 || d > 8 {
                    return Err(invalid("placement", format!("bad empty count `{ch}`")));
                }
                col += d as u8;
            } else {
                let piece = Piece::from_char(ch)
                    .ok_or_else(|| invalid("placement", format!("bad piece `{ch}`")))?;
                if col >= 8 {
                    return Err(invalid("placement", format!("rank {} is too long", 8 - rank_idx)));
                }
                state.set_piece(row, col, Some(piece));
                col += 1;
            }
            if col > 8 {
                return Err(invalid("placement", format!("rank {} is too long", 8 - rank_idx)));
            }
        }
        if col != 8 {
            return Err(invalid("placement", format!("rank {} is too short", 8 - rank_idx)));
        }
    }
    Ok(())
}

/// Returns the castle-blocked byte for an availability field.
fn parse_castling(field: &str) -> Result<u8, FenError> {
    if field == "-" {
        return Ok(CASTLE_ALL);
    }
    let mut blocked = CASTLE_ALL;
    for ch in field.chars() {
        let (_, bit) = CASTLE_CHARS
            .iter()
            .find(|(c, _)| *c == ch)
            .ok_or_else(|| invalid("castling", format!("bad right `{ch}`")))?;
        blocked &= !bit;
    }
    Ok(blocked)
}

pub fn to_fen(state: &BoardState) -> String {
    let mut out = String::with_capacity(90);

    for row in (0..8u8).rev() {
        let mut empty = 0;
        for col in 0..8u8 {
            match state.get_piece(row, col) {
                Some(pc) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(pc.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if row > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match state.to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights: String = CASTLE_CHARS
        .iter()
        .filter(|(_, bit)| !state.is_castle_blocked(*bit))
        .map(|(c, _)| *c)
        .collect();
    if rights.is_empty() {
        out.push('-');
    } else {
        out.push_str(&rights);
    }

    out.push(' ');
    match state.en_passant_target() {
        Some((pushed_by, col)) => {
            let row = match pushed_by {
                Color::White => 2,
                Color::Black => 5,
            };
            out.push_str(&sq_to_coord(row * 8 + col));
        }
        None => out.push('-'),
    }

    out.push_str(" 0 0");
    out
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
