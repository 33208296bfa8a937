//! Score scale shared by evaluation and search.
//!
//! Positive favours White. One pawn is worth 1000. Mates sit far above any
//! static evaluation: a side mated `p` plies below the search root scores
//! `-(CHECKMATE - p)` from its own side, so faster mates compare higher for
//! the winner.

use chess_core::Color;

/// Sentinel magnitude of a checkmate.
pub const CHECKMATE: i32 = 100_000_000;

/// Anything beyond this magnitude is a mate score.
pub const CHECKMATE_WEIGHTING: i32 = 50_000_000;

/// Window bound wider than any score.
pub const INFINITY: i32 = 2 * CHECKMATE;

pub fn is_mate_score(value: i32) -> bool {
    value.abs() > CHECKMATE_WEIGHTING
}

/// Plies from the search root to the mate, for mate scores.
pub fn plies_to_mate(value: i32) -> Option<u32> {
    is_mate_score(value).then(|| (CHECKMATE - value.abs()) as u32)
}

/// Rebases a static mate sentinel onto the ply it was found at.
pub(crate) fn mate_at(sentinel: i32, ply: u8) -> i32 {
    let magnitude = CHECKMATE - ply as i32;
    if sentinel > 0 { magnitude } else { -magnitude }
}

/// Keeps a positional score clear of the mate band.
pub(crate) fn clamp_eval(value: i32) -> i32 {
    value.clamp(-(CHECKMATE_WEIGHTING - 1), CHECKMATE_WEIGHTING - 1)
}

/// Whether `a` is strictly better than `b` for `mover`.
pub fn better_for(mover: Color, a: i32, b: i32) -> bool {
    match mover {
        Color::White => a > b,
        Color::Black => a < b,
    }
}
