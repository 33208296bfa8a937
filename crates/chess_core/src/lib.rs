pub mod bitboard;
pub mod board;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod pieces;
pub mod time_control;
pub mod tt;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use bitboard::*;
pub use board::*;
pub use fen::{FenError, to_fen};
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use pieces::{MAX_SQUARE_MOVES, Move, MoveList};
pub use time_control::*;
pub use tt::{Entry, SearchMemo, TranspositionTable};
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use std::time::Duration;

// =============================================================================
// Engine trait
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation in thousandths of a pawn, positive favouring White
    pub score: i32,
    /// Deepest completed search depth
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the deadline cut the last iteration short
    pub stopped: bool,
    /// Principal variation starting with `best_move`
    pub line: Vec<Move>,
}

/// Trait that all chess engines implement.
pub trait Engine: Send {
    /// Picks a move for the side to move within `budget` wall-clock time.
    fn search(&mut self, state: &BoardState, budget: Duration) -> SearchResult;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "chess_core"
    }

    /// Reset internal state for a new game (clear hash tables, etc.)
    fn new_game(&mut self) {}
}
