//! Weighted static evaluation.

use chess_core::{BoardState, TranspositionTable};

use crate::analyzers::{Aggression, Analyzer, Control, Material, PawnStructure, PieceSquare, Win};
use crate::config::EngineConfig;
use crate::score::clamp_eval;

/// Sums the analyzers and memoizes the result per position.
pub struct Evaluator {
    win: Win,
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Evaluator {
    pub fn new(config: &EngineConfig) -> Self {
        let w = &config.weights;
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(Material { weight: w.material }),
            Box::new(Control { weight: w.control }),
            Box::new(Aggression {
                weight: w.aggression,
            }),
            Box::new(PawnStructure {
                weight: w.pawn_structure,
            }),
            Box::new(PieceSquare {
                weight: w.piece_square,
                endgame_pieces: config.endgame_pieces,
            }),
        ];
        Self {
            win: Win,
            analyzers,
        }
    }

    /// Score from White's side: the checkmate sentinel if the side to move
    /// is mated, otherwise the weighted analyzer sum kept inside the mate band.
    pub fn evaluate(&self, tt: &TranspositionTable, state: &BoardState) -> i32 {
        let entry = tt.lookup(state.hash());
        if let Some(value) = entry.static_eval() {
            return value;
        }

        let sentinel = self.win.sentinel(tt, state);
        let value = if sentinel != 0 {
            sentinel
        } else {
            let total: f32 = self
                .analyzers
                .iter()
                .map(|a| a.score(tt, state) * a.weight() as f32)
                .sum();
            clamp_eval(total.round() as i32)
        };
        entry.store_static_eval(value);
        value
    }

    /// Per-analyzer weighted contributions, for diagnostics.
    pub fn breakdown(&self, tt: &TranspositionTable, state: &BoardState) -> Vec<(&'static str, f32)> {
        self.analyzers
            .iter()
            .map(|a| (a.name(), a.score(tt, state) * a.weight() as f32))
            .collect()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
