//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! threads = 4
//! min_depth = 2
//! max_depth = 12
//!
//! [weights]
//! control = 3
//! ```
//!
//! Every field is optional and falls back to [`EngineConfig::default`].

use std::fs;
use std::path::Path;

use chess_core::TranspositionTable;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Analyzer weights. A weight multiplies the analyzer's raw score; material
/// counts pawns, so its weight sets the pawn to 1000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub material: i32,
    pub control: i32,
    pub aggression: i32,
    pub pawn_structure: i32,
    pub piece_square: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material: 1000,
            control: 2,
            aggression: 5,
            pawn_structure: 20,
            piece_square: 10,
        }
    }
}

/// Deepest search a configuration may ask for.
pub const MAX_DEPTH: u8 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads; 0 lets rayon pick one per core.
    pub threads: usize,
    /// Depth searched before the deadline is honoured.
    pub min_depth: u8,
    /// Iterative deepening stops here even with time left.
    pub max_depth: u8,
    /// Slots in an engine-owned transposition table.
    pub table_size: usize,
    /// At or below this many pieces the endgame king table applies.
    pub endgame_pieces: u8,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            min_depth: 2,
            max_depth: 32,
            table_size: TranspositionTable::DEFAULT_SIZE,
            endgame_pieces: 12,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.min_depth == 0 {
            return Err(EngineError::InvalidConfig("min_depth must be at least 1".into()));
        }
        if self.max_depth < self.min_depth {
            return Err(EngineError::InvalidConfig(format!(
                "max_depth {} is below min_depth {}",
                self.max_depth, self.min_depth
            )));
        }
        if self.max_depth > MAX_DEPTH {
            return Err(EngineError::InvalidConfig(format!(
                "max_depth {} is above {MAX_DEPTH}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
