//! Classical Chess Engine
//!
//! Weighted analyzer evaluation driven by a parallel alpha-beta search with
//! iterative deepening. Root moves are split across a rayon pool and share
//! one lock-free transposition table.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod eval;
pub mod parallel;
pub mod score;
pub mod search;

use std::time::Duration;

use chess_core::{BoardState, Engine, SearchResult, TimeControl, TranspositionTable, move_to_uci};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

pub use config::{EngineConfig, EvalWeights, MAX_DEPTH};
pub use error::{EngineError, EngineResult};
pub use eval::Evaluator;
pub use parallel::{DeepeningLimits, RootResult, SearchContext, parallel_search, serial_search};
pub use score::{CHECKMATE, CHECKMATE_WEIGHTING, INFINITY, is_mate_score, plies_to_mate};

enum Table {
    /// The process-wide table; engines sharing it must share a config.
    Global,
    Owned(Box<TranspositionTable>),
}

impl Table {
    fn get(&self) -> &TranspositionTable {
        match self {
            Table::Global => TranspositionTable::global(),
            Table::Owned(table) => table,
        }
    }
}

/// Classical chess engine.
///
/// Evaluations are memoized in the transposition table, so a table must
/// only ever see one set of weights.
pub struct ClassicalEngine {
    config: EngineConfig,
    table: Table,
    pool: ThreadPool,
    evaluator: Evaluator,
}

impl ClassicalEngine {
    /// Engine with its own table of `config.table_size` slots.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let table = Table::Owned(Box::new(TranspositionTable::new(config.table_size)));
        Self::with_table(config, table)
    }

    /// Engine backed by the process-wide table.
    pub fn shared(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Self::with_table(config, Table::Global)
    }

    fn with_table(config: EngineConfig, table: Table) -> EngineResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("classical-search-{i}"))
            .build()?;
        debug!(
            threads = pool.current_num_threads(),
            slots = table.get().len(),
            "classical engine ready"
        );
        Ok(Self {
            evaluator: Evaluator::new(&config),
            config,
            table,
            pool,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        self.table.get()
    }

    /// Static evaluation of `state`, from White's side.
    pub fn evaluate(&self, state: &BoardState) -> i32 {
        self.evaluator.evaluate(self.table.get(), state)
    }

    /// Picks a move for the side to move.
    ///
    /// Depths up to `min_depth` always complete. After that the search keeps
    /// deepening until `budget` runs out or `max_depth` is reached.
    /// `best_move` is `None` only when the side to move has no legal move.
    pub fn start_search(&self, state: &BoardState, budget: Duration) -> SearchResult {
        let tc = TimeControl::new(Some(budget));
        let ctx = SearchContext {
            pool: &self.pool,
            tt: self.table.get(),
            evaluator: &self.evaluator,
        };
        let limits = DeepeningLimits {
            min_depth: self.config.min_depth,
            max_depth: self.config.max_depth,
        };

        let Some(outcome) = parallel::start_search(ctx, state, limits, &tc) else {
            debug!("no legal moves");
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
                line: Vec::new(),
            };
        };

        let result = outcome.result;
        info!(
            best = %move_to_uci(&result.best_move),
            score = result.score,
            depth = outcome.completed_depth,
            nodes = outcome.nodes,
            elapsed_ms = tc.elapsed().as_millis() as u64,
            "search finished"
        );
        SearchResult {
            best_move: Some(result.best_move),
            score: result.score,
            depth: outcome.completed_depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
            line: result.line,
        }
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, state: &BoardState, budget: Duration) -> SearchResult {
        self.start_search(state, budget)
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }

    fn author(&self) -> &str {
        "ML-chess"
    }

    fn new_game(&mut self) {
        self.table.get().clear();
    }
}
