//! Error types for engine construction.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid engine config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type EngineResult<T> = Result<T, EngineError>;
