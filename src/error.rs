//! Error types for surfrank.

use std::path::PathBuf;

use rand::distributions::WeightedError;
use thiserror::Error;

/// Result type alias using [`RankError`].
pub type Result<T> = std::result::Result<T, RankError>;

/// Everything that can go wrong while building a link graph or ranking it.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("link graph has no pages")]
    EmptyGraph,

    #[error("sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    #[error("damping factor must lie in [0, 1], got {0}")]
    InvalidDampingFactor(f64),

    #[error("convergence tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    #[error("iteration cap must be at least 1, got {0}")]
    InvalidIterationCap(usize),

    #[error("initial ranks must be finite, non-negative and carry some mass")]
    InvalidInitialRanks,

    #[error("page not found in link graph: {0}")]
    UnknownPage(String),

    #[error("page {page} links to {target}, which is not a page of the corpus")]
    Integrity { page: String, target: String },

    #[error("no convergence after {iterations} iterations (last max change {delta:e})")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid transition weights: {0}")]
    Sampling(#[from] WeightedError),
}

impl RankError {
    /// True for errors caused by invalid inputs or options, raised before
    /// any computation starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RankError::EmptyGraph
                | RankError::InvalidSampleCount(_)
                | RankError::InvalidDampingFactor(_)
                | RankError::InvalidTolerance(_)
                | RankError::InvalidIterationCap(_)
                | RankError::InvalidInitialRanks
                | RankError::UnknownPage(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RankError::Io {
            path: path.into(),
            source,
        }
    }
}
