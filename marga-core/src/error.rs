//! Error types for marga-core.

use thiserror::Error;

/// Pathway search error type.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("grid of {width}x{height} cells exceeds addressable capacity")]
    Capacity { width: usize, height: usize },

    #[error("parallel back-end error: {0}")]
    Backend(String),

    #[error(
        "solver cost mismatch: sequential {sequential:?} vs parallel {parallel:?}"
    )]
    CostMismatch {
        sequential: Option<f32>,
        parallel: Option<f32>,
    },
}

impl From<rayon::ThreadPoolBuildError> for SearchError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SearchError::Backend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
