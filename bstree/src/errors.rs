use std::path::PathBuf;
use thiserror::Error;

/// Errors raised around the tree: settings and sample generation.
///
/// Tree operations themselves are total and never fail.
#[derive(Error, Debug)]
pub enum BstError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value range: min_value {min} is greater than max_value {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("sample size must be at least 1, got {0}")]
    InvalidSampleSize(usize),
}

pub type BstResult<T> = Result<T, BstError>;
