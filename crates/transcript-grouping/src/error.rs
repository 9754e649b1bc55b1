//! Engine error type.

use thiserror::Error;

use transcript_types::{ConfigError, DataError};

/// Errors from a grouping run.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// Invalid configuration; aborts before any processing.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data failure scoped to one video.
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Export I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
