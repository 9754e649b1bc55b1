//! Store adapter error types.

use thiserror::Error;

/// Errors at the embedding-store boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Transient backend failure; eligible for retry.
    #[error("transient store failure: {0}")]
    Transient(String),

    /// Permanent backend failure; retrying will not help.
    #[error("store backend failure: {0}")]
    Backend(String),

    /// No segments indexed for the requested video.
    #[error("video {0} not indexed")]
    UnknownVideo(String),

    /// Query vector dimension does not match the indexed vectors.
    #[error("query dimension {actual} does not match indexed dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Retries were exhausted without a successful response.
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl StoreError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}
