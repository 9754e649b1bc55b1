//! Nearest-neighbor provider trait.

use async_trait::async_trait;

use crate::error::StoreError;

/// A single hit from a similarity query.
#[derive(Debug, Clone)]
pub struct NeighborHit {
    /// Identifier of the matched segment
    pub segment_id: String,

    /// Raw cosine similarity to the query vector
    pub similarity: f32,
}

impl NeighborHit {
    pub fn new(segment_id: impl Into<String>, similarity: f32) -> Self {
        Self {
            segment_id: segment_id.into(),
            similarity,
        }
    }
}

/// Narrow interface to a vector store, scoped to one video per query.
///
/// Implementations must be thread-safe; the pipeline issues independent
/// queries concurrently and accesses the store read-only.
#[async_trait]
pub trait NeighborProvider: Send + Sync {
    /// Return up to `k` segments most similar to `query` within `video_id`,
    /// sorted by similarity descending with deterministic tie-breaking.
    ///
    /// The query segment itself may appear in the results; callers filter
    /// it out.
    async fn search_neighbors(
        &self,
        video_id: &str,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<NeighborHit>, StoreError>;
}
