//! Deterministic in-memory neighbor store.
//!
//! Brute-force cosine search over vectors indexed per video. Serves as the
//! test stand-in for an external vector store and is exact rather than
//! approximate, which keeps pipeline output reproducible.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use transcript_types::{cosine_similarity, Segment};

use crate::error::StoreError;
use crate::provider::{NeighborHit, NeighborProvider};

struct IndexedVector {
    segment_id: String,
    embedding: Vec<f32>,
}

/// In-memory, per-video vector index.
#[derive(Default)]
pub struct InMemoryNeighborStore {
    videos: HashMap<String, Vec<IndexedVector>>,
}

impl InMemoryNeighborStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one vector under a video.
    pub fn insert(
        &mut self,
        video_id: impl Into<String>,
        segment_id: impl Into<String>,
        embedding: Vec<f32>,
    ) {
        self.videos
            .entry(video_id.into())
            .or_default()
            .push(IndexedVector {
                segment_id: segment_id.into(),
                embedding,
            });
    }

    /// Index every embedded segment of a batch. Segments without an
    /// embedding are skipped; the pipeline reports them separately.
    pub fn index_segments(&mut self, segments: &[Segment]) {
        let mut indexed = 0usize;
        for segment in segments {
            if let Some(embedding) = &segment.embedding {
                self.insert(
                    segment.video_id.clone(),
                    segment.id.clone(),
                    embedding.clone(),
                );
                indexed += 1;
            }
        }
        debug!(indexed, total = segments.len(), "Indexed segment embeddings");
    }

    /// Number of vectors indexed for a video.
    pub fn len(&self, video_id: &str) -> usize {
        self.videos.get(video_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl NeighborProvider for InMemoryNeighborStore {
    async fn search_neighbors(
        &self,
        video_id: &str,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<NeighborHit>, StoreError> {
        let vectors = self
            .videos
            .get(video_id)
            .ok_or_else(|| StoreError::UnknownVideo(video_id.to_string()))?;

        if let Some(first) = vectors.first() {
            if first.embedding.len() != query.len() {
                return Err(StoreError::DimensionMismatch {
                    expected: first.embedding.len(),
                    actual: query.len(),
                });
            }
        }

        let mut hits: Vec<(usize, NeighborHit)> = vectors
            .iter()
            .enumerate()
            .map(|(pos, v)| {
                let similarity = cosine_similarity(query, &v.embedding);
                (pos, NeighborHit::new(v.segment_id.clone(), similarity))
            })
            .collect();

        // Similarity descending, insertion order as the deterministic
        // tie-break.
        hits.sort_by(|(pos_a, a), (pos_b, b)| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(pos_a.cmp(pos_b))
        });
        hits.truncate(k);

        Ok(hits.into_iter().map(|(_, hit)| hit).collect())
    }
}
