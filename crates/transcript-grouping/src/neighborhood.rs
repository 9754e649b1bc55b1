//! k-NN neighborhood construction.
//!
//! One similarity query per segment against the neighbor provider, issued
//! through a bounded concurrent pool. Results are collected in segment
//! order before the stage completes, so the output is deterministic.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use transcript_store::NeighborProvider;
use transcript_types::{DataError, GroupingConfig, Neighbor, Segment, SegmentNode};

/// Concurrent in-flight neighbor queries per video.
const MAX_CONCURRENT_QUERIES: usize = 8;

/// Output of the neighborhood stage.
pub struct Neighborhoods {
    /// Segments with resolved neighbor lists, in input order
    pub nodes: Vec<SegmentNode>,

    /// Segments excluded from the run, with the reason for each
    pub skipped: Vec<DataError>,
}

/// Resolves up to `k_neighbors` similar segments per segment.
pub struct NeighborhoodBuilder<'a> {
    provider: &'a dyn NeighborProvider,
    config: &'a GroupingConfig,
}

impl<'a> NeighborhoodBuilder<'a> {
    pub fn new(provider: &'a dyn NeighborProvider, config: &'a GroupingConfig) -> Self {
        Self { provider, config }
    }

    /// Build neighborhoods for every embedded segment of a video.
    ///
    /// Segments without an embedding are excluded and reported in
    /// [`Neighborhoods::skipped`]. A store failure that survives the
    /// adapter's retries is fatal for the video.
    pub async fn build(
        &self,
        video_id: &str,
        segments: Vec<Segment>,
    ) -> Result<Neighborhoods, DataError> {
        let mut embedded: Vec<Segment> = Vec::with_capacity(segments.len());
        let mut skipped = Vec::new();

        for segment in segments {
            if segment.embedding.is_some() {
                embedded.push(segment);
            } else {
                skipped.push(DataError::MissingEmbedding {
                    video_id: video_id.to_string(),
                    segment_id: segment.id.clone(),
                    index: segment.index,
                });
            }
        }

        info!(
            video_id,
            k = self.config.k_neighbors,
            segments = embedded.len(),
            skipped = skipped.len(),
            "Building k-NN neighborhoods"
        );

        // +1 because the query segment itself appears in its own results.
        let k = self.config.k_neighbors + 1;

        let queries = embedded.iter().map(|segment| {
            let embedding = segment.embedding.as_deref().unwrap_or(&[]);
            async move {
                self.provider
                    .search_neighbors(video_id, embedding, k)
                    .await
                    .map_err(|e| DataError::NeighborQuery {
                        video_id: video_id.to_string(),
                        segment_id: segment.id.clone(),
                        detail: e.to_string(),
                    })
            }
        });

        let responses: Vec<_> = stream::iter(queries)
            .buffered(MAX_CONCURRENT_QUERIES)
            .collect()
            .await;

        let positions: std::collections::HashMap<&str, usize> = embedded
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.id.as_str(), pos))
            .collect();

        let mut nodes: Vec<SegmentNode> = Vec::with_capacity(embedded.len());
        for (pos, (segment, response)) in embedded.iter().zip(responses).enumerate() {
            let hits = response?;

            let mut neighbors: Vec<Neighbor> = hits
                .into_iter()
                .filter(|hit| hit.segment_id != segment.id)
                .filter(|hit| hit.similarity >= self.config.neighbor_threshold)
                .filter_map(|hit| {
                    let index = *positions.get(hit.segment_id.as_str())?;
                    Some(Neighbor {
                        segment_id: hit.segment_id,
                        index,
                        similarity: hit.similarity,
                        start_time: embedded[index].start_time,
                    })
                })
                .collect();

            // Similarity descending; ties go to the nearer sequence index.
            neighbors.sort_by(|a, b| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.index.abs_diff(pos).cmp(&b.index.abs_diff(pos)))
                    .then_with(|| a.index.cmp(&b.index))
            });
            neighbors.truncate(self.config.k_neighbors);

            debug!(
                segment_id = %segment.id,
                neighbors = neighbors.len(),
                "Resolved neighborhood"
            );

            nodes.push(SegmentNode {
                segment: segment.clone(),
                neighbors,
            });
        }

        if !nodes.is_empty() {
            let avg =
                nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() as f64 / nodes.len() as f64;
            info!(video_id, avg_neighbors = avg, "Built neighborhoods");
        }

        Ok(Neighborhoods { nodes, skipped })
    }
}
