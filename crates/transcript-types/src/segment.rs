//! Transcript segment types and ingestion validation.
//!
//! Segments arrive from the transcript/embedding collaborator already
//! embedded and time-ordered. [`validate_segments`] rejects malformed
//! batches before they enter the pipeline; everything downstream may assume
//! the invariants hold.

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// An embedding vector.
pub type Embedding = Vec<f32>;

/// Smallest unit of transcript text with a time span and embedding.
///
/// Immutable for the duration of a grouping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Unique segment identifier
    pub id: String,

    /// Video the segment belongs to
    pub video_id: String,

    /// Position in the video timeline, strictly increasing per video
    pub index: usize,

    /// Start time in seconds
    pub start_time: f64,

    /// End time in seconds
    pub end_time: f64,

    /// Segment text
    pub text: String,

    /// Number of words in the text
    pub word_count: usize,

    /// Embedding vector; absence is reported as a [`DataError`], never
    /// silently dropped
    pub embedding: Option<Embedding>,
}

impl Segment {
    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A neighboring segment with similarity and temporal info.
///
/// Recomputed every run, never persisted.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// Identifier of the neighboring segment
    pub segment_id: String,

    /// Position of the neighbor in the run's node list
    pub index: usize,

    /// Raw cosine similarity, before temporal decay
    pub similarity: f32,

    /// Start time of the neighbor in seconds
    pub start_time: f64,
}

/// A segment plus its resolved neighborhood.
#[derive(Debug, Clone)]
pub struct SegmentNode {
    pub segment: Segment,

    /// Up to `k_neighbors` entries, filtered by the neighbor threshold
    pub neighbors: Vec<Neighbor>,
}

impl SegmentNode {
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            neighbors: Vec::new(),
        }
    }
}

/// Validate a video's segment batch at the ingestion boundary.
///
/// Rejects empty batches, segments tagged with a different video id,
/// non-strictly-increasing start times, and inconsistent embedding
/// dimensions. Missing embeddings are not rejected here; the neighborhood
/// builder excludes and reports them per segment.
pub fn validate_segments(video_id: &str, segments: &[Segment]) -> Result<(), DataError> {
    if segments.is_empty() {
        return Err(DataError::EmptyVideo {
            video_id: video_id.to_string(),
        });
    }

    let mut previous_start: Option<f64> = None;
    let mut dimension: Option<usize> = None;

    for segment in segments {
        if segment.video_id != video_id {
            return Err(DataError::VideoIdMismatch {
                video_id: video_id.to_string(),
                segment_id: segment.id.clone(),
                index: segment.index,
                found: segment.video_id.clone(),
            });
        }

        if let Some(prev) = previous_start {
            if segment.start_time <= prev {
                return Err(DataError::NonMonotonicTimestamps {
                    video_id: video_id.to_string(),
                    segment_id: segment.id.clone(),
                    index: segment.index,
                    start_time: segment.start_time,
                    previous: prev,
                });
            }
        }
        previous_start = Some(segment.start_time);

        if let Some(embedding) = &segment.embedding {
            match dimension {
                None => dimension = Some(embedding.len()),
                Some(expected) if embedding.len() != expected => {
                    return Err(DataError::DimensionMismatch {
                        video_id: video_id.to_string(),
                        segment_id: segment.id.clone(),
                        index: segment.index,
                        expected,
                        actual: embedding.len(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
