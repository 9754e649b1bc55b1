//! Error types shared across the grouping pipeline.

use thiserror::Error;

/// Data-level failures. Fatal for the affected video only; a multi-video
/// batch reports the reason and continues with the remaining videos.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// No segments were provided for the video.
    #[error("video {video_id}: empty segment list")]
    EmptyVideo { video_id: String },

    /// A segment arrived without an embedding vector.
    #[error("video {video_id}: segment {segment_id} (index {index}) has no embedding")]
    MissingEmbedding {
        video_id: String,
        segment_id: String,
        index: usize,
    },

    /// Segment start times must be strictly increasing.
    #[error(
        "video {video_id}: segment {segment_id} (index {index}) breaks \
         timestamp monotonicity ({start_time}s not after {previous}s)"
    )]
    NonMonotonicTimestamps {
        video_id: String,
        segment_id: String,
        index: usize,
        start_time: f64,
        previous: f64,
    },

    /// A segment carries a different video id than the run it was handed to.
    #[error("video {video_id}: segment {segment_id} (index {index}) belongs to video {found}")]
    VideoIdMismatch {
        video_id: String,
        segment_id: String,
        index: usize,
        found: String,
    },

    /// Embedding dimension differs from the rest of the video.
    #[error(
        "video {video_id}: segment {segment_id} (index {index}) has embedding \
         dimension {actual}, expected {expected}"
    )]
    DimensionMismatch {
        video_id: String,
        segment_id: String,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A neighbor query failed after retries were exhausted at the store
    /// adapter.
    #[error("video {video_id}: neighbor query for segment {segment_id} failed: {detail}")]
    NeighborQuery {
        video_id: String,
        segment_id: String,
        detail: String,
    },
}

impl DataError {
    /// Video the error is scoped to.
    pub fn video_id(&self) -> &str {
        match self {
            DataError::EmptyVideo { video_id }
            | DataError::MissingEmbedding { video_id, .. }
            | DataError::NonMonotonicTimestamps { video_id, .. }
            | DataError::VideoIdMismatch { video_id, .. }
            | DataError::DimensionMismatch { video_id, .. }
            | DataError::NeighborQuery { video_id, .. } => video_id,
        }
    }
}

/// Configuration failures. Fatal at startup, before any video is processed.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A numeric parameter is outside its valid domain.
    #[error("parameter {parameter} = {value} out of range, expected {expected}")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        expected: &'static str,
    },
}
