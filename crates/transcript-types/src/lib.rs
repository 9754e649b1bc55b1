//! # transcript-types
//!
//! Core domain types for the transcript grouping pipeline.
//!
//! Defines the immutable [`Segment`] value type validated at the ingestion
//! boundary, the ephemeral [`Neighbor`]/[`SegmentNode`] association built per
//! run, the finalized [`SegmentGroup`], the [`GroupingConfig`] with eagerly
//! validated numeric parameters, and the error types shared across the
//! pipeline crates.

pub mod config;
pub mod error;
pub mod group;
pub mod segment;
pub mod similarity;

pub use config::GroupingConfig;
pub use error::{ConfigError, DataError};
pub use group::SegmentGroup;
pub use segment::{validate_segments, Embedding, Neighbor, Segment, SegmentNode};
pub use similarity::{centroid, cosine_similarity};
