//! # transcript-grouping
//!
//! Semantic segment-grouping engine.
//!
//! Converts a time-ordered sequence of embedded transcript segments into
//! coherent, contiguous topic groups of bounded size while preserving
//! narrative order. The pipeline is a single sequential pass per video:
//!
//! 1. k-NN neighborhoods per segment (bounded concurrent store queries)
//! 2. temporal-decay cohesion across each adjacent boundary
//! 3. greedy left-to-right growth under word-count constraints
//! 4. cascading post-merge of highly similar adjacent groups
//! 5. export with aggregate metrics
//!
//! The vector backend is abstracted behind
//! [`transcript_store::NeighborProvider`], so the algorithm itself is
//! deterministic and backend-free.

pub mod boundary;
pub mod builder;
pub mod cohesion;
pub mod decay;
pub mod error;
pub mod export;
pub mod merger;
pub mod neighborhood;
pub mod pipeline;

pub use boundary::{BoundaryDetector, CutReason};
pub use builder::GroupBuilder;
pub use cohesion::{avg_consecutive_cohesion, boundary_cohesion, COHESION_WINDOW};
pub use decay::effective_similarity;
pub use error::GroupingError;
pub use export::{GroupExport, SegmentExport, VideoGroupsExport};
pub use merger::GroupMerger;
pub use neighborhood::{NeighborhoodBuilder, Neighborhoods};
pub use pipeline::{BatchOutcome, GroupingPipeline, VideoRun};
