//! Segment group type.

use serde::{Deserialize, Serialize};

use crate::segment::{Embedding, Segment};
use crate::similarity::centroid;

/// A contiguous run of segments judged to form one topic.
///
/// Created by the greedy group builder; a post-merge pass may replace two
/// adjacent groups with a merged one. Never mutated after the pipeline
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentGroup {
    /// Sequential group id, re-sequenced 0-based after post-merge
    pub group_id: usize,

    /// Video the group belongs to
    pub video_id: String,

    /// Ordered, contiguous member segments
    pub segments: Vec<Segment>,

    /// Mean effective similarity across consecutive member pairs;
    /// 0.0 for single-segment groups
    pub avg_cohesion: f32,
}

impl SegmentGroup {
    pub fn new(
        group_id: usize,
        video_id: String,
        segments: Vec<Segment>,
        avg_cohesion: f32,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "a group always has members");
        Self {
            group_id,
            video_id,
            segments,
            avg_cohesion,
        }
    }

    /// Earliest start time among members, in seconds.
    pub fn start_time(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.start_time)
            .fold(f64::INFINITY, f64::min)
    }

    /// Latest end time among members, in seconds.
    pub fn end_time(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.end_time)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Total word count across members.
    pub fn total_words(&self) -> usize {
        self.segments.iter().map(|s| s.word_count).sum()
    }

    /// Member texts joined in order.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mean embedding of members, `None` if no member carries one.
    pub fn centroid(&self) -> Option<Embedding> {
        centroid(self.segments.iter().filter_map(|s| s.embedding.as_ref()))
    }
}
