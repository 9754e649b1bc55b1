//! Per-video grouping pipeline and multi-video batch runner.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use transcript_store::NeighborProvider;
use transcript_types::{
    validate_segments, DataError, GroupingConfig, Segment, SegmentGroup,
};

use crate::builder::GroupBuilder;
use crate::error::GroupingError;
use crate::export::VideoGroupsExport;
use crate::merger::GroupMerger;
use crate::neighborhood::{NeighborhoodBuilder, Neighborhoods};

/// Videos processed concurrently by [`GroupingPipeline::run_batch`].
/// Videos share no mutable state; the store is accessed read-only.
const MAX_PARALLEL_VIDEOS: usize = 4;

/// Result of grouping one video.
#[derive(Debug)]
pub struct VideoRun {
    pub video_id: String,

    /// Finalized groups in order, ids re-sequenced 0-based
    pub groups: Vec<SegmentGroup>,

    /// Segments excluded from the run, with reasons
    pub skipped: Vec<DataError>,
}

impl VideoRun {
    /// Serializable export artifact for downstream collaborators.
    pub fn export(&self) -> VideoGroupsExport {
        VideoGroupsExport::new(self.video_id.clone(), &self.groups)
    }
}

/// Outcome of a multi-video batch. One video's failure never aborts the
/// others.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Completed runs, in input order
    pub completed: Vec<VideoRun>,

    /// Failed videos with the reason, in input order
    pub failed: Vec<(String, GroupingError)>,
}

/// Orchestrates the grouping stages for one or more videos.
pub struct GroupingPipeline {
    provider: Arc<dyn NeighborProvider>,
    config: GroupingConfig,
}

impl GroupingPipeline {
    /// Create a pipeline, validating the configuration eagerly.
    pub fn new(
        provider: Arc<dyn NeighborProvider>,
        config: GroupingConfig,
    ) -> Result<Self, GroupingError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Run the full pipeline for one video.
    ///
    /// Sequential stages: ingestion validation, neighborhoods, greedy
    /// grouping, post-merge. Aborting the returned future discards any
    /// partially built groups for this video only.
    pub async fn run_video(
        &self,
        video_id: &str,
        segments: Vec<Segment>,
    ) -> Result<VideoRun, GroupingError> {
        info!(video_id, segments = segments.len(), "Grouping segments");

        validate_segments(video_id, &segments)?;

        let Neighborhoods { nodes, skipped } =
            NeighborhoodBuilder::new(self.provider.as_ref(), &self.config)
                .build(video_id, segments)
                .await?;

        if nodes.is_empty() {
            // Every segment was excluded; nothing left to group.
            return Err(DataError::EmptyVideo {
                video_id: video_id.to_string(),
            }
            .into());
        }

        let groups = GroupBuilder::new(&self.config).build(video_id, &nodes);
        let groups = GroupMerger::new(&self.config).merge(groups);

        self.report_stats(video_id, &groups);

        Ok(VideoRun {
            video_id: video_id.to_string(),
            groups,
            skipped,
        })
    }

    /// Group several videos with bounded parallelism.
    ///
    /// Results come back in input order regardless of completion order, so
    /// batch output is deterministic.
    pub async fn run_batch(&self, videos: Vec<(String, Vec<Segment>)>) -> BatchOutcome {
        let mut results: Vec<(usize, String, Result<VideoRun, GroupingError>)> =
            stream::iter(videos.into_iter().enumerate())
                .map(|(pos, (video_id, segments))| async move {
                    let result = self.run_video(&video_id, segments).await;
                    (pos, video_id, result)
                })
                .buffer_unordered(MAX_PARALLEL_VIDEOS)
                .collect()
                .await;

        results.sort_by_key(|(pos, _, _)| *pos);

        let mut outcome = BatchOutcome::default();
        for (_, video_id, result) in results {
            match result {
                Ok(run) => outcome.completed.push(run),
                Err(e) => {
                    warn!(video_id = %video_id, error = %e, "Skipping failed video");
                    outcome.failed.push((video_id, e));
                }
            }
        }
        outcome
    }

    fn report_stats(&self, video_id: &str, groups: &[SegmentGroup]) {
        if groups.is_empty() {
            return;
        }

        let total_segments: usize = groups.iter().map(|g| g.segments.len()).sum();
        let words: Vec<usize> = groups.iter().map(|g| g.total_words()).collect();
        let cohesions: Vec<f32> = groups.iter().map(|g| g.avg_cohesion).collect();

        let word_mean = words.iter().sum::<usize>() as f64 / groups.len() as f64;
        let cohesion_mean = cohesions.iter().sum::<f32>() / groups.len() as f32;

        info!(
            video_id,
            groups = groups.len(),
            segments = total_segments,
            words_min = words.iter().min().copied().unwrap_or(0),
            words_max = words.iter().max().copied().unwrap_or(0),
            words_mean = word_mean,
            cohesion_min = cohesions.iter().copied().fold(f32::INFINITY, f32::min),
            cohesion_max = cohesions.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            cohesion_mean,
            "Grouping statistics"
        );
    }
}
