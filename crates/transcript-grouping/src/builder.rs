//! Greedy sequential group builder.

use tracing::{debug, info};

use transcript_types::{GroupingConfig, Segment, SegmentGroup, SegmentNode};

use crate::boundary::BoundaryDetector;
use crate::cohesion::{avg_consecutive_cohesion, boundary_cohesion};

/// Word slack allowed when folding an undersized trailing group into its
/// predecessor.
const TRAILING_FOLD_SLACK: f64 = 1.2;

/// Single left-to-right pass producing finalized, size-bounded groups.
pub struct GroupBuilder<'a> {
    config: &'a GroupingConfig,
    detector: BoundaryDetector,
}

impl<'a> GroupBuilder<'a> {
    pub fn new(config: &'a GroupingConfig) -> Self {
        Self {
            config,
            detector: BoundaryDetector::new(config),
        }
    }

    /// Partition nodes into contiguous groups.
    ///
    /// Every node is assigned exactly once and order is preserved. A group
    /// finalized below `min_group_segments` is folded into its successor;
    /// an undersized trailing group is folded into its predecessor when the
    /// combined word count stays within the slacked cap, otherwise it
    /// stands as the terminal exception.
    pub fn build(&self, video_id: &str, nodes: &[SegmentNode]) -> Vec<SegmentGroup> {
        if nodes.is_empty() {
            return Vec::new();
        }

        info!(video_id, segments = nodes.len(), "Forming segment groups");

        let tau = self.config.temporal_tau;
        let mut groups: Vec<SegmentGroup> = Vec::new();
        let mut open: Vec<Segment> = vec![nodes[0].segment.clone()];
        let mut open_words = nodes[0].segment.word_count;

        for boundary in 0..nodes.len() - 1 {
            let next = &nodes[boundary + 1].segment;
            let cohesion = boundary_cohesion(nodes, boundary, tau);

            match self.detector.evaluate(cohesion, open_words, next.word_count) {
                Some(reason) if open.len() >= self.config.min_group_segments => {
                    debug!(
                        video_id,
                        boundary,
                        cohesion,
                        ?reason,
                        words = open_words,
                        "Cut detected"
                    );
                    groups.push(self.finalize(groups.len(), video_id, std::mem::take(&mut open)));
                    open.push(next.clone());
                    open_words = next.word_count;
                }
                Some(reason) => {
                    // Undersized group folds into its successor instead of
                    // standing alone.
                    debug!(
                        video_id,
                        boundary,
                        ?reason,
                        members = open.len(),
                        "Suppressing cut below min group size"
                    );
                    open.push(next.clone());
                    open_words += next.word_count;
                }
                None => {
                    open.push(next.clone());
                    open_words += next.word_count;
                }
            }
        }

        self.flush(video_id, &mut groups, open, open_words);

        info!(video_id, groups = groups.len(), "Formed initial groups");
        groups
    }

    fn flush(
        &self,
        video_id: &str,
        groups: &mut Vec<SegmentGroup>,
        open: Vec<Segment>,
        open_words: usize,
    ) {
        let fold_cap = (self.config.max_group_words as f64 * TRAILING_FOLD_SLACK) as usize;
        let fits_predecessor = groups
            .last()
            .is_some_and(|p| p.total_words() + open_words <= fold_cap);

        if open.len() < self.config.min_group_segments && fits_predecessor {
            debug!(
                video_id,
                members = open.len(),
                "Folding undersized trailing group into predecessor"
            );
            if let Some(mut previous) = groups.pop() {
                previous.segments.extend(open);
                previous.avg_cohesion =
                    avg_consecutive_cohesion(&previous.segments, self.config.temporal_tau);
                groups.push(previous);
            }
            return;
        }

        groups.push(self.finalize(groups.len(), video_id, open));
    }

    fn finalize(&self, group_id: usize, video_id: &str, segments: Vec<Segment>) -> SegmentGroup {
        let cohesion = avg_consecutive_cohesion(&segments, self.config.temporal_tau);
        SegmentGroup::new(group_id, video_id.to_string(), segments, cohesion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_types::Neighbor;

    fn make_node(index: usize, start: f64, words: usize, embedding: Vec<f32>) -> SegmentNode {
        SegmentNode::new(Segment {
            id: format!("seg-{index}"),
            video_id: "vid-1".to_string(),
            index,
            start_time: start,
            end_time: start + 20.0,
            text: format!("text {index}"),
            word_count: words,
            embedding: Some(embedding),
        })
    }

    /// Link every adjacent pair bidirectionally with the given similarity.
    fn link_chain(nodes: &mut [SegmentNode], similarity: f32) {
        for i in 0..nodes.len() - 1 {
            let (t_i, t_next) = (nodes[i].segment.start_time, nodes[i + 1].segment.start_time);
            nodes[i].neighbors.push(Neighbor {
                segment_id: format!("seg-{}", i + 1),
                index: i + 1,
                similarity,
                start_time: t_next,
            });
            nodes[i + 1].neighbors.push(Neighbor {
                segment_id: format!("seg-{i}"),
                index: i,
                similarity,
                start_time: t_i,
            });
        }
    }

    fn config() -> GroupingConfig {
        GroupingConfig {
            adjacent_threshold: 0.6,
            max_group_words: 800,
            min_group_segments: 2,
            temporal_tau: 150.0,
            ..GroupingConfig::default()
        }
    }

    #[test]
    fn test_cohesive_chain_stays_in_one_group() {
        let mut nodes: Vec<SegmentNode> = (0..4)
            .map(|i| make_node(i, i as f64 * 10.0, 100, vec![1.0, 0.0]))
            .collect();
        link_chain(&mut nodes, 0.95);

        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].segments.len(), 4);
        assert!(groups[0].avg_cohesion > 0.0);
    }

    #[test]
    fn test_word_budget_forces_cut() {
        let mut nodes: Vec<SegmentNode> = (0..6)
            .map(|i| make_node(i, i as f64 * 10.0, 200, vec![1.0, 0.0]))
            .collect();
        link_chain(&mut nodes, 0.95);

        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].segments.len(), 4);
        assert_eq!(groups[0].total_words(), 800);
        assert_eq!(groups[1].segments.len(), 2);
    }

    #[test]
    fn test_undersized_group_folds_into_successor() {
        // No neighborhood links at all: every boundary has cohesion 0 and
        // wants to cut, but the min size keeps folding forward.
        let nodes: Vec<SegmentNode> = (0..3)
            .map(|i| make_node(i, i as f64 * 10.0, 100, vec![1.0, 0.0]))
            .collect();

        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        // [0] folds into [0,1]; finalized at the cut before 2; trailing [2]
        // folds back into its predecessor.
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].segments.len(), 3);
    }

    #[test]
    fn test_trailing_singleton_folds_into_predecessor() {
        let mut nodes: Vec<SegmentNode> = (0..5)
            .map(|i| make_node(i, i as f64 * 10.0, 100, vec![1.0, 0.0]))
            .collect();
        link_chain(&mut nodes, 0.95);
        // Break the link into the final segment so a cut lands before it.
        nodes[3].neighbors.retain(|n| n.index != 4);
        nodes[4].neighbors.clear();

        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].segments.len(), 5);
    }

    #[test]
    fn test_trailing_singleton_stands_when_fold_exceeds_slack() {
        let mut nodes: Vec<SegmentNode> = (0..4)
            .map(|i| make_node(i, i as f64 * 10.0, 250, vec![1.0, 0.0]))
            .collect();
        link_chain(&mut nodes, 0.95);

        // The word budget cuts before segment 3, stranding it; the
        // predecessor holds 750 words, so folding 250 more would exceed
        // 800 * 1.2 = 960 and the singleton stands as the terminal
        // exception.
        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].segments.len(), 3);
        assert_eq!(groups[1].segments.len(), 1);
    }

    #[test]
    fn test_every_node_assigned_exactly_once() {
        let mut nodes: Vec<SegmentNode> = (0..10)
            .map(|i| make_node(i, i as f64 * 25.0, 150, vec![1.0, 0.0]))
            .collect();
        link_chain(&mut nodes, 0.9);

        let groups = GroupBuilder::new(&config()).build("vid-1", &nodes);
        let assigned: Vec<usize> = groups
            .iter()
            .flat_map(|g| g.segments.iter().map(|s| s.index))
            .collect();
        assert_eq!(assigned, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_produces_no_groups() {
        let groups = GroupBuilder::new(&config()).build("vid-1", &[]);
        assert!(groups.is_empty());
    }
}
