//! Post-merge reconciliation of adjacent groups.

use tracing::{debug, info};

use transcript_types::{cosine_similarity, GroupingConfig, SegmentGroup};

use crate::cohesion::avg_consecutive_cohesion;

/// Cascading forward pass that merges adjacent groups whose centroids are
/// similar enough. Only ever reduces the group count; never splits.
pub struct GroupMerger<'a> {
    config: &'a GroupingConfig,
}

impl<'a> GroupMerger<'a> {
    pub fn new(config: &'a GroupingConfig) -> Self {
        Self { config }
    }

    /// Merge qualifying adjacent pairs.
    ///
    /// A merged group is immediately re-tested against its right neighbor;
    /// pairs that already passed on the left are not revisited. Group ids
    /// are re-sequenced 0-based at the end.
    pub fn merge(&self, groups: Vec<SegmentGroup>) -> Vec<SegmentGroup> {
        let before = groups.len();
        let mut merged: Vec<SegmentGroup> = Vec::with_capacity(before);

        let mut iter = groups.into_iter();
        let Some(mut current) = iter.next() else {
            return merged;
        };

        for candidate in iter {
            if self.should_merge(&current, &candidate) {
                debug!(
                    left = current.group_id,
                    right = candidate.group_id,
                    "Merging adjacent groups"
                );
                current = self.combine(current, candidate);
            } else {
                merged.push(current);
                current = candidate;
            }
        }
        merged.push(current);

        for (idx, group) in merged.iter_mut().enumerate() {
            group.group_id = idx;
        }

        info!(before, after = merged.len(), "Post-merge complete");
        merged
    }

    fn should_merge(&self, left: &SegmentGroup, right: &SegmentGroup) -> bool {
        let combined_words = left.total_words() + right.total_words();
        if combined_words > self.config.max_merged_words {
            return false;
        }

        let (Some(left_centroid), Some(right_centroid)) = (left.centroid(), right.centroid())
        else {
            return false;
        };

        cosine_similarity(&left_centroid, &right_centroid) >= self.config.merge_centroid_threshold
    }

    fn combine(&self, mut left: SegmentGroup, right: SegmentGroup) -> SegmentGroup {
        left.segments.extend(right.segments);
        left.avg_cohesion = avg_consecutive_cohesion(&left.segments, self.config.temporal_tau);
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_types::Segment;

    fn make_group(group_id: usize, indices: &[usize], embedding: Vec<f32>) -> SegmentGroup {
        let segments: Vec<Segment> = indices
            .iter()
            .map(|&i| Segment {
                id: format!("seg-{i}"),
                video_id: "vid-1".to_string(),
                index: i,
                start_time: i as f64 * 30.0,
                end_time: i as f64 * 30.0 + 20.0,
                text: format!("text {i}"),
                word_count: 100,
                embedding: Some(embedding.clone()),
            })
            .collect();
        SegmentGroup::new(group_id, "vid-1".to_string(), segments, 0.9)
    }

    fn config() -> GroupingConfig {
        GroupingConfig {
            merge_centroid_threshold: 0.80,
            max_merged_words: 1000,
            ..GroupingConfig::default()
        }
    }

    #[test]
    fn test_merges_similar_adjacent_groups() {
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![0.98, 0.05]),
        ];

        let merged = GroupMerger::new(&config()).merge(groups);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].segments.len(), 4);
        assert_eq!(merged[0].group_id, 0);
    }

    #[test]
    fn test_keeps_dissimilar_groups_apart() {
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![0.0, 1.0]),
        ];

        let merged = GroupMerger::new(&config()).merge(groups);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_respects_word_bound() {
        let config = GroupingConfig {
            max_merged_words: 300,
            max_group_words: 300,
            ..GroupingConfig::default()
        };
        // Identical centroids but 200 + 200 = 400 words exceeds the bound.
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![1.0, 0.0]),
        ];

        let merged = GroupMerger::new(&config).merge(groups);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_cascades_into_following_group() {
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![1.0, 0.0]),
            make_group(2, &[4, 5], vec![1.0, 0.0]),
        ];

        // 400, then 600 words; both merges stay under the 1000 bound.
        let merged = GroupMerger::new(&config()).merge(groups);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].segments.len(), 6);
    }

    #[test]
    fn test_renumbers_ids_after_merge() {
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![0.0, 1.0]),
            make_group(2, &[4, 5], vec![0.0, 0.98]),
        ];

        let merged = GroupMerger::new(&config()).merge(groups);
        assert_eq!(merged.len(), 2);
        let ids: Vec<usize> = merged.iter().map(|g| g.group_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_recomputes_cohesion_after_merge() {
        let groups = vec![
            make_group(0, &[0, 1], vec![1.0, 0.0]),
            make_group(1, &[2, 3], vec![1.0, 0.0]),
        ];

        let merged = GroupMerger::new(&config()).merge(groups);
        let expected = avg_consecutive_cohesion(&merged[0].segments, config().temporal_tau);
        assert!((merged[0].avg_cohesion - expected).abs() < 1e-6);
    }

    #[test]
    fn test_empty_input() {
        let merged = GroupMerger::new(&config()).merge(Vec::new());
        assert!(merged.is_empty());
    }
}
