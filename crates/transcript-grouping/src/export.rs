//! Serializable export of finalized groups.
//!
//! The sole artifact handed to downstream collaborators (concept
//! extraction, storage, visualization).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use transcript_types::{Segment, SegmentGroup};

use crate::error::GroupingError;

/// Per-member summary inside a group export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentExport {
    pub id: String,
    pub index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub word_count: usize,
}

impl From<&Segment> for SegmentExport {
    fn from(segment: &Segment) -> Self {
        Self {
            id: segment.id.clone(),
            index: segment.index,
            start_time: segment.start_time,
            end_time: segment.end_time,
            text: segment.text.clone(),
            word_count: segment.word_count,
        }
    }
}

/// One finalized group with aggregate metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupExport {
    pub group_id: usize,
    pub video_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub num_segments: usize,
    pub total_words: usize,
    pub avg_cohesion: f32,
    pub text: String,
    pub segments: Vec<SegmentExport>,
}

impl From<&SegmentGroup> for GroupExport {
    fn from(group: &SegmentGroup) -> Self {
        Self {
            group_id: group.group_id,
            video_id: group.video_id.clone(),
            start_time: group.start_time(),
            end_time: group.end_time(),
            duration: group.duration(),
            num_segments: group.segments.len(),
            total_words: group.total_words(),
            avg_cohesion: group.avg_cohesion,
            text: group.text(),
            segments: group.segments.iter().map(SegmentExport::from).collect(),
        }
    }
}

/// Export envelope for one video's groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoGroupsExport {
    pub video_id: String,
    pub num_groups: usize,
    pub groups: Vec<GroupExport>,
}

impl VideoGroupsExport {
    pub fn new(video_id: impl Into<String>, groups: &[SegmentGroup]) -> Self {
        Self {
            video_id: video_id.into(),
            num_groups: groups.len(),
            groups: groups.iter().map(GroupExport::from).collect(),
        }
    }

    /// Write pretty-printed JSON, creating parent directories as needed.
    pub fn write_json(&self, path: &Path) -> Result<(), GroupingError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;

        info!(
            video_id = %self.video_id,
            groups = self.num_groups,
            path = %path.display(),
            "Exported groups"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_group() -> SegmentGroup {
        let segments = vec![
            Segment {
                id: "seg-0".to_string(),
                video_id: "vid-1".to_string(),
                index: 0,
                start_time: 0.0,
                end_time: 20.0,
                text: "hello".to_string(),
                word_count: 1,
                embedding: Some(vec![1.0, 0.0]),
            },
            Segment {
                id: "seg-1".to_string(),
                video_id: "vid-1".to_string(),
                index: 1,
                start_time: 30.0,
                end_time: 50.0,
                text: "world".to_string(),
                word_count: 1,
                embedding: Some(vec![1.0, 0.0]),
            },
        ];
        SegmentGroup::new(0, "vid-1".to_string(), segments, 0.85)
    }

    #[test]
    fn test_group_export_fields() {
        let export = GroupExport::from(&make_group());

        assert_eq!(export.group_id, 0);
        assert_eq!(export.video_id, "vid-1");
        assert_eq!(export.start_time, 0.0);
        assert_eq!(export.end_time, 50.0);
        assert_eq!(export.duration, 50.0);
        assert_eq!(export.num_segments, 2);
        assert_eq!(export.total_words, 2);
        assert_eq!(export.text, "hello world");
        assert_eq!(export.segments.len(), 2);
        assert_eq!(export.segments[1].id, "seg-1");
    }

    #[test]
    fn test_export_omits_embeddings() {
        let export = VideoGroupsExport::new("vid-1", &[make_group()]);
        let json = serde_json::to_string(&export).unwrap();
        assert!(!json.contains("embedding"));
    }

    #[test]
    fn test_envelope_round_trip() {
        let export = VideoGroupsExport::new("vid-1", &[make_group()]);
        let json = serde_json::to_string(&export).unwrap();
        let decoded: VideoGroupsExport = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.video_id, "vid-1");
        assert_eq!(decoded.num_groups, 1);
        assert_eq!(decoded.groups[0].total_words, 2);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/groups.json");

        let export = VideoGroupsExport::new("vid-1", &[make_group()]);
        export.write_json(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let decoded: VideoGroupsExport = serde_json::from_str(&contents).unwrap();
        assert_eq!(decoded.num_groups, 1);
    }
}
