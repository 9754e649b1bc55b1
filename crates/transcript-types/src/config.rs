//! Grouping configuration.
//!
//! An explicit immutable value passed into each run; no process-wide
//! mutable state. All parameters are numeric and validated eagerly via
//! [`GroupingConfig::validate`] before any processing begins.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters for the segment grouping algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Number of nearest neighbors resolved per segment
    #[serde(default = "default_k_neighbors")]
    pub k_neighbors: usize,

    /// Minimum raw cosine similarity for a neighbor to qualify
    #[serde(default = "default_neighbor_threshold")]
    pub neighbor_threshold: f32,

    /// Minimum boundary cohesion to keep adjacent segments together
    #[serde(default = "default_adjacent_threshold")]
    pub adjacent_threshold: f32,

    /// Temporal decay constant in seconds; higher decays slower
    #[serde(default = "default_temporal_tau")]
    pub temporal_tau: f32,

    /// Maximum words per group during greedy growth
    #[serde(default = "default_max_group_words")]
    pub max_group_words: usize,

    /// Minimum segments per group; undersized groups are folded into a
    /// neighbor rather than left standalone
    #[serde(default = "default_min_group_segments")]
    pub min_group_segments: usize,

    /// Minimum centroid similarity for the post-merge pass
    #[serde(default = "default_merge_centroid_threshold")]
    pub merge_centroid_threshold: f32,

    /// Upper word bound for a post-merge result
    #[serde(default = "default_max_merged_words")]
    pub max_merged_words: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            k_neighbors: default_k_neighbors(),
            neighbor_threshold: default_neighbor_threshold(),
            adjacent_threshold: default_adjacent_threshold(),
            temporal_tau: default_temporal_tau(),
            max_group_words: default_max_group_words(),
            min_group_segments: default_min_group_segments(),
            merge_centroid_threshold: default_merge_centroid_threshold(),
            max_merged_words: default_max_merged_words(),
        }
    }
}

fn default_k_neighbors() -> usize {
    8
}
fn default_neighbor_threshold() -> f32 {
    0.75
}
fn default_adjacent_threshold() -> f32 {
    0.60
}
fn default_temporal_tau() -> f32 {
    150.0
}
fn default_max_group_words() -> usize {
    800
}
fn default_min_group_segments() -> usize {
    2
}
fn default_merge_centroid_threshold() -> f32 {
    0.80
}
fn default_max_merged_words() -> usize {
    1000
}

impl GroupingConfig {
    /// Parameters tuned for single-speaker educational content: stricter
    /// thresholds, smaller and more focused groups.
    pub fn tuned() -> Self {
        Self {
            k_neighbors: 8,
            neighbor_threshold: 0.80,
            adjacent_threshold: 0.70,
            temporal_tau: 150.0,
            max_group_words: 700,
            min_group_segments: 2,
            merge_centroid_threshold: 0.85,
            max_merged_words: 875,
        }
    }

    /// Maximum-cohesion parameters; may produce more, smaller groups.
    pub fn strict() -> Self {
        Self {
            k_neighbors: 8,
            neighbor_threshold: 0.85,
            adjacent_threshold: 0.75,
            temporal_tau: 150.0,
            max_group_words: 600,
            min_group_segments: 2,
            merge_centroid_threshold: 0.90,
            max_merged_words: 750,
        }
    }

    /// More inclusive parameters for longer groups with lower cohesion.
    pub fn relaxed() -> Self {
        Self {
            k_neighbors: 10,
            neighbor_threshold: 0.70,
            adjacent_threshold: 0.55,
            temporal_tau: 200.0,
            max_group_words: 900,
            min_group_segments: 2,
            merge_centroid_threshold: 0.75,
            max_merged_words: 1125,
        }
    }

    /// Validate all parameters, failing fast on the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k_neighbors < 1 {
            return Err(ConfigError::OutOfRange {
                parameter: "k_neighbors",
                value: self.k_neighbors as f64,
                expected: ">= 1",
            });
        }
        check_unit_interval("neighbor_threshold", self.neighbor_threshold)?;
        check_unit_interval("adjacent_threshold", self.adjacent_threshold)?;
        check_unit_interval("merge_centroid_threshold", self.merge_centroid_threshold)?;
        if !(self.temporal_tau > 0.0) {
            return Err(ConfigError::OutOfRange {
                parameter: "temporal_tau",
                value: self.temporal_tau as f64,
                expected: "> 0",
            });
        }
        if self.max_group_words == 0 {
            return Err(ConfigError::OutOfRange {
                parameter: "max_group_words",
                value: 0.0,
                expected: "> 0",
            });
        }
        if self.min_group_segments < 1 {
            return Err(ConfigError::OutOfRange {
                parameter: "min_group_segments",
                value: self.min_group_segments as f64,
                expected: ">= 1",
            });
        }
        if self.max_merged_words < self.max_group_words {
            return Err(ConfigError::OutOfRange {
                parameter: "max_merged_words",
                value: self.max_merged_words as f64,
                expected: ">= max_group_words",
            });
        }
        Ok(())
    }
}

fn check_unit_interval(parameter: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(ConfigError::OutOfRange {
            parameter,
            value: value as f64,
            expected: "0.0..=1.0",
        });
    }
    Ok(())
}
