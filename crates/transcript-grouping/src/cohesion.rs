//! Cohesion signals derived from neighborhoods.

use transcript_types::{cosine_similarity, Segment, SegmentNode};

use crate::decay::effective_similarity;

/// Segments examined on each side of a boundary when probing cohesion.
///
/// Fixed rather than scaled with segment density; keeps the pass linear.
pub const COHESION_WINDOW: usize = 3;

/// Cohesion across the boundary between `nodes[boundary]` and
/// `nodes[boundary + 1]`.
///
/// Maximum effective similarity between any segment within
/// [`COHESION_WINDOW`] of the boundary and a neighbor lying on the opposite
/// side. Segments near the video edges simply have fewer anchors; no
/// qualifying neighbor yields 0.0, the weakest case rather than an error.
pub fn boundary_cohesion(nodes: &[SegmentNode], boundary: usize, tau: f32) -> f32 {
    if boundary + 1 >= nodes.len() {
        return 0.0;
    }

    let mut best = 0.0f32;

    // Left anchors look rightward across the boundary.
    let left_start = boundary.saturating_sub(COHESION_WINDOW - 1);
    for anchor in &nodes[left_start..=boundary] {
        for neighbor in &anchor.neighbors {
            if neighbor.index > boundary {
                let delta = neighbor.start_time - anchor.segment.start_time;
                let eff = effective_similarity(neighbor.similarity, delta, tau);
                best = best.max(eff);
            }
        }
    }

    // Right anchors look leftward.
    let right_end = (boundary + COHESION_WINDOW).min(nodes.len() - 1);
    for anchor in &nodes[boundary + 1..=right_end] {
        for neighbor in &anchor.neighbors {
            if neighbor.index <= boundary {
                let delta = neighbor.start_time - anchor.segment.start_time;
                let eff = effective_similarity(neighbor.similarity, delta, tau);
                best = best.max(eff);
            }
        }
    }

    best
}

/// Mean effective similarity across consecutive member pairs of a group.
///
/// 0.0 for groups with fewer than two members or without embedded pairs.
pub fn avg_consecutive_cohesion(segments: &[Segment], tau: f32) -> f32 {
    if segments.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0f32;
    let mut pairs = 0usize;

    for window in segments.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        let sim = match (&a.embedding, &b.embedding) {
            (Some(ea), Some(eb)) => cosine_similarity(ea, eb),
            _ => 0.0,
        };
        let delta = b.start_time - a.start_time;
        total += effective_similarity(sim, delta, tau);
        pairs += 1;
    }

    total / pairs as f32
}
