//! Boundary decision rule.

use transcript_types::GroupingConfig;

/// Why a cut was placed between two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutReason {
    /// Boundary cohesion fell below the adjacent threshold
    LowCohesion,

    /// Appending the next segment would push the open group over the word cap
    WordBudget,
}

/// Stateless cut rule evaluated during greedy growth.
///
/// Decisions are monotonic left-to-right with no lookahead beyond the open
/// group; the word-budget trigger depends on the running group size, which
/// is why the rule is evaluated inline rather than precomputed.
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    adjacent_threshold: f32,
    max_group_words: usize,
}

impl BoundaryDetector {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            adjacent_threshold: config.adjacent_threshold,
            max_group_words: config.max_group_words,
        }
    }

    /// Decide whether to cut before the next segment.
    pub fn evaluate(
        &self,
        cohesion: f32,
        open_words: usize,
        next_words: usize,
    ) -> Option<CutReason> {
        if cohesion < self.adjacent_threshold {
            return Some(CutReason::LowCohesion);
        }
        if open_words + next_words > self.max_group_words {
            return Some(CutReason::WordBudget);
        }
        None
    }
}
