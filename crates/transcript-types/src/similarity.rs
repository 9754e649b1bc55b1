//! Vector similarity functions.

use crate::segment::Embedding;

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm. Callers are expected to
/// pass vectors of equal dimension; the ingestion boundary enforces a
/// uniform dimension per video.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Mean embedding of a set of vectors.
///
/// Returns `None` for an empty set. The result is not normalized; cosine
/// similarity is scale-invariant so downstream comparisons are unaffected.
pub fn centroid<'a, I>(embeddings: I) -> Option<Embedding>
where
    I: IntoIterator<Item = &'a Embedding>,
{
    let mut iter = embeddings.into_iter();
    let first = iter.next()?;
    let mut sum = first.clone();
    let mut count = 1usize;

    for embedding in iter {
        debug_assert_eq!(embedding.len(), sum.len(), "embedding dimensions must match");
        for (acc, &val) in sum.iter_mut().zip(embedding.iter()) {
            *acc += val;
        }
        count += 1;
    }

    let n = count as f32;
    for val in sum.iter_mut() {
        *val /= n;
    }
    Some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_direction() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![2.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_centroid_mean() {
        let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let c = centroid(embeddings.iter()).unwrap();
        assert!((c[0] - 0.5).abs() < 1e-6);
        assert!((c[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_empty() {
        let empty: Vec<Embedding> = Vec::new();
        assert!(centroid(empty.iter()).is_none());
    }

    #[test]
    fn test_centroid_single() {
        let e = vec![3.0, 4.0];
        let c = centroid(std::iter::once(&e)).unwrap();
        assert_eq!(c, vec![3.0, 4.0]);
    }

    #[test]
    fn test_centroid_scale_invariant_for_cosine() {
        let e1 = vec![1.0, 1.0];
        let e2 = vec![3.0, 3.0];
        let c = centroid([e1.clone(), e2].iter()).unwrap();
        assert!((cosine_similarity(&c, &e1) - 1.0).abs() < 1e-6);
    }
}
