//! Temporal decay model.

/// Time-penalized similarity: `s * exp(-|Δt| / τ)`.
///
/// Equals `s` at `Δt = 0`, is non-increasing in `|Δt|`, and never exceeds
/// the raw similarity. Applied exactly once per similarity value that feeds
/// a boundary or cohesion decision.
pub fn effective_similarity(similarity: f32, delta_seconds: f64, tau: f32) -> f32 {
    let penalty = (-delta_seconds.abs() / tau as f64).exp();
    similarity * penalty as f32
}
