//! Bounded retry wrapper for neighbor providers.

use std::time::Duration;

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::provider::{NeighborHit, NeighborProvider};

/// Retry settings for transient store failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts, including the first
    pub max_attempts: u32,

    /// Upper bound on total time spent backing off
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_elapsed: Duration::from_secs(30),
        }
    }
}

/// Wraps a provider and retries transient failures with exponential
/// backoff. Permanent failures are returned immediately; exhausted retries
/// surface as [`StoreError::RetriesExhausted`].
pub struct RetryingProvider<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> RetryingProvider<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<P: NeighborProvider> NeighborProvider for RetryingProvider<P> {
    async fn search_neighbors(
        &self,
        video_id: &str,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<NeighborHit>, StoreError> {
        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.policy.max_elapsed),
            ..Default::default()
        };

        let mut attempts = 0u32;

        loop {
            attempts += 1;
            debug!(video_id, attempt = attempts, "Neighbor query");

            match self.inner.search_neighbors(video_id, query, k).await {
                Ok(hits) => return Ok(hits),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    if attempts >= self.policy.max_attempts {
                        return Err(StoreError::RetriesExhausted {
                            attempts,
                            last: e.to_string(),
                        });
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                video_id,
                                error = %e,
                                retry_in_ms = duration.as_millis() as u64,
                                "Neighbor query failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            return Err(StoreError::RetriesExhausted {
                                attempts,
                                last: e.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }
}
