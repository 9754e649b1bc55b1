//! # transcript-store
//!
//! Nearest-neighbor provider boundary for the grouping pipeline.
//!
//! The grouping algorithm has no dependency on a specific vector backend;
//! it talks to a [`NeighborProvider`] and nothing else. This crate ships a
//! deterministic [`InMemoryNeighborStore`] for tests and small runs, and a
//! [`RetryingProvider`] wrapper that retries transient backend failures
//! with bounded exponential backoff.

pub mod error;
pub mod memory;
pub mod provider;
pub mod retry;

pub use error::StoreError;
pub use memory::InMemoryNeighborStore;
pub use provider::{NeighborHit, NeighborProvider};
pub use retry::{RetryPolicy, RetryingProvider};
