//! Recommender configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod defaults {
    /// Items vectorized concurrently per batch.
    pub const BATCH_SIZE: usize = 6;
    /// Hard wait per batch before unfinished items are abandoned.
    pub const BATCH_TIMEOUT_SECS: u64 = 60;
    /// Minimum rating for a review to count as a "like".
    pub const LIKE_THRESHOLD: u8 = 3;
    /// Similarity multiplier for followed users.
    pub const FOLLOW_BOOST: f64 = 1.25;
    /// Default recommendation list length.
    pub const TOP_K: usize = 10;
}

/// Tuning knobs for both recommender engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Content engine: items vectorized concurrently per batch.
    pub batch_size: usize,
    /// Content engine: hard wait per batch (seconds).
    pub batch_timeout_secs: u64,
    /// Content engine: minimum rating for a review to count as a "like".
    pub like_threshold: u8,
    /// Collaborative engine: similarity multiplier for followed users.
    pub follow_boost: f64,
    /// Default recommendation list length.
    pub top_k: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            batch_timeout_secs: defaults::BATCH_TIMEOUT_SECS,
            like_threshold: defaults::LIKE_THRESHOLD,
            follow_boost: defaults::FOLLOW_BOOST,
            top_k: defaults::TOP_K,
        }
    }
}

impl RecommendConfig {
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_timeout_secs)
    }
}
