//! CollabEngine: rating-pattern recommendations.
//!
//! Single-threaded O(users² × items) pass per request; acceptable because
//! the matrix is rebuilt on demand, not on every mutation.

use std::sync::Arc;

use tracing::{debug, info};

use chord_core::config::RecommendConfig;
use chord_core::errors::{ChordResult, RecommendError};
use chord_core::models::{Item, UserId};
use chord_core::traits::{ICatalogStore, IRecommender};

use crate::collab::matrix::RatingMatrix;
use crate::collab::similarity::{predict, user_similarity};

/// Collaborative recommender: predicts scores for a user's unrated items
/// from similar users' ratings and returns the highest-scoring items.
pub struct CollabEngine {
    catalog: Arc<dyn ICatalogStore>,
    config: RecommendConfig,
}

impl CollabEngine {
    pub fn new(catalog: Arc<dyn ICatalogStore>, config: RecommendConfig) -> Self {
        Self { catalog, config }
    }

    pub fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        let matrix = RatingMatrix::build(self.catalog.as_ref())?;
        let target_row = matrix
            .row_of(user)
            .ok_or(RecommendError::UnknownUser { user })?;
        debug!(user = %user, rows = matrix.rows(), cols = matrix.cols(), "collaborative pass start");

        let similarity = user_similarity(
            &matrix,
            self.catalog.as_ref(),
            user,
            target_row,
            self.config.follow_boost,
        )?;
        let predicted = predict(&matrix, &similarity, target_row);

        let mut ranked: Vec<(usize, f64)> = predicted.into_iter().enumerate().collect();
        // Stable descending sort keeps column order on equal scores.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut recommended = Vec::with_capacity(k.min(matrix.cols()));
        for (col, _score) in ranked.into_iter().take(k.min(matrix.cols())) {
            let item_ref = matrix.item_ref_of_col(col);
            recommended.push(self.catalog.resolve_item(item_ref.kind, item_ref.id)?);
        }

        info!(user = %user, returned = recommended.len(), "collaborative ranking complete");
        Ok(recommended)
    }
}

impl IRecommender for CollabEngine {
    fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        CollabEngine::recommend(self, user, k)
    }
}
