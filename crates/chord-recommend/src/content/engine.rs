//! ContentEngine: orchestrates the TF-IDF pipeline.
//!
//! prepare corpus → liked items → batched vectors → average preference
//! vector → angular-distance ranking → top-k.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use chord_core::config::RecommendConfig;
use chord_core::errors::ChordResult;
use chord_core::models::{Item, ItemRef, UserId};
use chord_core::traits::{ICatalogStore, IRecommender};

use crate::content::batch::BatchScheduler;
use crate::content::corpus::Generation;
use crate::content::vectorize::angle_degrees;

/// Content-based recommender: ranks unliked items by the angle between
/// their TF-IDF vector and the average vector of the user's liked items
/// (smaller angle = more similar).
pub struct ContentEngine {
    catalog: Arc<dyn ICatalogStore>,
    config: RecommendConfig,
    generation: Mutex<Arc<Generation>>,
}

impl ContentEngine {
    pub fn new(catalog: Arc<dyn ICatalogStore>, config: RecommendConfig) -> Self {
        Self {
            catalog,
            config,
            generation: Mutex::new(Arc::new(Generation::new())),
        }
    }

    /// Drop the current generation. The next request rebuilds vocabulary,
    /// IDF, and vectors from the then-current catalog snapshot. Idempotent.
    pub fn invalidate(&self) {
        let mut current = self
            .generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Arc::new(Generation::new());
    }

    fn current_generation(&self) -> Arc<Generation> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Items the user rated at or above the like threshold, in review order.
    /// Reviews pointing at unknown items are logged and skipped.
    fn liked_items(
        &self,
        user: UserId,
        known: &HashSet<ItemRef>,
    ) -> ChordResult<Vec<ItemRef>> {
        let mut liked = Vec::new();
        for review in self.catalog.reviews_by_user(user)? {
            if review.rating.value() < self.config.like_threshold {
                continue;
            }
            if known.contains(&review.target) {
                liked.push(review.target);
            } else {
                warn!(user = %user, target = %review.target, "review targets an unknown item; skipped");
            }
        }
        Ok(liked)
    }

    pub fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        let items = self.catalog.all_items()?;
        debug!(user = %user, items = items.len(), "content recommendation start");

        let generation = self.current_generation();
        generation.prepare(self.catalog.as_ref(), &items)?;

        let known: HashSet<ItemRef> = items.iter().map(Item::item_ref).collect();
        let liked = self.liked_items(user, &known)?;
        if liked.is_empty() {
            debug!(user = %user, "no liked items; no preference vector to form");
            return Ok(Vec::new());
        }

        let index = generation.index()?;
        let vectors =
            BatchScheduler::from_config(&self.config).run(&self.catalog, &index, &items);

        // Average preference vector over the liked items that got a vector.
        let mut average = vec![0.0; index.vocabulary_len()];
        let mut contributing = 0usize;
        for item_ref in &liked {
            let Some(vector) = vectors.get(item_ref) else {
                continue;
            };
            for (sum, value) in average.iter_mut().zip(vector) {
                *sum += value;
            }
            contributing += 1;
        }
        if contributing == 0 {
            warn!(user = %user, "no liked item produced a vector; empty result");
            return Ok(Vec::new());
        }
        for value in &mut average {
            *value /= contributing as f64;
        }

        let liked_set: HashSet<ItemRef> = liked.iter().copied().collect();
        let mut scored: Vec<(Item, f64)> = Vec::new();
        for item in items {
            if liked_set.contains(&item.item_ref()) {
                continue;
            }
            let Some(vector) = vectors.get(&item.item_ref()) else {
                continue;
            };
            if let Some(angle) = angle_degrees(&average, vector) {
                scored.push((item, angle));
            }
        }

        // Stable ascending sort keeps catalog order on equal angles.
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        info!(
            user = %user,
            liked = liked_set.len(),
            returned = scored.len(),
            "content ranking complete"
        );
        Ok(scored.into_iter().map(|(item, _)| item).collect())
    }
}

impl IRecommender for ContentEngine {
    fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        ContentEngine::recommend(self, user, k)
    }
}
