//! Vocabulary and IDF table for one recommendation generation.
//!
//! The index is built exactly once per [`Generation`] and shared read-only
//! afterwards. Nothing here outlives the generation: a new request gets a
//! fresh build over the then-current catalog snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use chord_core::errors::{ChordResult, RecommendError};
use chord_core::models::Item;
use chord_core::traits::ICatalogStore;

use crate::tokenize::tokens;

/// Global term set and per-term IDF for one generation.
///
/// Vocabulary order is insertion order over the catalog's item iteration, so
/// every vector of the same generation indexes terms identically.
#[derive(Debug)]
pub struct CorpusIndex {
    vocabulary: Vec<String>,
    idf: HashMap<String, f64>,
}

impl CorpusIndex {
    /// One pass over every item's reviews: collect the insertion-ordered
    /// vocabulary and per-item unique-token sets, then derive
    /// `idf(term) = ln(total_items / doc_freq(term))`.
    pub fn build(catalog: &dyn ICatalogStore, items: &[Item]) -> ChordResult<Self> {
        let mut vocabulary = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for item in items {
            let mut unique: HashSet<String> = HashSet::new();
            for review in catalog.reviews_for(&item.item_ref())? {
                for token in tokens(&review.text) {
                    if seen.insert(token.clone()) {
                        vocabulary.push(token.clone());
                    }
                    unique.insert(token);
                }
            }
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let total = items.len() as f64;
        let idf = doc_freq
            .into_iter()
            .map(|(term, df)| (term, (total / df as f64).ln()))
            .collect();

        debug!(terms = vocabulary.len(), items = items.len(), "corpus index built");
        Ok(Self { vocabulary, idf })
    }

    /// Vocabulary size == length of every vector in this generation.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms in vocabulary (vector) order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    /// IDF of a term, 0.0 for terms outside the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }
}

/// One recommendation generation: an exactly-once corpus preparation.
///
/// `prepare` may be called from any number of threads; the first build wins
/// and later calls are no-ops. Replaces the process-wide mutable cache of
/// earlier designs, so concurrent requests for different users each work
/// against their own self-consistent snapshot.
#[derive(Debug, Default)]
pub struct Generation {
    index: OnceLock<Arc<CorpusIndex>>,
    build_lock: Mutex<()>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the corpus index if this generation has none yet. No-op when
    /// already prepared or when there are no items at all.
    pub fn prepare(&self, catalog: &dyn ICatalogStore, items: &[Item]) -> ChordResult<()> {
        if self.index.get().is_some() || items.is_empty() {
            return Ok(());
        }
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Lost the race: another thread finished the build while we waited.
        if self.index.get().is_some() {
            return Ok(());
        }
        let built = CorpusIndex::build(catalog, items)?;
        let _ = self.index.set(Arc::new(built));
        Ok(())
    }

    /// The prepared index, shared for the lifetime of the generation.
    pub fn index(&self) -> ChordResult<Arc<CorpusIndex>> {
        self.index
            .get()
            .cloned()
            .ok_or_else(|| RecommendError::CorpusNotPrepared.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chord_core::models::ItemKind;

    use test_fixtures::CatalogBuilder;

    #[test]
    fn vocabulary_keeps_insertion_order() {
        let catalog = CatalogBuilder::new()
            .song("A")
            .song("B")
            .review(1, ItemKind::Song, 1, 4, "great solo great tone")
            .review(1, ItemKind::Song, 2, 4, "slow tone")
            .build();
        let items = catalog.all_items().unwrap();
        let index = CorpusIndex::build(&catalog, &items).unwrap();
        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, ["great", "solo", "tone", "slow"]);
    }

    #[test]
    fn idf_is_log_of_inverse_document_frequency() {
        let catalog = CatalogBuilder::new()
            .song("A")
            .song("B")
            .review(1, ItemKind::Song, 1, 4, "great")
            .review(1, ItemKind::Song, 2, 4, "slow")
            .build();
        let items = catalog.all_items().unwrap();
        let index = CorpusIndex::build(&catalog, &items).unwrap();
        // 2 items, each term in exactly 1 document.
        assert!((index.idf("great") - 2.0_f64.ln()).abs() < 1e-12);
        assert!((index.idf("slow") - 2.0_f64.ln()).abs() < 1e-12);
        assert_eq!(index.idf("absent"), 0.0);
    }

    #[test]
    fn prepare_is_a_no_op_without_items() {
        let catalog = CatalogBuilder::new().build();
        let generation = Generation::new();
        generation.prepare(&catalog, &[]).unwrap();
        assert!(generation.index().is_err());
    }

    #[test]
    fn prepare_builds_exactly_once() {
        let catalog = CatalogBuilder::new()
            .song("A")
            .review(1, ItemKind::Song, 1, 4, "great")
            .build();
        let items = catalog.all_items().unwrap();
        let generation = Generation::new();
        generation.prepare(&catalog, &items).unwrap();
        let first = generation.index().unwrap();
        generation.prepare(&catalog, &items).unwrap();
        let second = generation.index().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.vocabulary_len(), 1);
    }

    #[test]
    fn racing_prepares_settle_on_a_single_index() {
        let catalog = CatalogBuilder::new()
            .song("A")
            .song("B")
            .review(1, ItemKind::Song, 1, 4, "great solo")
            .review(1, ItemKind::Song, 2, 4, "slow tone")
            .build();
        let items = catalog.all_items().unwrap();
        let generation = Generation::new();

        let indices: Vec<Arc<CorpusIndex>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        generation.prepare(&catalog, &items).unwrap();
                        generation.index().unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("prepare thread"))
                .collect()
        });

        for index in &indices[1..] {
            assert!(Arc::ptr_eq(&indices[0], index));
        }
        assert_eq!(indices[0].vocabulary_len(), 4);
    }
}
