//! Property tests for the recommender invariants.

use std::sync::Arc;

use proptest::prelude::*;

use chord_core::config::RecommendConfig;
use chord_core::models::{ItemKind, UserId};
use chord_core::traits::ICatalogStore;
use chord_recommend::content::corpus::CorpusIndex;
use chord_recommend::content::vectorize::{term_frequency, tf_idf_vector};
use chord_recommend::ContentEngine;
use test_fixtures::CatalogBuilder;

proptest! {
    /// TF values over any review text sum to 1, or the map is empty when
    /// the text holds no tokens.
    #[test]
    fn term_frequencies_sum_to_one_or_are_empty(text in ".{0,200}") {
        let catalog = CatalogBuilder::new()
            .song("only")
            .review(1, ItemKind::Song, 1, 4, &text)
            .build();
        let items = catalog.all_items().unwrap();
        let tf = term_frequency(&catalog, &items[0].item_ref()).unwrap();

        if !tf.is_empty() {
            let sum: f64 = tf.values().sum();
            prop_assert!((sum - 1.0).abs() < 1e-6, "tf sum was {sum}");
        }
    }

    /// Every vector of a generation has exactly the vocabulary's length.
    #[test]
    fn vectors_match_the_vocabulary_length(texts in prop::collection::vec(".{0,80}", 1..6)) {
        let mut builder = CatalogBuilder::new();
        for (i, _) in texts.iter().enumerate() {
            builder = builder.song(format!("song {i}"));
        }
        for (i, text) in texts.iter().enumerate() {
            builder = builder.review(1, ItemKind::Song, i as u32 + 1, 4, text);
        }
        let catalog = builder.build();
        let items = catalog.all_items().unwrap();
        let index = CorpusIndex::build(&catalog, &items).unwrap();

        for item in &items {
            let tf = term_frequency(&catalog, &item.item_ref()).unwrap();
            prop_assert_eq!(tf_idf_vector(&index, &tf).len(), index.vocabulary_len());
        }
    }

    /// The content engine never returns more than `min(k, candidates)`.
    #[test]
    fn content_recommendations_never_exceed_k(
        texts in prop::collection::vec("[a-z ]{0,40}", 2..7),
        k in 0usize..10,
    ) {
        let mut builder = CatalogBuilder::new();
        for (i, _) in texts.iter().enumerate() {
            builder = builder.song(format!("song {i}"));
        }
        // User 1 likes the first song; user 2 reviewed the rest.
        builder = builder.review(1, ItemKind::Song, 1, 5, &texts[0]);
        for (i, text) in texts.iter().enumerate().skip(1) {
            builder = builder.review(2, ItemKind::Song, i as u32 + 1, 4, text);
        }
        let engine = ContentEngine::new(Arc::new(builder.build()), RecommendConfig::default());

        let recommended = engine.recommend(UserId(1), k).unwrap();
        prop_assert!(recommended.len() <= k);
        prop_assert!(recommended.len() <= texts.len() - 1);
    }
}
