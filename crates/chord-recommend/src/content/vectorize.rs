//! Per-item term-frequency maps, TF-IDF vectors, and angular distance.

use std::collections::HashMap;

use chord_core::errors::ChordResult;
use chord_core::models::ItemRef;
use chord_core::traits::ICatalogStore;

use crate::content::corpus::CorpusIndex;
use crate::tokenize::tokens;

/// Term frequency over all reviews of an item: occurrence count divided by
/// total token count. An item with zero tokens gets an empty map.
///
/// A catalog read failure is fatal to this item's vector only; the caller
/// decides whether the surrounding batch continues.
pub fn term_frequency(
    catalog: &dyn ICatalogStore,
    item: &ItemRef,
) -> ChordResult<HashMap<String, f64>> {
    let reviews = catalog.reviews_for(item)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    for review in &reviews {
        for token in tokens(&review.text) {
            *counts.entry(token).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return Ok(HashMap::new());
    }
    Ok(counts
        .into_iter()
        .map(|(term, count)| (term, count as f64 / total as f64))
        .collect())
}

/// TF-IDF vector over the generation's vocabulary, in vocabulary order.
/// Entry i = `tf(vocab[i]) * idf(vocab[i])`, 0.0 for absent terms.
pub fn tf_idf_vector(index: &CorpusIndex, tf: &HashMap<String, f64>) -> Vec<f64> {
    index
        .terms()
        .map(|term| tf.get(term).copied().unwrap_or(0.0) * index.idf(term))
        .collect()
}

/// Angle between two vectors in degrees, via cosine similarity.
/// `None` when either vector has zero magnitude: no signal, not an error.
pub fn angle_degrees(a: &[f64], b: &[f64]) -> Option<f64> {
    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return None;
    }

    let cos = (dot / (mag_a.sqrt() * mag_b.sqrt())).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
