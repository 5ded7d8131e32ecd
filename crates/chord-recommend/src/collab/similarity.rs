//! User-user cosine similarity and weighted-average score prediction.

use tracing::debug;

use chord_core::errors::ChordResult;
use chord_core::models::UserId;
use chord_core::traits::ICatalogStore;

use crate::collab::matrix::RatingMatrix;

/// One similarity score per matrix row for the target user.
///
/// Cosine similarity restricted to the dimensions where both users have a
/// non-zero rating; no rated overlap means no signal (0.0). Followed users'
/// scores are multiplied by `follow_boost`. The target's own row is excluded
/// by value up front and stays 0.0.
pub fn user_similarity(
    matrix: &RatingMatrix,
    catalog: &dyn ICatalogStore,
    target: UserId,
    target_row: usize,
    follow_boost: f64,
) -> ChordResult<Vec<f64>> {
    let followed = catalog.followed_user_ids(target)?;
    let a = matrix.row(target_row);
    let mut scores = vec![0.0; matrix.rows()];

    for row in 0..matrix.rows() {
        if row == target_row {
            continue;
        }
        let b = matrix.row(row);

        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for (x, y) in a.iter().zip(b) {
            if *x != 0.0 && *y != 0.0 {
                dot += x * y;
                norm_a += x * x;
                norm_b += y * y;
            }
        }

        let mut similarity = if norm_a > 0.0 && norm_b > 0.0 {
            dot / (norm_a.sqrt() * norm_b.sqrt())
        } else {
            0.0
        };
        if followed.contains(&matrix.user_at(row)) {
            similarity *= follow_boost;
        }
        scores[row] = similarity;
    }

    debug!(target = %target, neighbors = scores.len().saturating_sub(1), "similarity pass complete");
    Ok(scores)
}

/// Predicted score per column for the target user's unrated items.
///
/// For each unrated column: weighted average of the other users' positive
/// ratings, weighted by similarity; denominator is the sum of absolute
/// similarity weights. Columns with no contributing neighbor score 0.0, and
/// columns the target already rated stay 0.0.
pub fn predict(matrix: &RatingMatrix, similarity: &[f64], target_row: usize) -> Vec<f64> {
    let mut predictions = vec![0.0; matrix.cols()];

    for (col, prediction) in predictions.iter_mut().enumerate() {
        if matrix.value(target_row, col) != 0.0 {
            continue;
        }
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for row in 0..matrix.rows() {
            if row == target_row {
                continue;
            }
            let rating = matrix.value(row, col);
            if rating > 0.0 {
                total += similarity[row] * rating;
                weight_sum += similarity[row].abs();
            }
        }
        if weight_sum > 0.0 {
            *prediction = total / weight_sum;
        }
    }

    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chord_core::models::ItemKind;
    use test_fixtures::CatalogBuilder;

    /// 2 users, 3 songs; user0 rates song1=5; user1 rates song1=5, song2=4.
    fn two_user_catalog() -> test_fixtures::InMemoryCatalog {
        CatalogBuilder::new()
            .song("one")
            .song("two")
            .song("three")
            .review(0, ItemKind::Song, 1, 5, "")
            .review(1, ItemKind::Song, 1, 5, "")
            .review(1, ItemKind::Song, 2, 4, "")
            .build()
    }

    #[test]
    fn similarity_uses_only_shared_dimensions() {
        let catalog = two_user_catalog();
        let matrix = RatingMatrix::build(&catalog).unwrap();
        let row0 = matrix.row_of(UserId(0)).unwrap();

        let scores = user_similarity(&matrix, &catalog, UserId(0), row0, 1.25).unwrap();
        // Overlap is song1 only: cosine = 25 / (5 * 5) = 1.0, no boost.
        let row1 = matrix.row_of(UserId(1)).unwrap();
        assert!((scores[row1] - 1.0).abs() < 1e-12);
        // Own row stays zero.
        assert_eq!(scores[row0], 0.0);
    }

    #[test]
    fn followed_neighbors_get_the_boost() {
        let catalog = CatalogBuilder::new()
            .song("one")
            .review(0, ItemKind::Song, 1, 5, "")
            .review(1, ItemKind::Song, 1, 5, "")
            .follow(0, 1)
            .build();
        let matrix = RatingMatrix::build(&catalog).unwrap();
        let row0 = matrix.row_of(UserId(0)).unwrap();
        let row1 = matrix.row_of(UserId(1)).unwrap();

        let scores = user_similarity(&matrix, &catalog, UserId(0), row0, 1.25).unwrap();
        assert!((scores[row1] - 1.25).abs() < 1e-12);
    }

    #[test]
    fn no_overlap_means_no_signal() {
        let catalog = CatalogBuilder::new()
            .song("one")
            .song("two")
            .review(0, ItemKind::Song, 1, 5, "")
            .review(1, ItemKind::Song, 2, 4, "")
            .build();
        let matrix = RatingMatrix::build(&catalog).unwrap();
        let row0 = matrix.row_of(UserId(0)).unwrap();
        let row1 = matrix.row_of(UserId(1)).unwrap();

        let scores = user_similarity(&matrix, &catalog, UserId(0), row0, 1.25).unwrap();
        assert_eq!(scores[row1], 0.0);
    }

    #[test]
    fn a_review_less_user_has_no_similarity_to_anyone() {
        // User 0 is registered without any reviews: an all-zero matrix row.
        let catalog = CatalogBuilder::new()
            .song("one")
            .user(0)
            .review(1, ItemKind::Song, 1, 5, "")
            .build();
        let matrix = RatingMatrix::build(&catalog).unwrap();
        let row0 = matrix.row_of(UserId(0)).unwrap();
        let row1 = matrix.row_of(UserId(1)).unwrap();

        let scores = user_similarity(&matrix, &catalog, UserId(0), row0, 1.25).unwrap();
        assert_eq!(scores[row1], 0.0);
    }

    #[test]
    fn prediction_is_a_similarity_weighted_average() {
        let catalog = two_user_catalog();
        let matrix = RatingMatrix::build(&catalog).unwrap();
        let row0 = matrix.row_of(UserId(0)).unwrap();
        let scores = user_similarity(&matrix, &catalog, UserId(0), row0, 1.25).unwrap();

        let predicted = predict(&matrix, &scores, row0);
        // song2: (1.0 * 4) / 1.0 = 4.0; song3 has no neighbor rating.
        assert!((predicted[1] - 4.0).abs() < 1e-12);
        assert_eq!(predicted[2], 0.0);
        // song1 is already rated by the target: never predicted.
        assert_eq!(predicted[0], 0.0);
    }
}
