use crate::errors::ChordResult;
use crate::models::{Item, UserId};

/// A recommendation engine: ranked top-`k` items for a user.
///
/// An empty list is a valid, silent outcome (new user, no reviews yet).
pub trait IRecommender: Send + Sync {
    fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>>;
}
