use std::collections::HashSet;

use crate::errors::ChordResult;
use crate::models::{Item, ItemCounts, ItemId, ItemKind, ItemRef, Review, UserId};

/// Read-only view of the review platform's storage, as the recommenders
/// consume it. Implementations own persistence, auth, and everything else;
/// the engines only ever read through this trait.
///
/// Every call observes one snapshot of the data; the engines rebuild all
/// derived state (vocabulary, vectors, rating matrix) per request, so no
/// change notification is needed.
pub trait ICatalogStore: Send + Sync {
    /// All songs, albums, and artists, in a stable order for a fixed snapshot.
    fn all_items(&self) -> ChordResult<Vec<Item>>;

    /// All reviews targeting an item.
    fn reviews_for(&self, item: &ItemRef) -> ChordResult<Vec<Review>>;

    /// All reviews authored by a user.
    fn reviews_by_user(&self, user: UserId) -> ChordResult<Vec<Review>>;

    /// Users followed by `user` (social graph lookup).
    fn followed_user_ids(&self, user: UserId) -> ChordResult<HashSet<UserId>>;

    /// Per-kind catalog sizes, used to lay out rating-matrix columns.
    fn item_counts(&self) -> ChordResult<ItemCounts>;

    /// Map a `(kind, id)` pair back to the concrete item.
    fn resolve_item(&self, kind: ItemKind, id: ItemId) -> ChordResult<Item>;

    /// All known users, in a stable order for a fixed snapshot. Row order of
    /// the rating matrix follows this order.
    fn user_ids(&self) -> ChordResult<Vec<UserId>>;
}
