//! In-memory catalog fixtures for chord tests.
//!
//! [`CatalogBuilder`] assembles a deterministic catalog snapshot; the
//! resulting [`InMemoryCatalog`] implements `ICatalogStore` the way the
//! real storage collaborator would, including injectable read failures.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use chord_core::errors::{CatalogError, ChordResult};
use chord_core::models::{
    Item, ItemCounts, ItemId, ItemKind, ItemRef, Rating, Review, UserId,
};
use chord_core::traits::ICatalogStore;

/// Builder for an [`InMemoryCatalog`]. Item ids are assigned 1-based per
/// kind, in insertion order; users are registered from reviews and follows.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: Vec<Item>,
    reviews: Vec<Review>,
    follows: HashMap<UserId, HashSet<UserId>>,
    users: BTreeSet<UserId>,
    poisoned: HashSet<ItemRef>,
    delays: HashMap<ItemRef, Duration>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_item(mut self, kind: ItemKind, name: impl Into<String>) -> Self {
        let next = self.items.iter().filter(|i| i.kind == kind).count() as u32 + 1;
        self.items.push(Item::new(kind, ItemId(next), name));
        self
    }

    pub fn song(self, name: impl Into<String>) -> Self {
        self.add_item(ItemKind::Song, name)
    }

    pub fn album(self, name: impl Into<String>) -> Self {
        self.add_item(ItemKind::Album, name)
    }

    pub fn artist(self, name: impl Into<String>) -> Self {
        self.add_item(ItemKind::Artist, name)
    }

    /// Register a user without any reviews.
    pub fn user(mut self, user: u32) -> Self {
        self.users.insert(UserId(user));
        self
    }

    /// Add a review; the author is registered as a user.
    ///
    /// # Panics
    /// Panics on a rating outside `[1, 5]`; fixtures are built from
    /// literals, so that is a test bug.
    pub fn review(mut self, user: u32, kind: ItemKind, id: u32, rating: u8, text: &str) -> Self {
        let author = UserId(user);
        self.users.insert(author);
        self.reviews.push(Review::new(
            author,
            ItemRef::new(kind, ItemId(id)),
            text,
            Rating::new(rating).expect("fixture rating in 1..=5"),
        ));
        self
    }

    /// `follower` follows `followed`; both are registered as users.
    pub fn follow(mut self, follower: u32, followed: u32) -> Self {
        self.users.insert(UserId(follower));
        self.users.insert(UserId(followed));
        self.follows
            .entry(UserId(follower))
            .or_default()
            .insert(UserId(followed));
        self
    }

    /// Make reads of this item's reviews fail, to exercise error paths.
    pub fn poison_reviews(mut self, kind: ItemKind, id: u32) -> Self {
        self.poisoned.insert(ItemRef::new(kind, ItemId(id)));
        self
    }

    /// Make reads of this item's reviews block for `delay`, to exercise
    /// deadline paths.
    pub fn delay_reviews(mut self, kind: ItemKind, id: u32, delay: Duration) -> Self {
        self.delays.insert(ItemRef::new(kind, ItemId(id)), delay);
        self
    }

    pub fn build(self) -> InMemoryCatalog {
        InMemoryCatalog {
            items: self.items,
            reviews: self.reviews,
            follows: self.follows,
            users: self.users.into_iter().collect(),
            poisoned: self.poisoned,
            delays: self.delays,
        }
    }
}

/// A fixed catalog snapshot backed by vectors.
#[derive(Debug)]
pub struct InMemoryCatalog {
    items: Vec<Item>,
    reviews: Vec<Review>,
    follows: HashMap<UserId, HashSet<UserId>>,
    users: Vec<UserId>,
    poisoned: HashSet<ItemRef>,
    delays: HashMap<ItemRef, Duration>,
}

impl ICatalogStore for InMemoryCatalog {
    fn all_items(&self) -> ChordResult<Vec<Item>> {
        Ok(self.items.clone())
    }

    fn reviews_for(&self, item: &ItemRef) -> ChordResult<Vec<Review>> {
        if let Some(delay) = self.delays.get(item) {
            std::thread::sleep(*delay);
        }
        if self.poisoned.contains(item) {
            return Err(CatalogError::ReadFailed {
                reason: format!("poisoned fixture item {item}"),
            }
            .into());
        }
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.target == *item)
            .cloned()
            .collect())
    }

    fn reviews_by_user(&self, user: UserId) -> ChordResult<Vec<Review>> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.author == user)
            .cloned()
            .collect())
    }

    fn followed_user_ids(&self, user: UserId) -> ChordResult<HashSet<UserId>> {
        Ok(self.follows.get(&user).cloned().unwrap_or_default())
    }

    fn item_counts(&self) -> ChordResult<ItemCounts> {
        let mut counts = ItemCounts::default();
        for item in &self.items {
            match item.kind {
                ItemKind::Song => counts.songs += 1,
                ItemKind::Album => counts.albums += 1,
                ItemKind::Artist => counts.artists += 1,
            }
        }
        Ok(counts)
    }

    fn resolve_item(&self, kind: ItemKind, id: ItemId) -> ChordResult<Item> {
        self.items
            .iter()
            .find(|i| i.kind == kind && i.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::MissingItem { kind, id }.into())
    }

    fn user_ids(&self) -> ChordResult<Vec<UserId>> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based_per_kind() {
        let catalog = CatalogBuilder::new()
            .song("s1")
            .album("a1")
            .song("s2")
            .build();
        let items = catalog.all_items().unwrap();
        assert_eq!(items[0].item_ref(), ItemRef::new(ItemKind::Song, ItemId(1)));
        assert_eq!(items[1].item_ref(), ItemRef::new(ItemKind::Album, ItemId(1)));
        assert_eq!(items[2].item_ref(), ItemRef::new(ItemKind::Song, ItemId(2)));
    }

    #[test]
    fn poisoned_items_fail_review_reads() {
        let catalog = CatalogBuilder::new()
            .song("s1")
            .poison_reviews(ItemKind::Song, 1)
            .build();
        assert!(catalog
            .reviews_for(&ItemRef::new(ItemKind::Song, ItemId(1)))
            .is_err());
    }

    #[test]
    fn users_are_registered_in_sorted_order() {
        let catalog = CatalogBuilder::new()
            .song("s1")
            .review(3, ItemKind::Song, 1, 4, "")
            .review(1, ItemKind::Song, 1, 4, "")
            .follow(2, 3)
            .build();
        assert_eq!(
            catalog.user_ids().unwrap(),
            vec![UserId(1), UserId(2), UserId(3)]
        );
    }
}
