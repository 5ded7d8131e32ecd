use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::RecommendError;
use crate::models::{ItemRef, UserId};

/// A validated star rating in `[1, 5]`.
///
/// Construction is the only gate: an out-of-range value is rejected
/// immediately, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RecommendError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecommendError::RatingOutOfRange { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's review of an item. Immutable once created, except the like count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author: UserId,
    pub target: ItemRef,
    pub text: String,
    pub rating: Rating,
    likes: u32,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// A fresh review with zero likes, stamped now.
    pub fn new(author: UserId, target: ItemRef, text: impl Into<String>, rating: Rating) -> Self {
        Self {
            author,
            target,
            text: text.into(),
            rating,
            likes: 0,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate an existing review, e.g. from the storage collaborator.
    pub fn from_parts(
        author: UserId,
        target: ItemRef,
        text: impl Into<String>,
        rating: Rating,
        likes: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author,
            target,
            text: text.into(),
            rating,
            likes,
            created_at,
        }
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn like(&mut self) {
        self.likes += 1;
    }

    pub fn unlike(&mut self) {
        self.likes = self.likes.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, ItemKind};

    #[test]
    fn ratings_one_through_five_succeed() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn out_of_range_ratings_fail() {
        assert!(matches!(
            Rating::new(0),
            Err(RecommendError::RatingOutOfRange { value: 0 })
        ));
        assert!(matches!(
            Rating::new(6),
            Err(RecommendError::RatingOutOfRange { value: 6 })
        ));
    }

    #[test]
    fn rating_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("6").is_err());
    }

    #[test]
    fn rehydration_preserves_likes_and_timestamp() {
        use chrono::TimeZone;

        let target = ItemRef::new(ItemKind::Album, ItemId(2));
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let review =
            Review::from_parts(UserId(7), target, "warm", Rating::new(5).unwrap(), 3, stamp);
        assert_eq!(review.likes(), 3);
        assert_eq!(review.created_at, stamp);
    }

    #[test]
    fn unlike_saturates_at_zero() {
        let target = ItemRef::new(ItemKind::Song, ItemId(1));
        let mut review = Review::new(UserId(1), target, "solid", Rating::new(4).unwrap());
        review.unlike();
        assert_eq!(review.likes(), 0);
        review.like();
        review.like();
        review.unlike();
        assert_eq!(review.likes(), 1);
    }
}
