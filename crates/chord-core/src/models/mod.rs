//! Model types shared across the workspace.

mod item;
mod review;

pub use item::{Item, ItemCounts, ItemId, ItemKind, ItemRef};
pub use review::{Rating, Review};

use serde::{Deserialize, Serialize};

/// Numeric user identifier as issued by the account collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}
