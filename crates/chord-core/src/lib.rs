//! # chord-core
//!
//! Foundation crate for the chord recommendation system.
//! Defines the model types, the storage-collaborator trait, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RecommendConfig;
pub use errors::{ChordError, ChordResult};
pub use models::{Item, ItemCounts, ItemId, ItemKind, ItemRef, Rating, Review, UserId};
pub use traits::{ICatalogStore, IRecommender};
