//! # chord-recommend
//!
//! The two recommender engines of the chord review platform:
//!
//! - [`ContentEngine`]: TF-IDF over review text, ranked by angular distance
//!   to the average vector of the user's liked items.
//! - [`CollabEngine`]: user-user cosine similarity over a dense rating
//!   matrix, with a social-follow boost, ranked by predicted score.
//!
//! [`SessionRecommender`] runs both at session start and merges the lists.
//!
//! All derived state (vocabulary, IDF, vectors, matrix) is generation-scoped:
//! rebuilt from the current catalog snapshot on every request and discarded
//! afterwards. Nothing is persisted or updated incrementally.

pub mod collab;
pub mod content;
pub mod session;

mod tokenize;

pub use collab::CollabEngine;
pub use content::ContentEngine;
pub use session::SessionRecommender;
