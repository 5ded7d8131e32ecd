//! Traits at the seams of the system: the read-only storage collaborator
//! and the recommender entry point.

mod catalog;
mod recommender;

pub use catalog::ICatalogStore;
pub use recommender::IRecommender;
