//! Error types for the chord workspace.
//!
//! One enum per subsystem, unified under [`ChordError`].

mod catalog_error;
mod recommend_error;

pub use catalog_error::CatalogError;
pub use recommend_error::RecommendError;

/// Top-level error for the chord workspace.
#[derive(Debug, thiserror::Error)]
pub enum ChordError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

/// Workspace-wide result alias.
pub type ChordResult<T> = Result<T, ChordError>;
