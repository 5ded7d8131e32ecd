//! Content-based recommendation: TF-IDF over review text.

pub mod batch;
pub mod corpus;
pub mod engine;
pub mod vectorize;

pub use engine::ContentEngine;
