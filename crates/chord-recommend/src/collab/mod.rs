//! Collaborative filtering: user-user similarity over a dense rating matrix.

pub mod engine;
pub mod matrix;
pub mod similarity;

pub use engine::CollabEngine;
