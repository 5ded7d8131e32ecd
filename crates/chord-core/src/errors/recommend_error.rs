use crate::models::UserId;

/// Recommender subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { value: u8 },

    #[error("corpus index not prepared for this generation")]
    CorpusNotPrepared,

    #[error("{user} has no row in the rating matrix")]
    UnknownUser { user: UserId },
}
