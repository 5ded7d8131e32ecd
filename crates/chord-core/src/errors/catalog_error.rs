use crate::models::{ItemId, ItemKind};

/// Storage-collaborator errors. A read failure is fatal to the single
/// request being served, never to the process.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog read failed: {reason}")]
    ReadFailed { reason: String },

    #[error("no {kind} with id {id}")]
    MissingItem { kind: ItemKind, id: ItemId },
}
