//! Session-start recommendations: both engines, merged.
//!
//! The two engines run as independent background computations triggered once
//! per session start. One engine failing degrades to the other's list; both
//! failing surfaces the content engine's error.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::warn;

use chord_core::config::RecommendConfig;
use chord_core::errors::ChordResult;
use chord_core::models::{Item, ItemRef, UserId};
use chord_core::traits::{ICatalogStore, IRecommender};

use crate::collab::CollabEngine;
use crate::content::ContentEngine;

/// Owns both engines and merges their output into one de-duplicated list,
/// content recommendations first.
pub struct SessionRecommender {
    content: Arc<ContentEngine>,
    collab: Arc<CollabEngine>,
    config: RecommendConfig,
}

impl SessionRecommender {
    pub fn new(catalog: Arc<dyn ICatalogStore>, config: RecommendConfig) -> Self {
        Self {
            content: Arc::new(ContentEngine::new(Arc::clone(&catalog), config.clone())),
            collab: Arc::new(CollabEngine::new(catalog, config.clone())),
            config,
        }
    }

    /// Session-start entry point with the configured list length.
    pub fn recommend_for_session(&self, user: UserId) -> ChordResult<Vec<Item>> {
        self.recommend_at_session_start(user, self.config.top_k)
    }

    /// Run both engines on background threads, join, merge. Blocks the
    /// calling thread; callers that must not block use [`Self::spawn`].
    pub fn recommend_at_session_start(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        let content = Arc::clone(&self.content);
        let content_handle = thread::spawn(move || content.recommend(user, k));
        let collab = Arc::clone(&self.collab);
        let collab_handle = thread::spawn(move || collab.recommend(user, k));

        let content_result = join_engine(content_handle, "content");
        let collab_result = join_engine(collab_handle, "collaborative");

        merge(content_result, collab_result, k)
    }

    /// Fire-and-collect variant for callers that own their own scheduling.
    pub fn spawn(self: &Arc<Self>, user: UserId, k: usize) -> JoinHandle<ChordResult<Vec<Item>>> {
        let this = Arc::clone(self);
        thread::spawn(move || this.recommend_at_session_start(user, k))
    }

    /// Invalidate the content generation; the collaborative engine holds no
    /// cross-request state. Idempotent.
    pub fn invalidate(&self) {
        self.content.invalidate();
    }
}

impl IRecommender for SessionRecommender {
    fn recommend(&self, user: UserId, k: usize) -> ChordResult<Vec<Item>> {
        self.recommend_at_session_start(user, k)
    }
}

fn join_engine(
    handle: JoinHandle<ChordResult<Vec<Item>>>,
    engine: &str,
) -> Option<ChordResult<Vec<Item>>> {
    match handle.join() {
        Ok(result) => Some(result),
        Err(_) => {
            warn!(engine, "engine thread panicked; treating as no result");
            None
        }
    }
}

/// Merge content-first, de-duplicate by `(id, kind)`, truncate to `k`.
/// An engine error is logged and degrades to the other engine's list.
fn merge(
    content: Option<ChordResult<Vec<Item>>>,
    collab: Option<ChordResult<Vec<Item>>>,
    k: usize,
) -> ChordResult<Vec<Item>> {
    let mut lists = Vec::new();
    let mut first_error = None;

    for (result, engine) in [(content, "content"), (collab, "collaborative")] {
        match result {
            Some(Ok(items)) => lists.push(items),
            Some(Err(err)) => {
                warn!(engine, error = %err, "engine failed; degrading to the other engine");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
            None => {}
        }
    }

    if lists.is_empty() {
        return match first_error {
            Some(err) => Err(err),
            None => Ok(Vec::new()),
        };
    }

    let mut seen: HashSet<ItemRef> = HashSet::new();
    let mut merged = Vec::new();
    for item in lists.into_iter().flatten() {
        if seen.insert(item.item_ref()) {
            merged.push(item);
        }
        if merged.len() == k {
            break;
        }
    }
    Ok(merged)
}
