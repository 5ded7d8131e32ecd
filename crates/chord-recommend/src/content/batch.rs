//! Batched, bounded-parallel vector computation.
//!
//! Batches run strictly one after another; within a batch every item gets
//! its own task. Each batch waits behind a hard deadline: items whose task
//! fails or outlives the deadline simply end up without a vector and are
//! excluded from ranking, never fatal to the run.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::{debug, warn};

use chord_core::config::RecommendConfig;
use chord_core::models::{Item, ItemRef};
use chord_core::traits::ICatalogStore;

use crate::content::corpus::CorpusIndex;
use crate::content::vectorize;

/// Schedules TF-IDF vector computation in sequential, size-bounded batches.
pub struct BatchScheduler {
    batch_size: usize,
    timeout: std::time::Duration,
}

impl BatchScheduler {
    pub fn from_config(config: &RecommendConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            timeout: config.batch_timeout(),
        }
    }

    /// Compute TF-IDF vectors for `items`. The returned map holds one vector
    /// per item whose task completed in time; everything else is absent.
    pub fn run(
        &self,
        catalog: &Arc<dyn ICatalogStore>,
        index: &Arc<CorpusIndex>,
        items: &[Item],
    ) -> HashMap<ItemRef, Vec<f64>> {
        let mut vectors = HashMap::with_capacity(items.len());
        for batch in items.chunks(self.batch_size) {
            self.run_batch(catalog, index, batch, &mut vectors);
        }
        debug!(
            requested = items.len(),
            computed = vectors.len(),
            "vector batches complete"
        );
        vectors
    }

    fn run_batch(
        &self,
        catalog: &Arc<dyn ICatalogStore>,
        index: &Arc<CorpusIndex>,
        batch: &[Item],
        out: &mut HashMap<ItemRef, Vec<f64>>,
    ) {
        let deadline = Instant::now() + self.timeout;
        let (tx, rx) = bounded::<(ItemRef, Vec<f64>)>(batch.len());

        for item in batch {
            let tx = tx.clone();
            let catalog = Arc::clone(catalog);
            let index = Arc::clone(index);
            let item_ref = item.item_ref();
            thread::spawn(move || {
                match vectorize::term_frequency(catalog.as_ref(), &item_ref) {
                    Ok(tf) => {
                        let vector = vectorize::tf_idf_vector(&index, &tf);
                        // Receiver may have hit its deadline and moved on.
                        let _ = tx.send((item_ref, vector));
                    }
                    Err(err) => {
                        warn!(item = %item_ref, error = %err, "vectorization failed; item left unranked");
                    }
                }
            });
        }
        drop(tx);

        let mut received = 0usize;
        while received < batch.len() {
            match rx.recv_deadline(deadline) {
                Ok((item_ref, vector)) => {
                    out.insert(item_ref, vector);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        pending = batch.len() - received,
                        "batch deadline reached; unfinished items excluded from ranking"
                    );
                    break;
                }
                // All senders gone: the remaining tasks failed and logged.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}
