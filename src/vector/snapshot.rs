//! Shared Store Snapshots
//!
//! Readers take an `Arc` to the current store and query it without holding
//! a lock; a reload builds a new store and publishes it with one swap.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use super::embedding_store::{EmbeddingStore, LoadOptions, LoadReport};
use crate::error::Result;

/// Handle to the currently published [`EmbeddingStore`]
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    current: Arc<RwLock<Arc<EmbeddingStore>>>,
}

impl SharedStore {
    pub fn new(store: EmbeddingStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// The store as of now. Later publishes do not affect it.
    pub fn snapshot(&self) -> Arc<EmbeddingStore> {
        Arc::clone(&*self.current.read())
    }

    /// Replace the published store
    pub fn publish(&self, store: EmbeddingStore) {
        *self.current.write() = Arc::new(store);
    }

    /// Load `path` into a fresh store and publish it. On failure the
    /// published store is left as it was.
    pub fn reload(&self, path: &Path, options: &LoadOptions) -> Result<LoadReport> {
        let mut fresh = EmbeddingStore::new();
        let report = fresh.load_file(path, options)?;
        self.publish(fresh);
        Ok(report)
    }
}
