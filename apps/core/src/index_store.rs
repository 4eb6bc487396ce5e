use std::sync::{Arc, RwLock};

use crate::model::SearchRecord;

/// Holds the current generation of search records. `replace` installs a new
/// generation as a single pointer swap; `snapshot` hands out the current one
/// without blocking refreshes in progress. Readers always see a complete
/// generation, never a mix of two.
pub struct IndexStore {
    generation: RwLock<Arc<Vec<SearchRecord>>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self {
            generation: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn replace(&self, records: Vec<SearchRecord>) {
        let next = Arc::new(records);
        // A poisoned lock only means a writer panicked mid-swap; the Arc
        // inside is still whole, so recover and keep serving.
        let mut guard = self
            .generation
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
    }

    pub fn snapshot(&self) -> Arc<Vec<SearchRecord>> {
        self.generation
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}
