use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::RwLock;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document};
use crate::storage::store::DocumentStore;

/// In-process document store.
///
/// `set_failing(true)` makes every read fail, which lets callers exercise
/// index-build failure paths.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<DocId, Document>>,
    failing: AtomicBool,
    fetch_all_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let store = MemoryStore::new();
        for doc in documents {
            store.insert(doc);
        }
        store
    }

    /// Insert or replace; returns the previous version if any
    pub fn insert(&self, doc: Document) -> Option<Document> {
        self.documents.write().insert(doc.id, doc)
    }

    pub fn remove(&self, id: &DocId) -> Option<Document> {
        self.documents.write().remove(id)
    }

    pub fn get(&self, id: &DocId) -> Option<Document> {
        self.documents.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many bulk fetches have been served or attempted
    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::store("memory store is unavailable"));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Document>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.documents.read().values().cloned().collect())
    }

    fn fetch_many(&self, ids: &[DocId]) -> Result<Vec<Document>> {
        self.check_available()?;
        let documents = self.documents.read();
        Ok(ids.iter().filter_map(|id| documents.get(id).cloned()).collect())
    }
}
