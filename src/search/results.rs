use std::cmp::Ordering;
use crate::core::error::Result;
use crate::core::types::{DocId, Document};
use crate::storage::store::DocumentStore;

/// Newest first; equal timestamps fall back to id order
pub fn by_recency(a: &Document, b: &Document) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
}

/// Turn matched ids back into documents, newest first.
///
/// The index may be stale: ids the store no longer has are dropped.
pub fn hydrate(store: &dyn DocumentStore, ids: &[DocId]) -> Result<Vec<Document>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut documents = store.fetch_many(ids)?;
    documents.sort_by(by_recency);
    Ok(documents)
}
