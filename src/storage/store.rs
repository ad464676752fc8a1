use std::collections::HashSet;
use crate::core::error::Result;
use crate::core::types::{DocId, Document};

/// The document source the index is built from.
///
/// The index may lag behind the store; implementations need not offer
/// read-your-writes, which is why the lifecycle manager adds newly created
/// documents directly.
pub trait DocumentStore: Send + Sync {
    /// Every document currently in the store
    fn fetch_all(&self) -> Result<Vec<Document>>;

    /// Documents for `ids`; ids the store no longer has are skipped
    fn fetch_many(&self, ids: &[DocId]) -> Result<Vec<Document>> {
        let wanted: HashSet<&DocId> = ids.iter().collect();
        Ok(self
            .fetch_all()?
            .into_iter()
            .filter(|doc| wanted.contains(&doc.id))
            .collect())
    }
}
