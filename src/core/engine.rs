use std::sync::Arc;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::IndexStats;
use crate::core::types::{DocId, Document};
use crate::index::lifecycle::IndexLifecycleManager;
use crate::search::results::hydrate;
use crate::search::trending::TrendingRanker;
use crate::storage::store::DocumentStore;

/// Search and trending service over a caller-supplied document store.
///
/// Owns its index; create one per store and share it behind an `Arc`.
pub struct SearchEngine {
    config: Config,
    store: Arc<dyn DocumentStore>,
    lifecycle: IndexLifecycleManager,
    ranker: TrendingRanker,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let lifecycle = IndexLifecycleManager::new(store.clone(), &config);
        SearchEngine {
            config,
            store,
            lifecycle,
            ranker: TrendingRanker::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuild the index from the store now.
    /// On failure the previous index keeps serving.
    pub fn build_or_refresh(&self) -> Result<()> {
        self.lifecycle.rebuild()
    }

    /// Index a newly created document
    pub fn index_one(&self, doc: &Document) -> Result<()> {
        self.lifecycle.on_document_created(doc)
    }

    /// Drop a deleted document from the index
    pub fn remove_one(&self, id: &DocId) {
        self.lifecycle.on_document_deleted(id)
    }

    /// Ids of documents containing every query term. Order carries no
    /// meaning; use [`SearchEngine::search_documents`] for a stable order.
    pub fn search(&self, query: &str) -> Result<Vec<DocId>> {
        self.lifecycle.search(query)
    }

    /// Matching documents fetched from the store, newest first
    pub fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        let ids = self.search(query)?;
        hydrate(self.store.as_ref(), &ids)
    }

    /// The `k` highest-engagement documents of `documents`, best first
    pub fn top_k(&self, documents: &[Document], k: usize) -> Vec<Document> {
        self.ranker.top_k(documents, k).into_iter().cloned().collect()
    }

    /// Top `trending_limit` documents across the whole store
    pub fn trending(&self) -> Result<Vec<Document>> {
        let documents = self.store.fetch_all()?;
        Ok(self.ranker.top_k_owned(documents, self.config.trending_limit))
    }

    pub fn stats(&self) -> IndexStats {
        self.lifecycle.stats()
    }
}
