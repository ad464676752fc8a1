use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use parking_lot::{Mutex, RwLock};
use crate::analysis::analyzer::Analyzer;
use crate::core::config::{Config, CreationPolicy};
use crate::core::error::{Error, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{DocId, Document};
use crate::index::inverted::InvertedIndex;
use crate::parallel::indexer::ParallelIndexer;
use crate::query::cache::{QueryCache, QueryKey};
use crate::storage::store::DocumentStore;

/// Published index snapshot and the generation it belongs to
struct Published {
    index: Arc<InvertedIndex>,
    generation: u64,
}

/// Owns the inverted index and decides when it is built, rebuilt or
/// patched.
///
/// Reads clone the published `Arc` and search without holding a lock.
/// Writes are serialised by `writer_lock`; incremental writes are
/// copy-on-write, and rebuilds build a new index off to the side and swap
/// it in, so a failed bulk fetch never leaves an emptied index behind.
///
/// Documents added through `on_document_created` are remembered until a
/// bulk fetch returns them, and are re-applied on top of every rebuild, so
/// a store that lags behind its writes cannot make them unsearchable.
pub struct IndexLifecycleManager {
    store: Arc<dyn DocumentStore>,
    analyzer: Analyzer,
    indexer: ParallelIndexer,
    policy: CreationPolicy,
    published: RwLock<Published>,
    initialized: AtomicBool,
    // Guards all writes; holds created documents no bulk fetch has returned yet
    writer_lock: Mutex<Vec<Document>>,
    next_generation: AtomicU64,
    cache: QueryCache,
}

impl IndexLifecycleManager {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        IndexLifecycleManager::with_analyzer(store, config, Analyzer::standard())
    }

    pub fn with_analyzer(store: Arc<dyn DocumentStore>, config: &Config, analyzer: Analyzer) -> Self {
        IndexLifecycleManager {
            store,
            analyzer,
            indexer: ParallelIndexer::new(config.parallel_build_threshold),
            policy: config.creation_policy,
            published: RwLock::new(Published {
                index: Arc::new(InvertedIndex::new()),
                generation: 0,
            }),
            initialized: AtomicBool::new(false),
            writer_lock: Mutex::new(Vec::new()),
            next_generation: AtomicU64::new(1),
            cache: QueryCache::new(config.query_cache_capacity),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Current snapshot of the index
    pub fn snapshot(&self) -> Arc<InvertedIndex> {
        self.published.read().index.clone()
    }

    /// Build from the store on first call; later calls do nothing, even if
    /// the store has changed since.
    pub fn ensure_built(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let mut pending = self.writer_lock.lock();
        if self.is_initialized() {
            return Ok(());
        }
        self.rebuild_locked(&mut pending)
    }

    /// Unconditional rebuild from the store
    pub fn rebuild(&self) -> Result<()> {
        let mut pending = self.writer_lock.lock();
        self.rebuild_locked(&mut pending)
    }

    /// Make a newly created document searchable.
    ///
    /// The document is added to the published index even when the bulk
    /// fetch fails; the fetch error is still returned.
    pub fn on_document_created(&self, doc: &Document) -> Result<()> {
        let mut pending = self.writer_lock.lock();

        let rebuilt = match self.policy {
            CreationPolicy::RebuildThenAdd => self.rebuild_locked(&mut pending),
            CreationPolicy::Incremental if !self.is_initialized() => self.rebuild_locked(&mut pending),
            CreationPolicy::Incremental => Ok(()),
        };

        pending.retain(|known| known.id != doc.id);
        pending.push(doc.clone());
        self.mutate_locked(|index| index.add_document(doc, &self.analyzer));
        tracing::debug!(doc_id = %doc.id, "indexed document");

        rebuilt
    }

    /// Remove a deleted document. Unknown ids are ignored; never rebuilds.
    pub fn on_document_deleted(&self, id: &DocId) {
        let mut pending = self.writer_lock.lock();
        pending.retain(|known| known.id != *id);

        if !self.published.read().index.contains(id) {
            return;
        }
        self.mutate_locked(|index| {
            index.remove_by_id(id);
        });
        tracing::debug!(doc_id = %id, "removed document from index");
    }

    /// AND search, building the index first if it has never been built
    pub fn search(&self, query: &str) -> Result<Vec<DocId>> {
        let terms = self.analyzer.query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_built()?;

        let (index, generation) = {
            let published = self.published.read();
            (published.index.clone(), published.generation)
        };

        let key = QueryKey::new(generation, &terms);
        if let Some(hits) = self.cache.get(&key) {
            tracing::debug!(terms = terms.len(), hits = hits.len(), cached = true, "search");
            return Ok(hits);
        }

        let hits = index.search_terms(&terms);
        tracing::debug!(terms = terms.len(), hits = hits.len(), cached = false, "search");
        self.cache.put(key, hits.clone());
        Ok(hits)
    }

    pub fn stats(&self) -> IndexStats {
        let published = self.published.read();
        IndexStats {
            documents: published.index.len(),
            terms: published.index.term_count(),
            postings: published.index.posting_count(),
            generation: published.generation,
            initialized: self.is_initialized(),
            cache: self.cache.stats(),
        }
    }

    /// `pending` is the content of the held `writer_lock`
    fn rebuild_locked(&self, pending: &mut Vec<Document>) -> Result<()> {
        let documents = match self.store.fetch_all() {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(error = %err, "bulk fetch failed; keeping current index");
                return Err(Error::index_build(format!("bulk fetch failed: {}", err)));
            }
        };

        let mut index = self.indexer.build(&documents, &self.analyzer);

        // Created documents the store has caught up with are no longer pending
        let fetched: HashSet<DocId> = documents.iter().map(|doc| doc.id).collect();
        pending.retain(|doc| !fetched.contains(&doc.id));
        for doc in pending.iter() {
            index.add_document(doc, &self.analyzer);
        }

        let (documents, terms) = (index.len(), index.term_count());
        let generation = self.publish_locked(Arc::new(index));
        self.initialized.store(true, Ordering::Release);

        tracing::info!(documents, terms, generation, pending = pending.len(), "index rebuilt");
        Ok(())
    }

    /// Caller must hold `writer_lock`
    fn mutate_locked<F>(&self, apply: F)
    where
        F: FnOnce(&mut InvertedIndex),
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut published = self.published.write();
        if let Some(index) = Arc::get_mut(&mut published.index) {
            // No reader holds a snapshot: patch in place
            apply(index);
            published.generation = generation;
        } else {
            let current = published.index.clone();
            drop(published);

            // Copy outside the lock so readers are not blocked meanwhile
            let mut next = InvertedIndex::clone(&current);
            drop(current);
            apply(&mut next);

            let mut published = self.published.write();
            published.index = Arc::new(next);
            published.generation = generation;
        }
        self.cache.clear();
    }

    fn publish_locked(&self, index: Arc<InvertedIndex>) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        {
            let mut published = self.published.write();
            published.index = index;
            published.generation = generation;
        }
        self.cache.clear();
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::storage::memory::MemoryStore;

    fn doc(id: u128, title: &str) -> Document {
        Document::new(DocId::from_u128(id), title)
    }

    fn manager(store: &Arc<MemoryStore>, policy: CreationPolicy) -> IndexLifecycleManager {
        let config = Config {
            creation_policy: policy,
            ..Config::default()
        };
        IndexLifecycleManager::new(store.clone(), &config)
    }

    #[test]
    fn first_search_builds_lazily_and_only_once() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        assert!(!lifecycle.is_initialized());

        assert_eq!(lifecycle.search("pizza").unwrap(), vec![DocId::from_u128(1)]);
        store.insert(doc(2, "More pizza"));
        assert_eq!(lifecycle.search("pizza").unwrap(), vec![DocId::from_u128(1)]);
        assert_eq!(store.fetch_all_calls(), 1);
    }

    #[test]
    fn blank_query_does_not_build() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        assert!(lifecycle.search("   ").unwrap().is_empty());
        assert_eq!(store.fetch_all_calls(), 0);
    }

    #[test]
    fn failed_rebuild_keeps_previous_index() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.rebuild().unwrap();
        let generation = lifecycle.stats().generation;

        store.set_failing(true);
        let err = lifecycle.rebuild().unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexBuild);
        assert_eq!(lifecycle.stats().generation, generation);
        assert_eq!(lifecycle.search("pizza").unwrap(), vec![DocId::from_u128(1)]);
    }

    #[test]
    fn failed_first_build_stays_uninitialized() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        store.set_failing(true);
        let lifecycle = manager(&store, CreationPolicy::Incremental);

        assert_eq!(lifecycle.search("pizza").unwrap_err().kind, ErrorKind::IndexBuild);
        assert!(!lifecycle.is_initialized());

        store.set_failing(false);
        assert_eq!(lifecycle.search("pizza").unwrap(), vec![DocId::from_u128(1)]);
    }

    #[test]
    fn incremental_creation_skips_rebuild_once_built() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        // Not in the store yet: the direct add is what makes it visible
        lifecycle.on_document_created(&doc(2, "Pizza dough")).unwrap();
        assert_eq!(store.fetch_all_calls(), 1);
        assert_eq!(
            lifecycle.search("pizza").unwrap(),
            vec![DocId::from_u128(1), DocId::from_u128(2)]
        );
    }

    #[test]
    fn incremental_creation_on_fresh_index_builds_first() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);

        lifecycle.on_document_created(&doc(2, "Pizza dough")).unwrap();
        assert!(lifecycle.is_initialized());
        assert_eq!(store.fetch_all_calls(), 1);

        assert_eq!(lifecycle.search("best").unwrap(), vec![DocId::from_u128(1)]);
        assert_eq!(lifecycle.search("dough").unwrap(), vec![DocId::from_u128(2)]);
        assert_eq!(store.fetch_all_calls(), 1);
    }

    #[test]
    fn created_document_survives_failed_first_build() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = manager(&store, CreationPolicy::Incremental);

        store.set_failing(true);
        let err = lifecycle.on_document_created(&doc(5, "Fresh sourdough")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexBuild);
        assert!(!lifecycle.is_initialized());

        // The store still lacks the document when the lazy build runs
        store.set_failing(false);
        assert_eq!(lifecycle.search("sourdough").unwrap(), vec![DocId::from_u128(5)]);
        assert!(lifecycle.is_initialized());
    }

    #[test]
    fn created_document_is_reapplied_until_the_store_returns_it() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        lifecycle.on_document_created(&doc(7, "Rye loaf")).unwrap();
        lifecycle.rebuild().unwrap();
        assert_eq!(lifecycle.search("rye").unwrap(), vec![DocId::from_u128(7)]);

        // Once fetched, the store is the source of truth for it
        store.insert(doc(7, "Rye loaf"));
        lifecycle.rebuild().unwrap();
        store.remove(&DocId::from_u128(7));
        lifecycle.rebuild().unwrap();
        assert!(lifecycle.search("rye").unwrap().is_empty());
    }

    #[test]
    fn deleted_creation_is_not_reapplied() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        lifecycle.on_document_created(&doc(7, "Rye loaf")).unwrap();
        lifecycle.on_document_deleted(&DocId::from_u128(7));
        lifecycle.rebuild().unwrap();
        assert!(lifecycle.search("rye").unwrap().is_empty());
    }

    #[test]
    fn rebuild_then_add_refetches_on_every_creation() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::RebuildThenAdd);
        lifecycle.ensure_built().unwrap();

        // Written behind the index's back, picked up by the next rebuild
        store.insert(doc(3, "Pizza oven"));
        lifecycle.on_document_created(&doc(2, "Pizza dough")).unwrap();

        assert_eq!(store.fetch_all_calls(), 2);
        assert_eq!(lifecycle.search("pizza").unwrap().len(), 3);
    }

    #[test]
    fn creation_survives_fetch_failure() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = manager(&store, CreationPolicy::RebuildThenAdd);
        lifecycle.ensure_built().unwrap();

        store.set_failing(true);
        let err = lifecycle.on_document_created(&doc(5, "Fresh post")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexBuild);
        assert_eq!(lifecycle.search("fresh").unwrap(), vec![DocId::from_u128(5)]);
    }

    #[test]
    fn deletion_removes_without_fetching() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza"), doc(2, "Pizza dough")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        lifecycle.on_document_deleted(&DocId::from_u128(1));
        lifecycle.on_document_deleted(&DocId::from_u128(99));

        assert_eq!(store.fetch_all_calls(), 1);
        assert_eq!(lifecycle.search("pizza").unwrap(), vec![DocId::from_u128(2)]);
        assert!(lifecycle.search("best").unwrap().is_empty());
    }

    #[test]
    fn held_snapshot_is_not_mutated() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        let before = lifecycle.snapshot();
        lifecycle.on_document_deleted(&DocId::from_u128(1));

        assert!(before.contains(&DocId::from_u128(1)));
        assert!(!lifecycle.snapshot().contains(&DocId::from_u128(1)));
    }

    #[test]
    fn unshared_index_is_patched_in_place() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);
        lifecycle.ensure_built().unwrap();

        let before = Arc::as_ptr(&lifecycle.snapshot());
        lifecycle.on_document_created(&doc(2, "Pizza dough")).unwrap();
        lifecycle.on_document_deleted(&DocId::from_u128(1));

        let after = lifecycle.snapshot();
        assert_eq!(Arc::as_ptr(&after), before);
        assert!(after.contains(&DocId::from_u128(2)));
        assert!(!after.contains(&DocId::from_u128(1)));
    }

    #[test]
    fn cache_is_invalidated_by_mutation() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = manager(&store, CreationPolicy::Incremental);

        assert_eq!(lifecycle.search("pizza").unwrap().len(), 1);
        assert_eq!(lifecycle.search("pizza").unwrap().len(), 1);
        assert_eq!(lifecycle.stats().cache.hit_count, 1);

        lifecycle.on_document_created(&doc(2, "Pizza dough")).unwrap();
        assert_eq!(lifecycle.search("pizza").unwrap().len(), 2);
    }

    #[test]
    fn concurrent_first_searches_fetch_once() {
        let store = Arc::new(MemoryStore::with_documents([doc(1, "Best pizza")]));
        let lifecycle = Arc::new(manager(&store, CreationPolicy::Incremental));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lifecycle = lifecycle.clone();
                std::thread::spawn(move || lifecycle.search("pizza").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![DocId::from_u128(1)]);
        }
        assert_eq!(store.fetch_all_calls(), 1);
    }
}
