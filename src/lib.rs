pub mod core;
pub mod storage;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;
pub mod parallel;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                           FORUMDEX ARCHITECTURE                              │
└──────────────────────────────────────────────────────────────────────────────┘

                 ┌───────────────────────────────────────────┐
                 │            struct SearchEngine            │
                 │  config: Config                           │
                 │  store: Arc<dyn DocumentStore>            │
                 │  lifecycle: IndexLifecycleManager         │
                 │  ranker: TrendingRanker                   │
                 └───────┬───────────────────────────┬───────┘
                         │ search / index_one /      │ top_k / trending
                         │ remove_one / refresh      │
                         ▼                           ▼
  ┌──────────────────────────────────────┐   ┌─────────────────────────────┐
  │ struct IndexLifecycleManager         │   │ struct TrendingRanker       │
  │  published: RwLock<{Arc<Inverted     │   │  scorer: TrendingScorer     │
  │             Index>, generation}>     │   │   2 * upvotes + replies     │
  │  writer_lock: Mutex<()>              │   │        │                    │
  │  initialized: AtomicBool             │   │        ▼                    │
  │  cache: QueryCache (lru)             │   │  MaxHeap<T, F: Fn(&T,&T)>   │
  │  indexer: ParallelIndexer (rayon)    │   └─────────────────────────────┘
  └───────┬──────────────────────┬───────┘
          │ fetch_all            │ snapshot
          ▼                      ▼
  ┌────────────────────┐   ┌──────────────────────────────────────────────┐
  │ trait DocumentStore│   │ struct InvertedIndex                         │
  │  fetch_all         │   │  postings:  HashMap<Term, PostingList>       │
  │  fetch_many        │   │  doc_terms: HashMap<DocId, Vec<Term>>        │
  │ impl: MemoryStore  │   └──────────────────────────────────────────────┘
  └────────────────────┘                      ▲
                                              │ terms
                            ┌─────────────────┴────────────────┐
                            │ Analyzer ── WordTokenizer (\w+)  │
                            └──────────────────────────────────┘

READ PATH:   query ─► Analyzer ─► QueryCache? ─► snapshot.search_terms (AND) ─► ids
WRITE PATH:  writer_lock ─► rebuild (build aside, swap Arc) | add/remove (copy-on-write)
*/
