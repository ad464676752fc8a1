use crate::core::types::Document;
use crate::scoring::heap::MaxHeap;
use crate::scoring::scorer::{Scorer, TrendingScorer};

/// (score, input position, document)
type Ranked<'a> = (u64, usize, &'a Document);

/// Top-K selection over an engagement score, backed by [`MaxHeap`]
pub struct TrendingRanker<S: Scorer = TrendingScorer> {
    scorer: S,
}

impl TrendingRanker<TrendingScorer> {
    pub fn new() -> Self {
        TrendingRanker { scorer: TrendingScorer }
    }
}

impl Default for TrendingRanker<TrendingScorer> {
    fn default() -> Self {
        TrendingRanker::new()
    }
}

impl<S: Scorer> TrendingRanker<S> {
    pub fn with_scorer(scorer: S) -> Self {
        TrendingRanker { scorer }
    }

    pub fn score(&self, doc: &Document) -> u64 {
        self.scorer.score(doc)
    }

    /// The `k` highest-scoring documents, best first. Equal scores keep
    /// their input order. `k == 0` yields nothing; `k` past the input
    /// length yields everything, ranked.
    pub fn top_k<'a>(&self, documents: &'a [Document], k: usize) -> Vec<&'a Document> {
        if k == 0 || documents.is_empty() {
            return Vec::new();
        }

        // Lower input position wins a tie
        let mut heap = MaxHeap::with_capacity(documents.len(), |a: &Ranked<'a>, b: &Ranked<'a>| {
            a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1))
        });
        for (position, doc) in documents.iter().enumerate() {
            heap.push((self.scorer.score(doc), position, doc));
        }

        let limit = k.min(heap.len());
        let mut ranked = Vec::with_capacity(limit);
        for _ in 0..limit {
            match heap.pop() {
                Some((_, _, doc)) => ranked.push(doc),
                None => break,
            }
        }
        ranked
    }

    /// Owned variant of [`TrendingRanker::top_k`]
    pub fn top_k_owned(&self, documents: Vec<Document>, k: usize) -> Vec<Document> {
        self.top_k(&documents, k).into_iter().cloned().collect()
    }
}
