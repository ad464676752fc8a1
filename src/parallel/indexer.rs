use rayon::prelude::*;
use crate::analysis::analyzer::Analyzer;
use crate::core::types::{DocId, Document};
use crate::index::inverted::{InvertedIndex, Term};

/// Builds a fresh inverted index from a full corpus.
///
/// Analysis runs on the rayon pool once the corpus reaches `threshold`
/// documents; postings are always merged on the calling thread in corpus
/// order.
#[derive(Debug, Clone)]
pub struct ParallelIndexer {
    pub threshold: usize,
}

impl ParallelIndexer {
    pub fn new(threshold: usize) -> Self {
        ParallelIndexer { threshold }
    }

    /// Analyze every document into its deduplicated term set
    pub fn analyze_batch(&self, documents: &[Document], analyzer: &Analyzer) -> Vec<(DocId, Vec<Term>)> {
        if documents.len() >= self.threshold {
            documents
                .par_iter()
                .map(|doc| (doc.id, analyzer.document_terms(doc)))
                .collect()
        } else {
            documents
                .iter()
                .map(|doc| (doc.id, analyzer.document_terms(doc)))
                .collect()
        }
    }

    pub fn build(&self, documents: &[Document], analyzer: &Analyzer) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (doc_id, terms) in self.analyze_batch(documents, analyzer) {
            index.add_terms(doc_id, terms);
        }
        index
    }
}

impl Default for ParallelIndexer {
    fn default() -> Self {
        ParallelIndexer::new(1024)
    }
}
