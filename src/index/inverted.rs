use std::collections::{HashMap, HashSet};
use serde::{Serialize, Deserialize};
use crate::analysis::analyzer::Analyzer;
use crate::core::types::{DocId, Document};
use crate::index::posting::PostingList;

/// Normalized (lower-cased) word token
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term(String);

impl Term {
    pub fn new(text: impl Into<String>) -> Self {
        Term(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Term -> posting list, plus the reverse doc -> terms map used for removal.
///
/// A document id is in the posting list of `T` iff `T` occurred in that
/// document when it was (last) added and it has not been removed since.
///
/// Re-adding an id without removing it first only adds postings; terms the
/// document no longer contains keep matching it. Callers that edit a
/// document's text must remove then add.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    pub postings: HashMap<Term, PostingList>,
    pub doc_terms: HashMap<DocId, HashSet<Term>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            doc_terms: HashMap::new(),
        }
    }

    /// Drop every term and document
    pub fn clear(&mut self) {
        self.postings.clear();
        self.doc_terms.clear();
    }

    pub fn add_document(&mut self, doc: &Document, analyzer: &Analyzer) {
        let terms = analyzer.document_terms(doc);
        self.add_terms(doc.id, terms);
    }

    /// Record `doc_id` under each of `terms` (already normalized)
    pub fn add_terms(&mut self, doc_id: DocId, terms: Vec<Term>) {
        for term in &terms {
            self.postings
                .entry(term.clone())
                .or_insert_with(PostingList::new)
                .insert(doc_id);
        }

        // A re-add unions terms so removal still purges the old ones
        self.doc_terms.entry(doc_id).or_default().extend(terms);
    }

    /// Remove `doc_id` from every posting list. Unknown ids are ignored.
    /// Returns whether the id was indexed.
    pub fn remove_by_id(&mut self, doc_id: &DocId) -> bool {
        let Some(terms) = self.doc_terms.remove(doc_id) else {
            return false;
        };

        for term in terms {
            if let Some(list) = self.postings.get_mut(&term) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.postings.remove(&term);
                }
            }
        }

        true
    }

    /// AND search over a raw query string
    pub fn search(&self, query: &str, analyzer: &Analyzer) -> Vec<DocId> {
        self.search_terms(&analyzer.query_terms(query))
    }

    /// AND search over normalized terms. Ids come back ascending, but
    /// callers should treat the result as a set.
    pub fn search_terms(&self, terms: &[Term]) -> Vec<DocId> {
        let Some((first, rest)) = terms.split_first() else {
            return Vec::new();
        };

        let Some(first_list) = self.postings.get(first) else {
            return Vec::new();
        };
        let mut result = first_list.clone();

        for term in rest {
            if result.is_empty() {
                return Vec::new();
            }
            match self.postings.get(term) {
                Some(list) => result = result.intersect(list),
                // A term no document contains empties the intersection
                None => return Vec::new(),
            }
        }

        result.doc_ids
    }

    pub fn search_term(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn doc_freq(&self, term: &Term) -> u32 {
        self.postings.get(term).map(PostingList::doc_freq).unwrap_or(0)
    }

    pub fn contains(&self, doc_id: &DocId) -> bool {
        self.doc_terms.contains_key(doc_id)
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.doc_terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_terms.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn posting_count(&self) -> usize {
        self.postings.values().map(PostingList::len).sum()
    }
}
