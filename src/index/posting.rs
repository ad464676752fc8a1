use crate::core::types::DocId;

/// Posting list for a term.
/// Ids are kept sorted ascending and unique, so insertion is idempotent
/// and iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    pub doc_ids: Vec<DocId>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            doc_ids: Vec::new(),
        }
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, doc_id: DocId) -> bool {
        match self.doc_ids.binary_search(&doc_id) {
            Ok(_) => false,
            Err(pos) => {
                self.doc_ids.insert(pos, doc_id);
                true
            }
        }
    }

    /// Returns false if the id was not present
    pub fn remove(&mut self, doc_id: &DocId) -> bool {
        match self.doc_ids.binary_search(doc_id) {
            Ok(pos) => {
                self.doc_ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, doc_id: &DocId) -> bool {
        self.doc_ids.binary_search(doc_id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn doc_freq(&self) -> u32 {
        self.doc_ids.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocId> {
        self.doc_ids.iter()
    }

    /// Intersect two sorted lists (linear merge)
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        let mut doc_ids = Vec::with_capacity(self.len().min(other.len()));
        let mut i = 0;
        let mut j = 0;

        while i < self.doc_ids.len() && j < other.doc_ids.len() {
            let left = self.doc_ids[i];
            let right = other.doc_ids[j];

            if left == right {
                doc_ids.push(left);
                i += 1;
                j += 1;
            } else if left < right {
                i += 1;
            } else {
                j += 1;
            }
        }

        PostingList { doc_ids }
    }
}
