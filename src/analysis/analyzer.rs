use std::collections::HashSet;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::core::types::Document;
use crate::index::inverted::Term;

/// Turns documents and queries into index terms
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer { tokenizer, name }
    }

    /// Terms of every indexed field of `doc`, deduplicated, in order of
    /// first occurrence.
    pub fn document_terms(&self, doc: &Document) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();

        for field in doc.indexed_text() {
            for token in self.tokenizer.tokenize(field) {
                if seen.insert(token.text.clone()) {
                    terms.push(Term::new(token.text));
                }
            }
        }

        terms
    }

    /// Query terms in query order. Duplicates are kept; they do not change
    /// an AND result.
    pub fn query_terms(&self, query: &str) -> Vec<Term> {
        self.tokenizer
            .tokenize(query)
            .into_iter()
            .map(|token| Term::new(token.text))
            .collect()
    }

    /// Word-run analyzer used for forum posts
    pub fn standard() -> Self {
        Analyzer::new("standard".to_string(), Box::new(WordTokenizer))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::standard()
    }
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            name: self.name.clone(),
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
