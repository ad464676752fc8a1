use std::sync::LazyLock;
use regex::Regex;
use crate::analysis::token::Token;

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Lower-cases the input, then emits every maximal run of word
/// characters (letters, digits, underscore). Everything else delimits.
/// Order and duplicates are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        WORD_RUN
            .find_iter(&lowered)
            .enumerate()
            .map(|(position, m)| Token::new(m.as_str().to_string(), position as u32, m.start()))
            .collect()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: Vec<Token>) -> Vec<String> {
        tokens.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn lowercases_and_splits_on_non_word_chars() {
        let tokens = WordTokenizer.tokenize("Best PIZZA-place, ever!");
        assert_eq!(texts(tokens), vec!["best", "pizza", "place", "ever"]);
    }

    #[test]
    fn keeps_digits_and_underscores_inside_words() {
        let tokens = WordTokenizer.tokenize("rust_2024 v1.0");
        assert_eq!(texts(tokens), vec!["rust_2024", "v1", "0"]);
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let tokens = WordTokenizer.tokenize("go go Gadget go");
        assert_eq!(texts(tokens), vec!["go", "go", "gadget", "go"]);
    }

    #[test]
    fn empty_and_delimiter_only_input_yield_nothing() {
        assert!(WordTokenizer.tokenize("").is_empty());
        assert!(WordTokenizer.tokenize("  ...  !!").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_word_characters() {
        let tokens = WordTokenizer.tokenize("Café CRÈME, naïve_straße!");
        assert_eq!(texts(tokens), vec!["café", "crème", "naïve_straße"]);
    }

    #[test]
    fn records_positions_and_offsets() {
        let tokens = WordTokenizer.tokenize("a, bc");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].offset, 3);
        assert_eq!(tokens[1].len(), 2);
    }
}
