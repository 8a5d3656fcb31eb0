//! Default tokenizer implementation.
//!
//! Replaces every character that is not a Latin or Cyrillic letter, a digit,
//! `_`, `(`, `)`, `+` or whitespace with a space, then splits on whitespace.
//! Case is preserved; the Naive Bayes classifier folds case itself.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::stop_words::is_stop_word;
use crate::analysis::token::{TokenStream, tokens_from_words};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^(a-zA-ZА-Яа-яЁё0-9_)+\s]").expect("punctuation pattern is valid")
});

/// The tokenizer classifiers use when the caller has no preference.
///
/// # Examples
///
/// ```
/// use textclass::analysis::tokenizer::{DefaultTokenizer, Tokenizer};
///
/// let tokenizer = DefaultTokenizer::new();
/// let words = tokenizer.tokenize_to_strings("amazing, awesome movie!!").unwrap();
/// assert_eq!(words, vec!["amazing", "awesome", "movie"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultTokenizer {
    remove_stop_words: bool,
}

impl DefaultTokenizer {
    /// Create a new default tokenizer that keeps stop words.
    pub fn new() -> Self {
        DefaultTokenizer::default()
    }

    /// Create a default tokenizer that drops English stop words.
    pub fn without_stop_words() -> Self {
        DefaultTokenizer {
            remove_stop_words: true,
        }
    }

    /// Whether stop words are removed.
    pub fn removes_stop_words(&self) -> bool {
        self.remove_stop_words
    }
}

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Replacement is char-for-space, so byte offsets shift only for
        // multi-byte punctuation; offsets are computed against the cleaned text.
        let cleaned = PUNCTUATION.replace_all(text, " ");
        let words = cleaned
            .split_whitespace()
            .filter(|word| !self.remove_stop_words || !is_stop_word(&word.to_lowercase()));
        let tokens = tokens_from_words(&cleaned, words);

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "default"
    }
}
