//! Word tokenizer implementation.
//!
//! Lower-cases the text, drops every character that is not an ASCII letter,
//! digit or space, and splits what remains on whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::stop_words::is_stop_word;
use crate::analysis::token::{TokenStream, tokens_from_words};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z 0-9\s]+").expect("non-word pattern is valid"));

/// Lower-case and keep alphanumeric characters.
pub(crate) fn clean(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), "").into_owned()
}

/// A tokenizer that matches words of one or more alphanumeric characters.
///
/// # Examples
///
/// ```
/// use textclass::analysis::tokenizer::{Tokenizer, WordTokenizer};
///
/// let tokenizer = WordTokenizer::new();
/// let words = tokenizer.tokenize_to_strings("Don't PANIC!").unwrap();
/// assert_eq!(words, vec!["dont", "panic"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer {
    remove_stop_words: bool,
}

impl WordTokenizer {
    /// Create a new word tokenizer that keeps stop words.
    pub fn new() -> Self {
        WordTokenizer::default()
    }

    /// Create a word tokenizer that drops English stop words.
    pub fn without_stop_words() -> Self {
        WordTokenizer {
            remove_stop_words: true,
        }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let cleaned = clean(text);
        let words = cleaned
            .split_whitespace()
            .filter(|word| !self.remove_stop_words || !is_stop_word(word));
        let tokens = tokens_from_words(&cleaned, words);

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
