//! Word n-gram tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::word::clean;
use crate::error::{ClassifierError, Result};

/// Separator placed between the words of one n-gram.
const SEPARATOR: &str = " ";

/// A tokenizer that emits sequences of contiguous words.
///
/// The text is cleaned the same way [`WordTokenizer`](super::WordTokenizer)
/// cleans it. For every word, n-grams from `min_gram` to `max_gram` words
/// starting at that word are emitted, shortest first.
///
/// # Examples
///
/// ```
/// use textclass::analysis::tokenizer::{NgramTokenizer, Tokenizer};
///
/// let tokenizer = NgramTokenizer::new(1, 2).unwrap();
/// let tokens = tokenizer.tokenize_to_strings("big red dog").unwrap();
/// assert_eq!(tokens, vec!["big", "big red", "red", "red dog", "dog"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// Minimum number of words per token
    min_gram: usize,
    /// Maximum number of words per token
    max_gram: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(ClassifierError::invalid_argument(
                "min_gram must be at least 1",
            ));
        }
        if max_gram < min_gram {
            return Err(ClassifierError::invalid_argument(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self { min_gram, max_gram })
    }

    /// Create a word bigram tokenizer.
    pub fn bigram() -> Self {
        Self {
            min_gram: 2,
            max_gram: 2,
        }
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let cleaned = clean(text);
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let mut tokens = Vec::new();

        for start in 0..words.len() {
            let longest = self.max_gram.min(words.len() - start);
            for size in self.min_gram..=longest {
                let ngram = words[start..start + size].join(SEPARATOR);
                tokens.push(Token::new(ngram, tokens.len()));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngram_creation() {
        assert!(NgramTokenizer::new(1, 3).is_ok());
        assert!(NgramTokenizer::new(0, 2).is_err());
        assert!(NgramTokenizer::new(3, 2).is_err());
    }

    #[test]
    fn test_bigram() {
        let tokenizer = NgramTokenizer::bigram();
        let tokens = tokenizer.tokenize_to_strings("The quick brown fox").unwrap();
        assert_eq!(tokens, vec!["the quick", "quick brown", "brown fox"]);
    }

    #[test]
    fn test_short_text() {
        let tokenizer = NgramTokenizer::new(3, 5).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("two words").unwrap().collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_positions_are_sequential() {
        let tokenizer = NgramTokenizer::new(1, 2).unwrap();
        let positions: Vec<usize> = tokenizer
            .tokenize("a b c")
            .unwrap()
            .map(|t| t.position)
            .collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(NgramTokenizer::bigram().name(), "ngram");
    }
}
