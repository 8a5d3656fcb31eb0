//! Sentence tokenizer implementation.
//!
//! Splits text on Unicode sentence boundaries (UAX #29). Each sentence is
//! trimmed, and segments that are only whitespace are dropped.
//!
//! # Examples
//!
//! ```
//! use textclass::analysis::tokenizer::{SentenceTokenizer, Tokenizer};
//!
//! let tokenizer = SentenceTokenizer::new();
//! let sentences = tokenizer.tokenize_to_strings("It works. Ship it!").unwrap();
//! assert_eq!(sentences, vec!["It works.", "Ship it!"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that emits one token per sentence.
#[derive(Clone, Debug, Default)]
pub struct SentenceTokenizer;

impl SentenceTokenizer {
    /// Create a new sentence tokenizer.
    pub fn new() -> Self {
        SentenceTokenizer
    }
}

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_sentence_bound_indices()
            .filter_map(|(offset, raw)| {
                let sentence = raw.trim();
                if sentence.is_empty() {
                    return None;
                }
                let start = offset + (raw.len() - raw.trim_start().len());
                Some((start, sentence))
            })
            .enumerate()
            .map(|(position, (start, sentence))| {
                Token::with_offsets(sentence, position, start, start + sentence.len())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_tokenizer() {
        let tokenizer = SentenceTokenizer::new();
        let tokens: Vec<Token> = tokenizer
            .tokenize("Hello world. How are you? Fine!")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello world.", "How are you?", "Fine!"]);
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 13);
        assert_eq!(tokens[1].end_offset, 25);
    }

    #[test]
    fn test_blank_input() {
        let tokenizer = SentenceTokenizer::new();
        assert!(tokenizer.tokenize_to_strings("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(SentenceTokenizer::new().name(), "sentence");
    }
}
