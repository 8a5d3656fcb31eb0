//! Token types produced by tokenizers.
//!
//! A [`Token`] is one unit of text with its position in the stream and its
//! byte offsets in the source string. Classifiers only look at `text`; the
//! offsets are kept for callers that want to map tokens back to the input.
//!
//! # Examples
//!
//! ```
//! use textclass::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream is the boxed iterator returned by every tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;


/// Build tokens from word slices of `text`, recovering byte offsets by
/// scanning forward so repeated words get their own offsets.
pub(crate) fn tokens_from_words<'a, I>(text: &str, words: I) -> Vec<Token>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cursor = 0;
    words
        .into_iter()
        .enumerate()
        .map(|(position, word)| {
            let start = text[cursor..]
                .find(word)
                .map(|offset| cursor + offset)
                .unwrap_or(cursor);
            let end = start + word.len();
            cursor = end.min(text.len());
            Token::with_offsets(word, position, start, end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];

        let stream: TokenStream = Box::new(tokens.into_iter());
        let collected: Vec<_> = stream.collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "hello");
        assert_eq!(collected[1].text, "world");
    }

    #[test]
    fn test_repeated_words_get_distinct_offsets() {
        let text = "go go go";
        let tokens = tokens_from_words(text, text.split_whitespace());
        let offsets: Vec<_> = tokens.iter().map(|t| t.start_offset).collect();
        assert_eq!(offsets, vec![0, 3, 6]);
    }
}
