//! Tweet tokenizer implementation.
//!
//! Keeps the pieces of social media text that a plain word tokenizer would
//! break apart: URLs, e-mail addresses, `@user` mentions, `#hashtags`,
//! numbers with separators and emoticons. Everything else falls back to words
//! and single punctuation characters. Case is preserved.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Alternatives in priority order. The first one matching at a position wins.
const PATTERNS: &[&str] = &[
    // URLs
    r#"https?://[^\s<>"]+|www\.[^\s<>"]+"#,
    // e-mail addresses
    r"[\w.+\-]+@[\w\-]+\.[\w.\-]*\w",
    // mentions
    r"@\w+",
    // hashtags
    r"#+\w+(?:['\-]\w+)*",
    // numbers, phone numbers, times and dates
    r"[+\-]?\d+(?:[,/.:\-]\d+)*",
    // emoticons
    r#"[<>]?[:;=8][\-o*"']?[)\](\[dDpP/:}{@|\\]|<3"#,
    // words with inner apostrophes or dashes
    r"\w+(?:['\-]\w+)*",
    // ellipses
    r"\.(?:\s*\.)+",
    // anything else that is not whitespace
    r"\S",
];

static TWEET: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = PATTERNS
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).expect("tweet pattern is valid")
});

/// A tokenizer for short informal messages.
///
/// # Examples
///
/// ```
/// use textclass::analysis::tokenizer::{Tokenizer, TweetTokenizer};
///
/// let tokenizer = TweetTokenizer::new();
/// let tokens = tokenizer.tokenize_to_strings("@ana see #rust :)").unwrap();
/// assert_eq!(tokens, vec!["@ana", "see", "#rust", ":)"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TweetTokenizer;

impl TweetTokenizer {
    /// Create a new tweet tokenizer.
    pub fn new() -> Self {
        TweetTokenizer
    }
}

impl Tokenizer for TweetTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = TWEET
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "tweet"
    }
}
