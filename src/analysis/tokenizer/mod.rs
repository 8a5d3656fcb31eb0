//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the only view the classifiers have of raw text: they turn a
//! string into an ordered sequence of [`Token`](crate::analysis::token::Token)s.
//! A classifier receives its tokenizer at construction time as an
//! `Arc<dyn Tokenizer>`, so swapping strategies never touches classifier code.
//!
//! # Available Tokenizers
//!
//! - [`DefaultTokenizer`] - Strips punctuation, splits on whitespace
//! - [`WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`WordTokenizer`] - Lower-cases and keeps alphanumeric words
//! - [`UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`NgramTokenizer`] - Contiguous word n-grams
//! - [`LineTokenizer`] - One token per line
//! - [`ParagraphTokenizer`] - One token per blank-line separated paragraph
//! - [`SentenceTokenizer`] - Uses Unicode sentence boundaries
//! - [`TweetTokenizer`] - Keeps mentions, hashtags, URLs and emoticons intact
//!
//! # Examples
//!
//! ```
//! use textclass::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared between
/// classifiers and used from concurrent callers.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use textclass::analysis::token::{Token, TokenStream};
/// use textclass::analysis::tokenizer::Tokenizer;
/// use textclass::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (recorded in persisted models).
    fn name(&self) -> &'static str;

    /// Tokenize and keep only the token texts.
    fn tokenize_to_strings(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.tokenize(text)?.map(|token| token.text).collect())
    }
}

pub mod default;
pub mod line;
pub mod ngram;
pub mod paragraph;
pub mod sentence;
pub mod tweet;
pub mod unicode_word;
pub mod whitespace;
pub mod word;

pub use default::DefaultTokenizer;
pub use line::LineTokenizer;
pub use ngram::NgramTokenizer;
pub use paragraph::ParagraphTokenizer;
pub use sentence::SentenceTokenizer;
pub use tweet::TweetTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
pub use word::WordTokenizer;
