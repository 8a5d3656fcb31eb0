//! Text analysis collaborators for the classifiers.
//!
//! The classifiers never look inside text themselves. They consume two narrow
//! capabilities from this module:
//!
//! - [`tokenizer::Tokenizer`] turns text into an ordered sequence of tokens
//! - [`vectorizer::Vectorizer`] turns text into a fixed-length numeric vector

pub mod stop_words;
pub mod token;
pub mod tokenizer;
pub mod vectorizer;

pub use token::*;
pub use tokenizer::*;
pub use vectorizer::*;
