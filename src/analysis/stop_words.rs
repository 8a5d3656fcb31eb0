//! English stop words.
//!
//! Words with very little meaning of their own. Tokenizers that support
//! stop-word removal consult [`is_stop_word`] after cleaning a word.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "same", "so", "than", "too", "very", "can", "will", "just", "don't", "should",
    "should've", "now", "aren't", "couldn't", "didn't", "doesn't", "hasn't", "haven't", "isn't",
    "shouldn't", "wasn't", "weren't", "won't", "wouldn't",
];

/// Lookup set built from [`ENGLISH_STOP_WORDS`].
pub static ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Check whether `word` is an English stop word. The check is case-sensitive;
/// callers lower-case first when their tokens are not already folded.
pub fn is_stop_word(word: &str) -> bool {
    ENGLISH_STOP_WORDS_SET.contains(word)
}
