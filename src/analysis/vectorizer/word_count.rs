//! Word count vectorizer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::vectorizer::Vectorizer;
use crate::error::{ClassifierError, Result};

/// Represents text as per-word occurrence counts over a fitted vocabulary.
///
/// Vocabulary columns are ordered by first appearance in the fitting corpus.
/// Words that appear in fewer than `min_document_frequency` documents are
/// skipped; once `max_vocabulary` columns exist, later words are ignored.
pub struct WordCountVectorizer {
    /// Maximum number of vocabulary columns.
    max_vocabulary: usize,
    /// Minimum number of documents a word must appear in.
    min_document_frequency: usize,
    /// Word -> column index.
    vocabulary: HashMap<String, usize>,
    /// Tokenizer used for fitting and transforming.
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for WordCountVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCountVectorizer")
            .field("max_vocabulary", &self.max_vocabulary)
            .field("min_document_frequency", &self.min_document_frequency)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl WordCountVectorizer {
    /// Create an unbounded vectorizer that keeps every word.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        WordCountVectorizer {
            max_vocabulary: usize::MAX,
            min_document_frequency: 1,
            vocabulary: HashMap::new(),
            tokenizer,
        }
    }

    /// Create a vectorizer with vocabulary limits.
    pub fn with_limits(
        tokenizer: Arc<dyn Tokenizer>,
        max_vocabulary: usize,
        min_document_frequency: usize,
    ) -> Result<Self> {
        if max_vocabulary == 0 {
            return Err(ClassifierError::invalid_argument(
                "max_vocabulary must be at least 1",
            ));
        }
        Ok(WordCountVectorizer {
            max_vocabulary,
            min_document_frequency: min_document_frequency.max(1),
            vocabulary: HashMap::new(),
            tokenizer,
        })
    }

    /// Column index of `word`, if it is part of the vocabulary.
    pub fn column(&self, word: &str) -> Option<usize> {
        self.vocabulary.get(word).copied()
    }
}

impl Vectorizer for WordCountVectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut order: Vec<String> = Vec::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for token in self.tokenizer.tokenize_to_strings(doc)? {
                if !seen.insert(token.clone()) {
                    continue;
                }
                if !document_frequency.contains_key(&token) {
                    order.push(token.clone());
                }
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::new();
        for word in order {
            if vocabulary.len() >= self.max_vocabulary {
                break;
            }
            if document_frequency.get(&word).copied().unwrap_or(0) >= self.min_document_frequency {
                let idx = vocabulary.len();
                vocabulary.insert(word, idx);
            }
        }

        log::debug!(
            "word count vectorizer fitted: {} documents, {} columns",
            documents.len(),
            vocabulary.len()
        );
        self.vocabulary = vocabulary;
        Ok(())
    }

    fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in self.tokenizer.tokenize_to_strings(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                counts[idx] += 1.0;
            }
        }
        Ok(counts)
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
