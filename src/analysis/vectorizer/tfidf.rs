//! TF-IDF vectorizer for text feature extraction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::vectorizer::Vectorizer;
use crate::error::Result;

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Tokenizer for splitting documents.
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            tokenizer,
        }
    }

    /// Inverse document frequency of `word`, if it is in the vocabulary.
    pub fn idf(&self, word: &str) -> Option<f64> {
        self.vocabulary.get(word).map(|&idx| self.idf[idx])
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.n_documents = documents.len();
        let mut vocabulary = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for token in self.tokenizer.tokenize_to_strings(doc)? {
                if !seen.insert(token.clone()) {
                    continue;
                }
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                if !vocabulary.contains_key(&token) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token, idx);
                }
            }
        }

        let mut idf = vec![0.0; vocabulary.len()];
        for (word, idx) in &vocabulary {
            let df = document_frequency.get(word).copied().unwrap_or(0);
            // IDF = log((N + 1) / (df + 1)) + 1
            idf[*idx] = ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = self.tokenizer.tokenize_to_strings(document)?;
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        // Normalize by document length
        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (idx, count) in tf.iter_mut().enumerate() {
            *count *= self.idf[idx];
        }

        Ok(tf)
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
