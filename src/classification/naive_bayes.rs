//! Naive Bayes text classifier with Laplace smoothing.
//!
//! The classifier learns, for every label, how often each (case-folded) token
//! occurred under it. A query is scored against every label with the add-one
//! smoothed token probability
//!
//! ```text
//! P(token | label) = (count(token, label) + 1) / (distinct_words(label) + vocabulary_size)
//! ```
//!
//! where `vocabulary_size` is the number of token *occurrences* seen during
//! training across all labels, not the number of distinct words.
//!
//! How the per-token probabilities combine into a label score is chosen by
//! [`ScoringRule`]. The default, [`ScoringRule::Additive`], sums them and is
//! what models trained by earlier releases expect. [`ScoringRule::LogLikelihood`]
//! is the textbook joint log-probability including the label prior; it ranks
//! labels differently and is opt-in.
//!
//! Labels are visited in lexicographic order and only a strictly greater score
//! replaces the running best, so ties resolve to the smallest label.
//!
//! This type is not internally synchronized. Training needs `&mut self`; share
//! a trained instance behind a lock if several threads must train it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{DefaultTokenizer, Tokenizer};
use crate::classification::feature_table::FeatureTable;
use crate::classification::{Classification, TrainingSample, validate_label};
use crate::error::{ClassifierError, Result};
use crate::persist::Persist;

/// How per-token probabilities are combined into a label score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// Sum of per-token probabilities.
    #[default]
    Additive,
    /// `ln(prior) + Σ ln(P(token | label))`.
    LogLikelihood,
}

/// Configuration for the Naive Bayes classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaiveBayesConfig {
    /// Rule used to combine token probabilities.
    pub scoring: ScoringRule,
}

/// Aggregate state for one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Number of documents learned under this label.
    pub examples: u64,
    /// Distinct words seen under this label.
    pub words: BTreeSet<String>,
}

/// Persisted form of a [`NaiveBayesClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesState {
    /// Name of the tokenizer the model was trained with.
    pub tokenizer: String,
    pub config: NaiveBayesConfig,
    pub words: FeatureTable,
    pub classes: BTreeMap<String, ClassStats>,
    pub vocabulary_size: u64,
}

/// Bag-of-words probabilistic classifier.
pub struct NaiveBayesClassifier {
    config: NaiveBayesConfig,
    words: FeatureTable,
    classes: BTreeMap<String, ClassStats>,
    /// Total token occurrences observed across all labels.
    vocabulary_size: u64,
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for NaiveBayesClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaiveBayesClassifier")
            .field("config", &self.config)
            .field("labels", &self.classes.len())
            .field("distinct_words", &self.words.len())
            .field("vocabulary_size", &self.vocabulary_size)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NaiveBayesClassifier {
    /// Create a classifier using the [`DefaultTokenizer`].
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(DefaultTokenizer::new()))
    }

    /// Create a classifier using the given tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_config(NaiveBayesConfig::default(), tokenizer)
    }

    /// Create a classifier with explicit configuration.
    pub fn with_config(config: NaiveBayesConfig, tokenizer: Arc<dyn Tokenizer>) -> Self {
        NaiveBayesClassifier {
            config,
            words: FeatureTable::new(),
            classes: BTreeMap::new(),
            vocabulary_size: 0,
            tokenizer,
        }
    }

    /// Learn that `text` belongs to `label`.
    ///
    /// Empty text still registers the label but adds no word counts.
    pub fn learn(&mut self, text: &str, label: &str) -> Result<()> {
        validate_label(label)?;
        let tokens = self.tokenizer.tokenize_to_strings(text)?;
        self.learn_tokens(tokens, label)
    }

    /// Learn from an already tokenized document.
    pub fn learn_tokens<I, S>(&mut self, tokens: I, label: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_label(label)?;
        let class = self.classes.entry(label.to_string()).or_default();
        class.examples += 1;

        for token in tokens {
            let word = token.as_ref().to_lowercase();
            self.words.increment(&word, label);
            class.words.insert(word);
            self.vocabulary_size += 1;
        }
        Ok(())
    }

    /// Learn every sample in order.
    pub fn learn_samples(&mut self, samples: &[TrainingSample]) -> Result<()> {
        for sample in samples {
            self.learn(&sample.text, &sample.label)?;
        }
        Ok(())
    }

    /// Smoothed probability of `token` under `label`.
    ///
    /// Returns `None` for an unknown label or while nothing has been learned.
    pub fn token_probability(&self, token: &str, label: &str) -> Option<f64> {
        let class = self.classes.get(label)?;
        self.smoothed_probability(&token.to_lowercase(), label, class)
    }

    fn smoothed_probability(&self, word: &str, label: &str, class: &ClassStats) -> Option<f64> {
        let denominator = class.words.len() as f64 + self.vocabulary_size as f64;
        if denominator == 0.0 {
            return None;
        }
        Some((self.words.count(word, label) as f64 + 1.0) / denominator)
    }

    /// Score `text` against every label, in label order.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::NotClassified`] when nothing has been learned or the
    /// query has no tokens.
    pub fn scores(&self, text: &str) -> Result<Vec<(String, f64)>> {
        if self.classes.is_empty() {
            return Err(ClassifierError::not_classified("no categories"));
        }
        if self.vocabulary_size == 0 {
            return Err(ClassifierError::not_classified("vocabulary is empty"));
        }

        let tokens: Vec<String> = self
            .tokenizer
            .tokenize_to_strings(&text.to_lowercase())?
            .into_iter()
            .map(|token| token.to_lowercase())
            .collect();
        if tokens.is_empty() {
            return Err(ClassifierError::not_classified("query has no tokens"));
        }

        let total_examples: u64 = self.classes.values().map(|c| c.examples).sum();
        let mut scores = Vec::with_capacity(self.classes.len());

        for (label, class) in &self.classes {
            let mut score = match self.config.scoring {
                ScoringRule::Additive => 0.0,
                ScoringRule::LogLikelihood => {
                    (class.examples as f64 / total_examples as f64).ln()
                }
            };
            for token in &tokens {
                let Some(probability) = self.smoothed_probability(token, label, class) else {
                    continue;
                };
                log::trace!("token={token} label={label} probability={probability}");
                score += match self.config.scoring {
                    ScoringRule::Additive => probability,
                    ScoringRule::LogLikelihood => probability.ln(),
                };
            }
            scores.push((label.clone(), score));
        }

        Ok(scores)
    }

    /// Determine which label `text` belongs to.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::NotClassified`] when no label produces a finite score.
    pub fn classify(&self, text: &str) -> Result<Classification> {
        let mut best: Option<(String, f64)> = None;
        for (label, score) in self.scores(text)? {
            if !score.is_finite() {
                continue;
            }
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((label, score));
            }
        }

        match best {
            Some((label, score)) => {
                log::debug!("classified as {label} (score {score})");
                Ok(Classification { label, score })
            }
            None => Err(ClassifierError::not_classified(
                "no category produced a usable score",
            )),
        }
    }

    /// Known labels in lexicographic order.
    pub fn labels(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Statistics for one label.
    pub fn class_stats(&self, label: &str) -> Option<&ClassStats> {
        self.classes.get(label)
    }

    /// Total token occurrences learned.
    pub fn vocabulary_size(&self) -> u64 {
        self.vocabulary_size
    }

    /// Number of distinct words learned.
    pub fn distinct_words(&self) -> usize {
        self.words.len()
    }

    /// Active configuration.
    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Tokenizer used for learning and classification.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

impl Persist for NaiveBayesClassifier {
    const MODEL_NAME: &'static str = "NaiveBayes";
    const SCHEMA_VERSION: &'static str = "01";
    type State = NaiveBayesState;

    fn export_state(&self) -> NaiveBayesState {
        NaiveBayesState {
            tokenizer: self.tokenizer.name().to_string(),
            config: self.config,
            words: self.words.clone(),
            classes: self.classes.clone(),
            vocabulary_size: self.vocabulary_size,
        }
    }

    fn import_state(&mut self, state: NaiveBayesState) {
        if state.tokenizer != self.tokenizer.name() {
            log::warn!(
                "model was trained with tokenizer '{}' but classifier uses '{}'",
                state.tokenizer,
                self.tokenizer.name()
            );
        }
        self.config = state.config;
        self.words = state.words;
        self.classes = state.classes;
        self.vocabulary_size = state.vocabulary_size;
    }

    fn validate_state(state: &NaiveBayesState) -> Result<()> {
        for label in state.classes.keys() {
            validate_label(label)?;
        }
        if let Some(label) = state
            .words
            .labels()
            .into_iter()
            .find(|label| !state.classes.contains_key(*label))
        {
            return Err(ClassifierError::invalid_argument(format!(
                "word counts reference unknown label {label:?}"
            )));
        }
        let occurrences = state.words.total_occurrences();
        if occurrences != state.vocabulary_size {
            return Err(ClassifierError::invalid_argument(format!(
                "vocabulary size {} does not match {occurrences} recorded occurrences",
                state.vocabulary_size
            )));
        }
        Ok(())
    }
}
