//! Thread-safe Bayes-style intent classifier.
//!
//! Counters live behind a single [`parking_lot::RwLock`]: training takes the
//! write lock for the counter updates only, classification takes the read lock,
//! and tokenization always happens before either lock is acquired. One
//! instance can be trained and queried from many threads at once.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{DefaultTokenizer, Tokenizer};
use crate::classification::feature_table::FeatureTable;
use crate::classification::{Classification, TrainingSample, validate_label};
use crate::error::{ClassifierError, Result};
use crate::persist::{self, Persist};

/// Smoothing parameters for [`IntentClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Weight given to the assumed probability of a feature.
    pub base_weight: f64,
    /// Probability assumed for a feature before any evidence.
    pub assumed_probability: f64,
}

impl Default for IntentConfig {
    fn default() -> Self {
        IntentConfig {
            base_weight: 1.0,
            assumed_probability: 0.5,
        }
    }
}

impl IntentConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_weight.is_finite() && self.base_weight > 0.0) {
            return Err(ClassifierError::invalid_argument(format!(
                "base_weight must be positive, got {}",
                self.base_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.assumed_probability) {
            return Err(ClassifierError::invalid_argument(format!(
                "assumed_probability must be within [0, 1], got {}",
                self.assumed_probability
            )));
        }
        Ok(())
    }
}

/// Persisted form of an [`IntentClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentState {
    /// Name of the tokenizer the model was trained with.
    pub tokenizer: String,
    pub config: IntentConfig,
    pub features: FeatureTable,
    pub category_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Default)]
struct IntentModel {
    config: IntentConfig,
    features: FeatureTable,
    category_counts: BTreeMap<String, u64>,
}

impl From<IntentState> for IntentModel {
    fn from(state: IntentState) -> Self {
        IntentModel {
            config: state.config,
            features: state.features,
            category_counts: state.category_counts,
        }
    }
}

impl IntentModel {
    fn total_examples(&self) -> u64 {
        self.category_counts.values().sum()
    }

    fn weighted_probability(&self, feature: &str, category: &str) -> f64 {
        let config = &self.config;
        let category_count = self.category_counts.get(category).copied().unwrap_or(0);
        let feature_probability = if category_count == 0 {
            0.0
        } else {
            self.features.count(feature, category) as f64 / category_count as f64
        };
        let observed = self.features.total(feature) as f64;

        (config.base_weight * config.assumed_probability + observed * feature_probability)
            / (config.base_weight + observed)
    }

    /// Scores for every category, in category order.
    fn scores(&self, tokens: &[String]) -> Result<Vec<(String, f64)>> {
        let total = self.total_examples();
        if total == 0 {
            return Err(ClassifierError::not_classified("no categories"));
        }
        if !tokens.iter().any(|token| self.features.contains(token)) {
            return Err(ClassifierError::not_classified(
                "query shares no features with the training data",
            ));
        }

        let scores = self
            .category_counts
            .iter()
            .map(|(category, &count)| {
                let category_probability = count as f64 / total as f64;
                let document_probability: f64 = tokens
                    .iter()
                    .map(|token| self.weighted_probability(token, category))
                    .product();
                (category.clone(), document_probability * category_probability)
            })
            .collect();
        Ok(scores)
    }
}

/// Bayes-style classifier that is safe to share between threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use textclass::classification::IntentClassifier;
///
/// let classifier = Arc::new(IntentClassifier::new());
/// classifier.train("buy cheap laptop", "Transactional").unwrap();
/// classifier.train("what is rust", "Informational").unwrap();
///
/// let result = classifier.classify("buy laptop").unwrap();
/// assert_eq!(result.label, "Transactional");
/// ```
pub struct IntentClassifier {
    model: RwLock<IntentModel>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let model = self.model.read();
        f.debug_struct("IntentClassifier")
            .field("config", &model.config)
            .field("categories", &model.category_counts.len())
            .field("features", &model.features.len())
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with default smoothing and the [`DefaultTokenizer`].
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(DefaultTokenizer::new()))
    }

    /// Create a classifier with default smoothing and the given tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        IntentClassifier {
            model: RwLock::new(IntentModel::default()),
            tokenizer,
        }
    }

    /// Create a classifier with explicit smoothing parameters.
    pub fn with_config(config: IntentConfig, tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        config.validate()?;
        Ok(IntentClassifier {
            model: RwLock::new(IntentModel {
                config,
                ..IntentModel::default()
            }),
            tokenizer,
        })
    }

    /// Record one example of `category`.
    pub fn train(&self, text: &str, category: &str) -> Result<()> {
        validate_label(category)?;
        let tokens = self.tokenizer.tokenize_to_strings(text)?;

        let mut model = self.model.write();
        for token in &tokens {
            model.features.increment(token, category);
        }
        *model.category_counts.entry(category.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Train on every sample in order.
    pub fn train_samples(&self, samples: &[TrainingSample]) -> Result<()> {
        for sample in samples {
            self.train(&sample.text, &sample.label)?;
        }
        Ok(())
    }

    /// Scores of every category for `text`, in category order.
    pub fn probabilities(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let tokens = self.tokenizer.tokenize_to_strings(text)?;
        self.model.read().scores(&tokens)
    }

    /// Pick the category with the highest score.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::NotClassified`] when the classifier is untrained, no
    /// query token was seen during training, or no score is above zero.
    pub fn classify(&self, text: &str) -> Result<Classification> {
        let scores = self.probabilities(text)?;

        let mut best: Option<(String, f64)> = None;
        let mut max = 0.0;
        for (category, score) in scores {
            if score.is_finite() && score > max {
                max = score;
                best = Some((category, score));
            }
        }

        match best {
            Some((label, score)) => {
                log::debug!("intent {label} (score {score})");
                Ok(Classification { label, score })
            }
            None => Err(ClassifierError::not_classified(
                "no category scored above zero",
            )),
        }
    }

    /// Known categories in lexicographic order.
    pub fn categories(&self) -> Vec<String> {
        self.model.read().category_counts.keys().cloned().collect()
    }

    /// Total number of training examples.
    pub fn example_count(&self) -> u64 {
        self.model.read().total_examples()
    }

    /// Active smoothing parameters.
    pub fn config(&self) -> IntentConfig {
        self.model.read().config
    }

    /// Tokenizer used for training and classification.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Replace the learned state while other threads may hold references.
    ///
    /// The state is checked first; on error nothing changes.
    pub fn replace_state(&self, state: IntentState) -> Result<()> {
        Self::validate_state(&state)?;
        self.warn_on_tokenizer_mismatch(&state.tokenizer);
        *self.model.write() = IntentModel::from(state);
        Ok(())
    }

    /// Load a model file into this shared instance.
    ///
    /// On error the current counters are left untouched.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let state = persist::load_state::<Self, _>(path)?;
        self.warn_on_tokenizer_mismatch(&state.tokenizer);
        *self.model.write() = IntentModel::from(state);
        Ok(())
    }

    fn warn_on_tokenizer_mismatch(&self, tokenizer: &str) {
        if tokenizer != self.tokenizer.name() {
            log::warn!(
                "model was trained with tokenizer '{}' but classifier uses '{}'",
                tokenizer,
                self.tokenizer.name()
            );
        }
    }
}

impl Persist for IntentClassifier {
    const MODEL_NAME: &'static str = "IntentClassifier";
    const SCHEMA_VERSION: &'static str = "01";
    type State = IntentState;

    fn export_state(&self) -> IntentState {
        let model = self.model.read();
        IntentState {
            tokenizer: self.tokenizer.name().to_string(),
            config: model.config,
            features: model.features.clone(),
            category_counts: model.category_counts.clone(),
        }
    }

    fn import_state(&mut self, state: IntentState) {
        self.warn_on_tokenizer_mismatch(&state.tokenizer);
        *self.model.get_mut() = IntentModel::from(state);
    }

    fn validate_state(state: &IntentState) -> Result<()> {
        state.config.validate()?;
        for category in state.category_counts.keys() {
            validate_label(category)?;
        }
        if let Some(category) = state
            .features
            .labels()
            .into_iter()
            .find(|category| state.category_counts.get(*category).is_none_or(|n| *n == 0))
        {
            return Err(ClassifierError::invalid_argument(format!(
                "feature counts reference category {category:?} without examples"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> IntentClassifier {
        let classifier = IntentClassifier::new();
        classifier.train("buy cheap laptop", "Transactional").unwrap();
        classifier.train("order new phone", "Transactional").unwrap();
        classifier.train("what is rust", "Informational").unwrap();
        classifier.train("how does python work", "Informational").unwrap();
        classifier
    }

    #[test]
    fn test_classify() {
        let classifier = trained();
        assert_eq!(
            classifier.classify("buy laptop").unwrap().label,
            "Transactional"
        );
        assert_eq!(
            classifier.classify("what is python").unwrap().label,
            "Informational"
        );
    }

    #[test]
    fn test_score_value() {
        let classifier = IntentClassifier::new();
        classifier.train("hello", "greeting").unwrap();
        classifier.train("bye", "farewell").unwrap();

        // (1 * 0.5 + 1 * 1.0) / (1 + 1) = 0.75, times prior 0.5
        let result = classifier.classify("hello").unwrap();
        assert_eq!(result.label, "greeting");
        assert!((result.score - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_cover_all_categories() {
        let classifier = trained();
        let scores = classifier.probabilities("buy").unwrap();
        let categories: Vec<&str> = scores.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, vec!["Informational", "Transactional"]);
        assert!(scores.iter().all(|(_, s)| *s > 0.0));
    }

    #[test]
    fn test_untrained_is_not_classified() {
        let classifier = IntentClassifier::new();
        assert!(classifier.classify("anything").unwrap_err().is_not_classified());
    }

    #[test]
    fn test_unknown_features_not_classified() {
        let classifier = trained();
        assert!(classifier.classify("zebra giraffe").unwrap_err().is_not_classified());
        assert!(classifier.classify("").unwrap_err().is_not_classified());
    }

    #[test]
    fn test_counts() {
        let classifier = trained();
        assert_eq!(classifier.example_count(), 4);
        assert_eq!(
            classifier.categories(),
            vec!["Informational".to_string(), "Transactional".to_string()]
        );
    }

    #[test]
    fn test_invalid_config() {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(DefaultTokenizer::new());
        let config = IntentConfig {
            base_weight: 0.0,
            ..IntentConfig::default()
        };
        assert!(IntentClassifier::with_config(config, tokenizer.clone()).is_err());

        let config = IntentConfig {
            assumed_probability: 1.5,
            ..IntentConfig::default()
        };
        assert!(IntentClassifier::with_config(config, tokenizer).is_err());
    }

    #[test]
    fn test_empty_category_rejected() {
        let classifier = IntentClassifier::new();
        assert!(matches!(
            classifier.train("text", ""),
            Err(ClassifierError::InvalidArgument(_))
        ));
        assert_eq!(classifier.example_count(), 0);
    }

    #[test]
    fn test_concurrent_train_and_classify() {
        let classifier = Arc::new(IntentClassifier::new());
        classifier.train("seed example", "seed").unwrap();

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let classifier = Arc::clone(&classifier);
                scope.spawn(move || {
                    for i in 0..50 {
                        let category = if i % 2 == 0 { "even" } else { "odd" };
                        classifier
                            .train(&format!("worker{worker} item{i}"), category)
                            .unwrap();
                        let _ = classifier.classify("seed");
                    }
                });
            }
        });

        assert_eq!(classifier.example_count(), 1 + 4 * 50);
        assert_eq!(classifier.categories().len(), 3);
    }

    #[test]
    fn test_replace_state_adopts_config() {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(DefaultTokenizer::new());
        let config = IntentConfig {
            base_weight: 3.0,
            assumed_probability: 0.2,
        };
        let source = IntentClassifier::with_config(config, tokenizer).unwrap();
        source.train("hello", "greeting").unwrap();

        let target = IntentClassifier::new();
        target.replace_state(source.export_state()).unwrap();
        assert_eq!(target.config(), config);
        assert_eq!(
            target.classify("hello").unwrap(),
            source.classify("hello").unwrap()
        );
    }

    #[test]
    fn test_replace_state_rejects_invalid_state() {
        let target = trained();
        let mut state = target.export_state();
        state.category_counts.remove("Informational");
        assert!(target.replace_state(state).is_err());

        let mut state = target.export_state();
        state.config.base_weight = -1.0;
        assert!(target.replace_state(state).is_err());

        assert_eq!(target.example_count(), 4);
        assert_eq!(target.config(), IntentConfig::default());
    }

    #[test]
    fn test_replace_state() {
        let source = trained();
        let target = IntentClassifier::new();
        target.train("unrelated", "other").unwrap();

        target.replace_state(source.export_state()).unwrap();
        assert_eq!(target.example_count(), 4);
        assert_eq!(
            target.classify("buy laptop").unwrap(),
            source.classify("buy laptop").unwrap()
        );
    }
}
