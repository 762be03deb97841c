//! Model builder: estimates class priors and Laplace-smoothed
//! word-conditional probabilities from a labeled training set.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::error::{Result, TextcatError};
use crate::features::{FeatureMode, LabeledDocument};
use crate::model::{Model, PRIOR_SUM_TOLERANCE};

/// Trainer for Naive Bayes models.
///
/// Training is a single batch computation: it consumes the full document
/// set and produces a finished [`Model`] or fails. There is no incremental
/// update; retraining always starts from scratch.
///
/// # Examples
///
/// ```
/// use textcat::classifier::NaiveBayesTrainer;
/// use textcat::features::{FeatureMap, LabeledDocument};
///
/// let mut features = FeatureMap::new();
/// features.insert("win".to_string(), 1);
/// let documents = vec![LabeledDocument::new(features, "sport")];
///
/// let model = NaiveBayesTrainer::new().train(&documents).unwrap();
/// assert_eq!(model.categories(), &["sport".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesTrainer {
    mode: FeatureMode,
    stopwords: Option<Vec<String>>,
}

impl NaiveBayesTrainer {
    /// Create a trainer with the default feature mode (counts).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trainer with an explicit feature mode. The mode is recorded
    /// in the model so inference builds its feature maps the same way.
    pub fn with_mode(mode: FeatureMode) -> Self {
        NaiveBayesTrainer {
            mode,
            stopwords: None,
        }
    }

    /// Record the preprocessing stop word list in the trained model.
    pub fn stopwords(mut self, words: Vec<String>) -> Self {
        self.stopwords = Some(words);
        self
    }

    /// Train a model from labeled documents.
    ///
    /// Fails with [`TextcatError::EmptyTrainingSet`] if `documents` is
    /// empty. Category order in the resulting model is first-seen order,
    /// which makes tie-breaking reproducible across runs given the same
    /// training order.
    pub fn train(&self, documents: &[LabeledDocument]) -> Result<Model> {
        if documents.is_empty() {
            return Err(TextcatError::EmptyTrainingSet);
        }

        let total_documents = documents.len();
        let mut categories: Vec<String> = Vec::new();
        let mut doc_counts: AHashMap<String, usize> = AHashMap::new();
        let mut word_counts: AHashMap<String, AHashMap<String, u64>> = AHashMap::new();
        let mut total_words: AHashMap<String, u64> = AHashMap::new();
        let mut vocabulary: BTreeSet<String> = BTreeSet::new();

        for document in documents {
            if !doc_counts.contains_key(&document.category) {
                categories.push(document.category.clone());
            }
            *doc_counts.entry(document.category.clone()).or_insert(0) += 1;

            let counts = word_counts.entry(document.category.clone()).or_default();
            let total = total_words.entry(document.category.clone()).or_insert(0);
            for (word, &value) in &document.features {
                if value > 0 {
                    // The raw feature value is added, not merely flagged:
                    // 1 in presence mode, the occurrence count otherwise.
                    *counts.entry(word.clone()).or_insert(0) += u64::from(value);
                    *total += u64::from(value);
                    if !vocabulary.contains(word) {
                        vocabulary.insert(word.clone());
                    }
                }
            }
        }

        let mut class_priors: AHashMap<String, f64> =
            AHashMap::with_capacity(categories.len());
        for category in &categories {
            class_priors.insert(
                category.clone(),
                doc_counts[category] as f64 / total_documents as f64,
            );
        }
        let prior_sum: f64 = class_priors.values().sum();
        if (prior_sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(TextcatError::corrupt_model(format!(
                "class priors sum to {prior_sum}, expected 1"
            )));
        }

        // Finalize the dynamic accumulation maps into a dense table:
        // every (category, word) pair is materialized, Laplace-smoothed
        // with pseudo-count 1 so no entry is ever exactly 0.
        let vocabulary: Vec<String> = vocabulary.into_iter().collect();
        let vocab_size = vocabulary.len() as f64;
        let mut word_likelihoods: AHashMap<String, AHashMap<String, f64>> =
            AHashMap::with_capacity(categories.len());
        for category in &categories {
            let counts = &word_counts[category];
            let denominator = total_words[category] as f64 + vocab_size;
            let mut table: AHashMap<String, f64> = AHashMap::with_capacity(vocabulary.len());
            for word in &vocabulary {
                let count = counts.get(word).copied().unwrap_or(0) as f64;
                table.insert(word.clone(), (count + 1.0) / denominator);
            }
            word_likelihoods.insert(category.clone(), table);
        }

        Ok(Model::from_parts(
            categories,
            class_priors,
            word_likelihoods,
            vocabulary,
            self.mode,
            self.stopwords.clone(),
        ))
    }
}
