//! The trained model artifact and its persistence.
//!
//! A [`Model`] is created once by the trainer, is immutable thereafter, and
//! may be shared for unlimited concurrent read-only scoring. The persisted
//! form is a JSON record with `class_priors`, `word_likelihoods` (keyed
//! category → word), `vocabulary`, the feature mode, and optionally the
//! training-time stop word list for reproducible preprocessing.
//!
//! The likelihood table is dense by construction: every category holds an
//! entry for every vocabulary word. A missing entry is corruption, not an
//! implicit zero, and is rejected by [`Model::validate`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextcatError};
use crate::features::FeatureMode;

/// Tolerance for the prior-sum invariant.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// A trained Naive Bayes model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Category labels in first-seen order. Tie-breaking and display order.
    categories: Vec<String>,
    /// Category → prior probability.
    class_priors: AHashMap<String, f64>,
    /// Category → word → Laplace-smoothed conditional probability.
    word_likelihoods: AHashMap<String, AHashMap<String, f64>>,
    /// All training-time words, sorted.
    vocabulary: Vec<String>,
    /// Fast membership view of `vocabulary`.
    vocabulary_set: AHashSet<String>,
    /// Feature convention the model was trained with.
    feature_mode: FeatureMode,
    /// Stop words used during training-time preprocessing, if recorded.
    stopwords: Option<Vec<String>>,
}

impl Model {
    /// Assemble a model from trainer output. The vocabulary is sorted here
    /// so the serialized form is deterministic.
    pub(crate) fn from_parts(
        categories: Vec<String>,
        class_priors: AHashMap<String, f64>,
        word_likelihoods: AHashMap<String, AHashMap<String, f64>>,
        mut vocabulary: Vec<String>,
        feature_mode: FeatureMode,
        stopwords: Option<Vec<String>>,
    ) -> Self {
        vocabulary.sort_unstable();
        let vocabulary_set = vocabulary.iter().cloned().collect();
        Model {
            categories,
            class_priors,
            word_likelihoods,
            vocabulary,
            vocabulary_set,
            feature_mode,
            stopwords,
        }
    }

    /// Category labels in first-seen training order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Prior probability of a category.
    pub fn prior(&self, category: &str) -> Option<f64> {
        self.class_priors.get(category).copied()
    }

    /// Conditional probability of a word given a category.
    pub fn likelihood(&self, category: &str, word: &str) -> Option<f64> {
        self.word_likelihoods.get(category)?.get(word).copied()
    }

    /// The training-time vocabulary, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Whether a word was observed during training.
    pub fn contains_word(&self, word: &str) -> bool {
        self.vocabulary_set.contains(word)
    }

    /// The feature convention this model was trained with.
    pub fn feature_mode(&self) -> FeatureMode {
        self.feature_mode
    }

    /// Stop words recorded at training time, if any.
    pub fn stopwords(&self) -> Option<&[String]> {
        self.stopwords.as_deref()
    }

    /// Whether the model has at least one category.
    pub fn is_trained(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Check the structural invariants of the probability tables.
    ///
    /// Fails with [`TextcatError::UntrainedModel`] for an empty model and
    /// [`TextcatError::CorruptModel`] for zero/out-of-range priors, priors
    /// not summing to 1, or a sparse likelihood table.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(TextcatError::untrained_model("model has no categories"));
        }
        if self.categories.len() != self.class_priors.len() {
            return Err(TextcatError::corrupt_model(format!(
                "{} categories but {} priors",
                self.categories.len(),
                self.class_priors.len()
            )));
        }

        let mut prior_sum = 0.0;
        for category in &self.categories {
            let prior = self.prior(category).ok_or_else(|| {
                TextcatError::corrupt_model(format!("no prior for category {category:?}"))
            })?;
            if prior <= 0.0 || prior > 1.0 {
                return Err(TextcatError::corrupt_model(format!(
                    "prior for category {category:?} is {prior}, expected (0, 1]"
                )));
            }
            prior_sum += prior;
        }
        if (prior_sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(TextcatError::corrupt_model(format!(
                "class priors sum to {prior_sum}, expected 1"
            )));
        }

        for category in &self.categories {
            let table = self.word_likelihoods.get(category).ok_or_else(|| {
                TextcatError::corrupt_model(format!(
                    "no likelihood table for category {category:?}"
                ))
            })?;
            for word in &self.vocabulary {
                let likelihood = table.get(word).copied().ok_or_else(|| {
                    TextcatError::corrupt_model(format!(
                        "no likelihood for word {word:?} in category {category:?}"
                    ))
                })?;
                if likelihood <= 0.0 || likelihood >= 1.0 {
                    return Err(TextcatError::corrupt_model(format!(
                        "likelihood for ({category:?}, {word:?}) is {likelihood}, expected (0, 1)"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Save the model as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &ModelFile::from_model(self))?;
        Ok(())
    }

    /// Load and validate a model from a JSON file.
    ///
    /// A file missing one of the required keys (`class_priors`,
    /// `word_likelihoods`, `vocabulary`) fails with
    /// [`TextcatError::InvalidModelFile`]; a structurally invalid model
    /// fails with [`TextcatError::CorruptModel`].
    pub fn load(path: &Path) -> Result<Model> {
        let reader = BufReader::new(File::open(path)?);
        let file: ModelFile = serde_json::from_reader(reader).map_err(|e| {
            TextcatError::invalid_model_file(format!("{}: {e}", path.display()))
        })?;
        let model = file.into_model();
        model.validate()?;
        Ok(model)
    }

    /// The deterministic serialized form of the model.
    ///
    /// Retraining on an identical dataset in identical order yields an
    /// identical string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ModelFile::from_model(self))?)
    }
}

/// On-disk schema of a model file.
///
/// Maps are `BTreeMap`s so serialization order, and therefore the bytes of
/// a saved model, are deterministic.
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    /// Optional in hand-written files; defaults to sorted prior keys.
    #[serde(default)]
    categories: Vec<String>,
    class_priors: BTreeMap<String, f64>,
    word_likelihoods: BTreeMap<String, BTreeMap<String, f64>>,
    vocabulary: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopwords: Option<Vec<String>>,
    #[serde(default)]
    feature_mode: FeatureMode,
}

impl ModelFile {
    fn from_model(model: &Model) -> Self {
        let class_priors = model
            .class_priors
            .iter()
            .map(|(category, prior)| (category.clone(), *prior))
            .collect();
        let word_likelihoods = model
            .word_likelihoods
            .iter()
            .map(|(category, table)| {
                let table = table
                    .iter()
                    .map(|(word, likelihood)| (word.clone(), *likelihood))
                    .collect();
                (category.clone(), table)
            })
            .collect();

        ModelFile {
            categories: model.categories.clone(),
            class_priors,
            word_likelihoods,
            vocabulary: model.vocabulary.clone(),
            stopwords: model.stopwords.clone(),
            feature_mode: model.feature_mode,
        }
    }

    fn into_model(self) -> Model {
        let categories = if self.categories.is_empty() {
            self.class_priors.keys().cloned().collect()
        } else {
            self.categories
        };
        let class_priors = self.class_priors.into_iter().collect();
        let word_likelihoods = self
            .word_likelihoods
            .into_iter()
            .map(|(category, table)| (category, table.into_iter().collect()))
            .collect();

        Model::from_parts(
            categories,
            class_priors,
            word_likelihoods,
            self.vocabulary,
            self.feature_mode,
            self.stopwords,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> Model {
        let categories = vec!["sport".to_string(), "business".to_string()];
        let mut class_priors = AHashMap::new();
        class_priors.insert("sport".to_string(), 0.5);
        class_priors.insert("business".to_string(), 0.5);

        let vocabulary = vec!["win".to_string(), "stock".to_string()];
        let mut word_likelihoods = AHashMap::new();
        for category in &categories {
            let mut table = AHashMap::new();
            for word in &vocabulary {
                table.insert(word.clone(), 0.25);
            }
            word_likelihoods.insert(category.clone(), table);
        }

        Model::from_parts(
            categories,
            class_priors,
            word_likelihoods,
            vocabulary,
            FeatureMode::Count,
            None,
        )
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let model = tiny_model();
        assert_eq!(model.vocabulary(), &["stock".to_string(), "win".to_string()]);
        assert!(model.contains_word("win"));
        assert!(!model.contains_word("zebra"));
    }

    #[test]
    fn test_validate_accepts_well_formed_model() {
        assert!(tiny_model().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_sparse_table() {
        let mut model = tiny_model();
        model
            .word_likelihoods
            .get_mut("sport")
            .unwrap()
            .remove("win");

        match model.validate() {
            Err(TextcatError::CorruptModel(_)) => {}
            other => panic!("expected CorruptModel, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_prior_sum() {
        let mut model = tiny_model();
        model.class_priors.insert("sport".to_string(), 0.4);

        match model.validate() {
            Err(TextcatError::CorruptModel(_)) => {}
            other => panic!("expected CorruptModel, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let model = tiny_model();
        let json = model.to_json().unwrap();

        let file: ModelFile = serde_json::from_str(&json).unwrap();
        let restored = file.into_model();
        assert!(restored.validate().is_ok());
        assert_eq!(restored.categories(), model.categories());
        assert_eq!(restored.to_json().unwrap(), json);
    }

    #[test]
    fn test_missing_required_key_is_a_serde_error() {
        let json = r#"{"class_priors": {"sport": 1.0}, "vocabulary": []}"#;
        assert!(serde_json::from_str::<ModelFile>(json).is_err());
    }
}
