//! Naive Bayes training and scoring.
//!
//! [`trainer::NaiveBayesTrainer`] builds an immutable [`crate::model::Model`]
//! from labeled documents; [`scorer`] adds the `predict` and
//! `predict_distribution` methods to the model. All probability
//! accumulation during scoring happens in log space — multiplying many
//! probabilities in (0,1) underflows to zero for realistic vocabulary
//! sizes.

pub mod scorer;
pub mod trainer;

pub use scorer::Prediction;
pub use trainer::NaiveBayesTrainer;
