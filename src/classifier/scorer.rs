//! Scoring: log-space prediction and confidence distributions.
//!
//! Both entry points share the same log-score computation. `predict`
//! returns the arg-max category; `predict_distribution` normalizes the
//! scores into percentages with the log-sum-exp trick (subtract the
//! maximum before exponentiating, so large vocabularies cannot underflow
//! the normalization).

use serde::Serialize;

use crate::error::{Result, TextcatError};
use crate::features::FeatureMap;
use crate::model::Model;

/// One entry of a confidence distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Category label.
    pub category: String,
    /// Confidence as a percentage, rounded to 2 decimal places.
    pub confidence: f64,
}

impl Model {
    /// Log scores for every category, in category order.
    ///
    /// `log_score[c] = ln(prior[c]) + Σ ln(likelihood[c][w]) * value(w)`
    /// over words with positive feature value that are in the vocabulary.
    /// Words outside the vocabulary contribute no information, not a
    /// penalty, and never trigger a lookup error.
    fn log_scores(&self, features: &FeatureMap) -> Result<Vec<f64>> {
        if !self.is_trained() {
            return Err(TextcatError::untrained_model("model has no categories"));
        }

        let mut scores = Vec::with_capacity(self.categories().len());
        for category in self.categories() {
            let prior = self.prior(category).ok_or_else(|| {
                TextcatError::corrupt_model(format!("no prior for category {category:?}"))
            })?;
            if prior <= 0.0 {
                return Err(TextcatError::corrupt_model(format!(
                    "prior for category {category:?} is {prior}, ln is undefined"
                )));
            }

            let mut score = prior.ln();
            for (word, &value) in features {
                if value == 0 || !self.contains_word(word) {
                    continue;
                }
                let likelihood = self.likelihood(category, word).ok_or_else(|| {
                    TextcatError::corrupt_model(format!(
                        "no likelihood for word {word:?} in category {category:?}"
                    ))
                })?;
                score += likelihood.ln() * f64::from(value);
            }
            scores.push(score);
        }

        Ok(scores)
    }

    /// Predict the best category for a feature map.
    ///
    /// Ties break by first-seen category order, keeping results
    /// reproducible across runs given the same training order.
    pub fn predict(&self, features: &FeatureMap) -> Result<String> {
        let scores = self.log_scores(features)?;

        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }

        Ok(self.categories()[best].clone())
    }

    /// Predict the full confidence distribution for a feature map.
    ///
    /// The result is sorted by descending confidence, ties broken by
    /// category insertion order, and the percentages sum to 100.00 within
    /// rounding tolerance.
    pub fn predict_distribution(&self, features: &FeatureMap) -> Result<Vec<Prediction>> {
        let scores = self.log_scores(features)?;

        // Log-sum-exp: shift by the maximum before exponentiating.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exponentials: Vec<f64> = scores.iter().map(|score| (score - max).exp()).collect();
        let sum: f64 = exponentials.iter().sum();

        let mut order: Vec<usize> = (0..exponentials.len()).collect();
        // Stable sort: exact ties keep category insertion order.
        order.sort_by(|&a, &b| exponentials[b].total_cmp(&exponentials[a]));

        let predictions = order
            .into_iter()
            .map(|index| Prediction {
                category: self.categories()[index].clone(),
                confidence: round_percent(exponentials[index] / sum * 100.0),
            })
            .collect();

        Ok(predictions)
    }
}

/// Round a percentage to 2 decimal places.
fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
