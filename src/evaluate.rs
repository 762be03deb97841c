//! Model evaluation: accuracy, precision/recall/F1, confusion matrix.
//!
//! Scoring is a pure function of an immutable model, so the batch
//! predictions run in parallel with rayon.

use std::fmt;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Result, TextcatError};
use crate::features::LabeledDocument;
use crate::model::Model;

/// Precision, recall and F1 for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMetrics {
    /// Category label.
    pub category: String,
    /// tp / (tp + fp); 0 when the category was never predicted.
    pub precision: f64,
    /// tp / (tp + fn); 0 when the category has no true examples.
    pub recall: f64,
    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub f1: f64,
    /// Number of true examples of this category.
    pub support: usize,
}

/// Confusion matrix in model category order.
#[derive(Debug, Clone, Serialize)]
pub struct ConfusionMatrix {
    /// Category labels, in model order.
    pub categories: Vec<String>,
    /// `counts[actual][predicted]`.
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Count of documents with the given actual label predicted as the
    /// given label.
    pub fn count(&self, actual: &str, predicted: &str) -> usize {
        let find = |label: &str| self.categories.iter().position(|c| c == label);
        match (find(actual), find(predicted)) {
            (Some(a), Some(p)) => self.counts[a][p],
            _ => 0,
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .categories
            .iter()
            .map(|c| c.len())
            .max()
            .unwrap_or(0)
            .max(5);

        write!(f, "{:width$} ", "")?;
        for category in &self.categories {
            write!(f, "{category:>width$} ")?;
        }
        writeln!(f)?;

        for (row, category) in self.categories.iter().enumerate() {
            write!(f, "{category:width$} ")?;
            for count in &self.counts[row] {
                write!(f, "{count:>width$} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Full evaluation result. Aggregate precision/recall/F1 are weighted by
/// category support.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Support-weighted precision.
    pub precision: f64,
    /// Support-weighted recall.
    pub recall: f64,
    /// Support-weighted F1.
    pub f1: f64,
    /// Per-category metrics, in model category order.
    pub per_category: Vec<CategoryMetrics>,
    /// Confusion matrix, rows = actual, columns = predicted.
    pub confusion: ConfusionMatrix,
}

/// Evaluate a model against labeled documents.
///
/// Fails with [`TextcatError::InvalidCategory`] if a true label is unknown
/// to the model and with a dataset error when `documents` is empty.
pub fn evaluate(model: &Model, documents: &[LabeledDocument]) -> Result<Evaluation> {
    if documents.is_empty() {
        return Err(TextcatError::dataset("no documents to evaluate"));
    }

    let index: AHashMap<&str, usize> = model
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| (category.as_str(), i))
        .collect();
    for document in documents {
        if !index.contains_key(document.category.as_str()) {
            return Err(TextcatError::invalid_category(document.category.clone()));
        }
    }

    let predictions: Vec<String> = documents
        .par_iter()
        .map(|document| model.predict(&document.features))
        .collect::<Result<Vec<_>>>()?;

    let n = model.categories().len();
    let mut counts = vec![vec![0usize; n]; n];
    let mut correct = 0usize;
    for (document, prediction) in documents.iter().zip(&predictions) {
        let actual = index[document.category.as_str()];
        let predicted = index[prediction.as_str()];
        counts[actual][predicted] += 1;
        if actual == predicted {
            correct += 1;
        }
    }

    let total = documents.len();
    let mut per_category = Vec::with_capacity(n);
    let mut weighted_precision = 0.0;
    let mut weighted_recall = 0.0;
    let mut weighted_f1 = 0.0;
    for (i, category) in model.categories().iter().enumerate() {
        let tp = counts[i][i];
        let predicted_as: usize = (0..n).map(|a| counts[a][i]).sum();
        let support: usize = counts[i].iter().sum();

        let precision = ratio(tp, predicted_as);
        let recall = ratio(tp, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        let weight = support as f64 / total as f64;
        weighted_precision += precision * weight;
        weighted_recall += recall * weight;
        weighted_f1 += f1 * weight;

        per_category.push(CategoryMetrics {
            category: category.clone(),
            precision,
            recall,
            f1,
            support,
        });
    }

    Ok(Evaluation {
        accuracy: correct as f64 / total as f64,
        precision: weighted_precision,
        recall: weighted_recall,
        f1: weighted_f1,
        per_category,
        confusion: ConfusionMatrix {
            categories: model.categories().to_vec(),
            counts,
        },
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
