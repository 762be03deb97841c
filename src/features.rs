//! Feature representation shared by training and inference.
//!
//! A document is represented as a [`FeatureMap`]: word → non-negative
//! integer, under one of two conventions ([`FeatureMode`]). The convention
//! used at training time is recorded inside the model, and inference-time
//! feature maps are built with the model's own mode — mixing conventions
//! between the two code paths silently corrupts scores, so the mode never
//! travels separately from the model.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::error::Result;

/// Per-document mapping from word to its feature value.
pub type FeatureMap = AHashMap<String, u32>;

/// The feature representation convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    /// Occurrence counts (multinomial model).
    #[default]
    Count,
    /// Binary presence indicators (Bernoulli-style model).
    Presence,
}

/// A labeled training document: a feature map plus its category.
#[derive(Debug, Clone)]
pub struct LabeledDocument {
    /// Feature map of the document.
    pub features: FeatureMap,
    /// Category label.
    pub category: String,
}

impl LabeledDocument {
    /// Create a new labeled document.
    pub fn new<S: Into<String>>(features: FeatureMap, category: S) -> Self {
        LabeledDocument {
            features,
            category: category.into(),
        }
    }
}

/// Build a feature map from a token stream under the given mode.
pub fn features_from_tokens<I>(tokens: I, mode: FeatureMode) -> FeatureMap
where
    I: IntoIterator<Item = Token>,
{
    let mut features = FeatureMap::new();
    for token in tokens {
        match mode {
            FeatureMode::Count => *features.entry(token.text).or_insert(0) += 1,
            FeatureMode::Presence => {
                features.entry(token.text).or_insert(1);
            }
        }
    }
    features
}

/// Analyze raw text and build its feature map in one step.
///
/// # Examples
///
/// ```
/// use textcat::analysis::analyzer::PipelineAnalyzer;
/// use textcat::features::{FeatureMode, features_from_text};
///
/// let analyzer = PipelineAnalyzer::standard();
/// let features = features_from_text(&analyzer, "goal goal goal", FeatureMode::Count).unwrap();
/// assert_eq!(features["goal"], 3);
/// ```
pub fn features_from_text(
    analyzer: &dyn Analyzer,
    text: &str,
    mode: FeatureMode,
) -> Result<FeatureMap> {
    Ok(features_from_tokens(analyzer.analyze(text)?, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect()
    }

    #[test]
    fn test_count_mode() {
        let features = features_from_tokens(tokens(&["win", "win", "match"]), FeatureMode::Count);
        assert_eq!(features["win"], 2);
        assert_eq!(features["match"], 1);
    }

    #[test]
    fn test_presence_mode() {
        let features =
            features_from_tokens(tokens(&["win", "win", "match"]), FeatureMode::Presence);
        assert_eq!(features["win"], 1);
        assert_eq!(features["match"], 1);
    }

    #[test]
    fn test_empty_tokens() {
        let features = features_from_tokens(Vec::new(), FeatureMode::Count);
        assert!(features.is_empty());
    }
}
