//! Pipeline analyzer that combines a tokenizer with token filters.
//!
//! The analyzer is the single entry point for turning raw text into tokens.
//! Training and inference must use the same analyzer instance (or one built
//! from the same configuration) — drift between the two silently corrupts
//! scores.
//!
//! # Examples
//!
//! ```
//! use textcat::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//!
//! let analyzer = PipelineAnalyzer::standard();
//! let tokens: Vec<_> = analyzer.analyze("The match was won!").unwrap().collect();
//!
//! // "the" and "was" are stop words, "won" survives
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "match");
//! assert_eq!(tokens[1].text, "won");
//! ```

use std::sync::Arc;

use crate::analysis::filter::Filter;
use crate::analysis::length::LengthFilter;
use crate::analysis::stop::StopFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{AlphabeticTokenizer, Tokenizer};
use crate::error::Result;

/// Trait for analyzers that convert raw text into a token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// The standard classification pipeline: alphabetic tokenizer, default
    /// English stop words, minimum token length 3.
    pub fn standard() -> Self {
        PipelineAnalyzer::new(Arc::new(AlphabeticTokenizer::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(LengthFilter::new()))
    }

    /// The standard pipeline with a custom stop word list.
    ///
    /// Used to reproduce the preprocessing of a persisted model that
    /// recorded its training-time stop words.
    pub fn standard_with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PipelineAnalyzer::new(Arc::new(AlphabeticTokenizer::new()))
            .add_filter(Arc::new(StopFilter::from_words(words)))
            .add_filter(Arc::new(LengthFilter::new()))
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        // Apply filters in sequence
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_standard_pipeline() {
        let analyzer = PipelineAnalyzer::standard();
        let tokens: Vec<Token> = analyzer
            .analyze("The stock market fell by 2% on Monday.")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["stock", "market", "fell", "monday"]);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let analyzer = PipelineAnalyzer::standard();
        let text = "Manager praises winning goal in cup final";

        let first: Vec<Token> = analyzer.analyze(text).unwrap().collect();
        let second: Vec<Token> = analyzer.analyze(text).unwrap().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_stop_words() {
        let analyzer = PipelineAnalyzer::standard_with_stop_words(vec!["market"]);
        let tokens: Vec<Token> = analyzer.analyze("stock market rally").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["stock", "rally"]);
    }

    #[test]
    fn test_custom_pipeline() {
        let analyzer = PipelineAnalyzer::new(Arc::new(AlphabeticTokenizer::new()));
        let tokens: Vec<Token> = analyzer.analyze("The cat").unwrap().collect();

        // No filters: stop words and short tokens survive
        assert_eq!(tokens.len(), 2);
    }
}
