//! Length filter implementation.

use crate::analysis::filter::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Minimum token length of the default pipeline.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A filter that removes tokens shorter than a minimum length.
///
/// Very short tokens (single letters, leftover fragments from stripping
/// punctuation) are noise for a unigram model.
///
/// # Examples
///
/// ```
/// use textcat::analysis::filter::Filter;
/// use textcat::analysis::length::LengthFilter;
/// use textcat::analysis::token::Token;
///
/// let filter = LengthFilter::new();
/// let tokens = vec![Token::new("ab", 0), Token::new("abc", 1)];
///
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .collect();
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].text, "abc");
/// ```
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_length: usize,
}

impl LengthFilter {
    /// Create a length filter with the default minimum length.
    pub fn new() -> Self {
        Self::with_min_length(DEFAULT_MIN_LENGTH)
    }

    /// Create a length filter with a custom minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        LengthFilter { min_length }
    }

    /// The minimum token length this filter keeps.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_length = self.min_length;
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| token.text.chars().count() >= min_length)
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
