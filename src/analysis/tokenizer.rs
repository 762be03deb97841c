//! Tokenizer implementations for text analysis.

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that keeps alphabetic text only.
///
/// Lower-cases the input, deletes every character that is neither an ASCII
/// letter nor whitespace, and splits on whitespace. This is deliberately
/// aggressive: numbers and punctuation carry no signal for topical
/// categorization with a unigram model.
///
/// # Examples
///
/// ```
/// use textcat::analysis::tokenizer::{AlphabeticTokenizer, Tokenizer};
///
/// let tokenizer = AlphabeticTokenizer::new();
/// let tokens: Vec<_> = tokenizer.tokenize("Stocks rose 3.5% today!").unwrap().collect();
/// assert_eq!(tokens[0].text, "stocks");
/// assert_eq!(tokens[1].text, "rose");
/// assert_eq!(tokens[2].text, "today");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AlphabeticTokenizer;

impl AlphabeticTokenizer {
    /// Create a new alphabetic tokenizer.
    pub fn new() -> Self {
        AlphabeticTokenizer
    }
}

impl Tokenizer for AlphabeticTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();

        let tokens: Vec<Token> = stripped
            .split_whitespace()
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphabetic"
    }
}
