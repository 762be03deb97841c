//! # textcat
//!
//! A Naive Bayes text categorization library for Rust.
//!
//! ## Features
//!
//! - Multinomial/Bernoulli Naive Bayes with Laplace smoothing
//! - Log-space scoring and log-sum-exp confidence distributions
//! - Deterministic analysis pipeline (tokenizer, stop words, length filter)
//! - Tabular CSV dataset loading and seeded train/test splitting
//! - Precision/recall/F1 evaluation with confusion matrices
//! - JSON model persistence with load-time validation
//!
//! ## Example
//!
//! ```
//! use textcat::prelude::*;
//!
//! let analyzer = PipelineAnalyzer::standard();
//! let mode = FeatureMode::Count;
//!
//! let documents = vec![
//!     LabeledDocument::new(
//!         features_from_text(&analyzer, "The team won the match", mode)?,
//!         "sport",
//!     ),
//!     LabeledDocument::new(
//!         features_from_text(&analyzer, "The stock market rallied", mode)?,
//!         "business",
//!     ),
//! ];
//!
//! let model = NaiveBayesTrainer::with_mode(mode).train(&documents)?;
//! let features = features_from_text(&analyzer, "They won again", model.feature_mode())?;
//! assert_eq!(model.predict(&features)?, "sport");
//! # Ok::<(), TextcatError>(())
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod model;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    pub use crate::classifier::{NaiveBayesTrainer, Prediction};
    pub use crate::dataset::{DatasetReader, train_test_split};
    pub use crate::error::{Result, TextcatError};
    pub use crate::evaluate::{Evaluation, evaluate};
    pub use crate::features::{
        FeatureMap, FeatureMode, LabeledDocument, features_from_text, features_from_tokens,
    };
    pub use crate::model::Model;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
