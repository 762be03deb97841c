//! Text analysis pipeline for classification.
//!
//! Raw text goes through a [`tokenizer::Tokenizer`] and a chain of
//! [`filter::Filter`]s before being turned into a feature map. Training and
//! inference must run the *identical* pipeline — behavioral drift between
//! the two is a correctness bug, so the default pipeline lives in one place:
//! [`analyzer::PipelineAnalyzer::standard`].

pub mod analyzer;
pub mod filter;
pub mod length;
pub mod stop;
pub mod token;
pub mod tokenizer;
