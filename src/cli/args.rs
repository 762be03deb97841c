//! Command line argument parsing for the textcat CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::features::FeatureMode;

/// textcat - Naive Bayes text categorization
#[derive(Parser, Debug, Clone)]
#[command(name = "textcat")]
#[command(about = "Train, evaluate and run Naive Bayes text classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TextcatArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TextcatArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Feature representation convention, as a CLI value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureModeArg {
    /// Occurrence counts
    Count,
    /// Binary presence indicators
    Presence,
}

impl From<FeatureModeArg> for FeatureMode {
    fn from(mode: FeatureModeArg) -> Self {
        match mode {
            FeatureModeArg::Count => FeatureMode::Count,
            FeatureModeArg::Presence => FeatureMode::Presence,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a CSV dataset
    Train(TrainArgs),

    /// Classify text with a trained model
    Classify(ClassifyArgs),

    /// Evaluate a model against a labeled dataset
    Evaluate(EvaluateArgs),

    /// Split a dataset into train and test sets
    Split(SplitArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the training dataset (CSV)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Output path for the trained model (JSON)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Feature representation convention
    #[arg(long, default_value = "count")]
    pub mode: FeatureModeArg,

    /// Restrict labels to this comma-separated set
    #[arg(long, value_delimiter = ',', value_name = "CATEGORIES")]
    pub categories: Option<Vec<String>>,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to the trained model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the full confidence distribution
    #[arg(short, long)]
    pub distribution: bool,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the trained model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Path to the labeled test dataset (CSV)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,
}

/// Arguments for dataset splitting
#[derive(Parser, Debug, Clone)]
pub struct SplitArgs {
    /// Path to the dataset to split (CSV)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Output path for the training subset
    #[arg(long, value_name = "FILE")]
    pub train_out: PathBuf,

    /// Output path for the test subset
    #[arg(long, value_name = "FILE")]
    pub test_out: PathBuf,

    /// Fraction of documents assigned to the test subset
    #[arg(long, default_value = "0.2")]
    pub test_ratio: f64,

    /// Shuffle seed
    #[arg(long, default_value = "42")]
    pub seed: u64,
}
