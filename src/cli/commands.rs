//! Command implementations for the textcat CLI.

use std::fs;
use std::time::Instant;

use serde::Serialize;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::stop;
use crate::classifier::{NaiveBayesTrainer, Prediction};
use crate::cli::args::*;
use crate::dataset::{self, DatasetReader};
use crate::error::{Result, TextcatError};
use crate::evaluate::evaluate;
use crate::features::features_from_text;
use crate::model::Model;

/// Execute a CLI command.
pub fn execute_command(args: TextcatArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args.clone(), &args),
        Command::Split(split_args) => split(split_args.clone(), &args),
    }
}

#[derive(Debug, Serialize)]
struct TrainResult {
    documents: usize,
    categories: Vec<String>,
    vocabulary_size: usize,
    elapsed_ms: u64,
    model_path: String,
}

/// Train a model from a CSV dataset.
fn train(args: TrainArgs, cli_args: &TextcatArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Loading dataset from: {}", args.dataset.display());
    }

    let mut reader = DatasetReader::with_mode(args.mode.into());
    if let Some(categories) = &args.categories {
        reader = reader.allow_categories(categories.iter().cloned());
    }
    let documents = reader.read_csv(&args.dataset)?;

    if cli_args.verbosity() > 1 {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for document in &documents {
            match counts.iter_mut().find(|(c, _)| c == &document.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((document.category.clone(), 1)),
            }
        }
        println!("Category distribution:");
        for (category, count) in &counts {
            println!(
                "  {category}: {count} documents ({:.1}%)",
                *count as f64 / documents.len() as f64 * 100.0
            );
        }
    }

    let start_time = Instant::now();
    let model = NaiveBayesTrainer::with_mode(args.mode.into())
        .stopwords(stop::default_words())
        .train(&documents)?;
    let elapsed_ms = start_time.elapsed().as_millis() as u64;

    model.save(&args.model)?;

    let result = TrainResult {
        documents: documents.len(),
        categories: model.categories().to_vec(),
        vocabulary_size: model.vocabulary().len(),
        elapsed_ms,
        model_path: args.model.to_string_lossy().to_string(),
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&result, cli_args)?,
        OutputFormat::Human => {
            println!(
                "Trained {} categories from {} documents ({} words) in {} ms",
                result.categories.len(),
                result.documents,
                result.vocabulary_size,
                result.elapsed_ms
            );
            println!("Model saved to: {}", result.model_path);
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct ClassifyResult {
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<Vec<Prediction>>,
}

/// Classify a single text with a trained model.
fn classify(args: ClassifyArgs, cli_args: &TextcatArgs) -> Result<()> {
    let model = Model::load(&args.model)?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(TextcatError::invalid_argument(
                "no text to classify; pass TEXT or --file",
            ));
        }
    };

    // Rebuild the training-time pipeline: same stop words, same tokenizer.
    let analyzer = match model.stopwords() {
        Some(words) => PipelineAnalyzer::standard_with_stop_words(words.iter().cloned()),
        None => PipelineAnalyzer::standard(),
    };
    let features = features_from_text(&analyzer, &text, model.feature_mode())?;

    let result = if args.distribution {
        let distribution = model.predict_distribution(&features)?;
        ClassifyResult {
            category: distribution[0].category.clone(),
            distribution: Some(distribution),
        }
    } else {
        ClassifyResult {
            category: model.predict(&features)?,
            distribution: None,
        }
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&result, cli_args)?,
        OutputFormat::Human => {
            println!("Category: {}", result.category);
            if let Some(distribution) = &result.distribution {
                for prediction in distribution {
                    println!("  {:<15} {:>6.2}%", prediction.category, prediction.confidence);
                }
            }
        }
    }

    Ok(())
}

/// Evaluate a model against a labeled dataset.
fn evaluate_model(args: EvaluateArgs, cli_args: &TextcatArgs) -> Result<()> {
    let model = Model::load(&args.model)?;

    // Read with the model's own conventions so evaluation cannot drift.
    let documents = DatasetReader::with_mode(model.feature_mode())
        .allow_categories(model.categories().iter().cloned())
        .read_csv(&args.dataset)?;

    if cli_args.verbosity() > 0 {
        println!(
            "Evaluating {} documents against {} categories",
            documents.len(),
            model.categories().len()
        );
    }

    let evaluation = evaluate(&model, &documents)?;

    match cli_args.output_format {
        OutputFormat::Json => print_json(&evaluation, cli_args)?,
        OutputFormat::Human => {
            println!("Accuracy:  {:.2}%", evaluation.accuracy * 100.0);
            println!("Precision: {:.2}%", evaluation.precision * 100.0);
            println!("Recall:    {:.2}%", evaluation.recall * 100.0);
            println!("F1-Score:  {:.2}%", evaluation.f1 * 100.0);
            println!();
            println!(
                "{:<15} {:>10} {:>10} {:>10} {:>10}",
                "Category", "Precision", "Recall", "F1-Score", "Support"
            );
            for metrics in &evaluation.per_category {
                println!(
                    "{:<15} {:>9.2}% {:>9.2}% {:>9.2}% {:>10}",
                    metrics.category,
                    metrics.precision * 100.0,
                    metrics.recall * 100.0,
                    metrics.f1 * 100.0,
                    metrics.support
                );
            }
            println!();
            println!("Confusion matrix (rows = actual, columns = predicted):");
            print!("{}", evaluation.confusion);
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct SplitResult {
    train_documents: usize,
    test_documents: usize,
    train_path: String,
    test_path: String,
}

/// Split a dataset into train and test subsets.
fn split(args: SplitArgs, cli_args: &TextcatArgs) -> Result<()> {
    let documents = DatasetReader::new().read_csv(&args.dataset)?;
    let (train, test) = dataset::train_test_split(documents, args.test_ratio, args.seed)?;

    dataset::write_csv(&args.train_out, &train)?;
    dataset::write_csv(&args.test_out, &test)?;

    let result = SplitResult {
        train_documents: train.len(),
        test_documents: test.len(),
        train_path: args.train_out.to_string_lossy().to_string(),
        test_path: args.test_out.to_string_lossy().to_string(),
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&result, cli_args)?,
        OutputFormat::Human => {
            println!(
                "Split into {} train / {} test documents",
                result.train_documents, result.test_documents
            );
            println!("Train set: {}", result.train_path);
            println!("Test set:  {}", result.test_path);
        }
    }

    Ok(())
}

/// Print a value as JSON, pretty-printed when requested.
fn print_json<T: Serialize>(value: &T, cli_args: &TextcatArgs) -> Result<()> {
    let rendered = if cli_args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
