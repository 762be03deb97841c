//! End-to-end classification scenarios: raw text through the analysis
//! pipeline, training, and both prediction APIs.

use textcat::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use textcat::classifier::NaiveBayesTrainer;
use textcat::error::TextcatError;
use textcat::features::{FeatureMap, FeatureMode, LabeledDocument, features_from_text};
use textcat::model::Model;

fn train_from_texts(texts: &[(&str, &str)]) -> (Model, PipelineAnalyzer) {
    let analyzer = PipelineAnalyzer::standard();
    let documents: Vec<LabeledDocument> = texts
        .iter()
        .map(|(text, category)| {
            let features = features_from_text(&analyzer, text, FeatureMode::Count).unwrap();
            LabeledDocument::new(features, *category)
        })
        .collect();
    let model = NaiveBayesTrainer::new().train(&documents).unwrap();
    (model, analyzer)
}

fn features_for(model: &Model, analyzer: &PipelineAnalyzer, text: &str) -> FeatureMap {
    features_from_text(analyzer, text, model.feature_mode()).unwrap()
}

const SPORT_TEXTS: [&str; 3] = [
    "The team won the match after a late goal",
    "Striker scores twice as the champions win again",
    "Coach praises players after winning the cup final",
];

const BUSINESS_TEXTS: [&str; 3] = [
    "The stock market rallied after strong earnings",
    "Shares fell as investors worried about inflation",
    "The company reported record quarterly profits",
];

fn training_pairs() -> Vec<(&'static str, &'static str)> {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for text in SPORT_TEXTS {
        pairs.push((text, "sport"));
    }
    for text in BUSINESS_TEXTS {
        pairs.push((text, "business"));
    }
    pairs
}

#[test]
fn test_classify_raw_text() {
    let (model, analyzer) = train_from_texts(&training_pairs());

    let features = features_for(&model, &analyzer, "They won the match");
    assert_eq!(model.predict(&features).unwrap(), "sport");

    let features = features_for(&model, &analyzer, "Stock shares and earnings");
    assert_eq!(model.predict(&features).unwrap(), "business");
}

#[test]
fn test_distribution_sums_to_one_hundred() {
    let (model, analyzer) = train_from_texts(&training_pairs());

    let features = features_for(&model, &analyzer, "The champions won the cup");
    let distribution = model.predict_distribution(&features).unwrap();

    assert_eq!(distribution.len(), model.categories().len());
    let sum: f64 = distribution.iter().map(|p| p.confidence).sum();
    assert!((sum - 100.0).abs() < 0.02, "distribution sums to {sum}");
    for window in distribution.windows(2) {
        assert!(window[0].confidence >= window[1].confidence);
    }
}

#[test]
fn test_predict_matches_distribution_head() {
    let (model, analyzer) = train_from_texts(&training_pairs());

    for text in [
        "goal scored in the final",
        "profits and shares",
        "completely unrelated words zebra quux",
        "",
    ] {
        let features = features_for(&model, &analyzer, text);
        let predicted = model.predict(&features).unwrap();
        let distribution = model.predict_distribution(&features).unwrap();
        assert_eq!(predicted, distribution[0].category, "text: {text:?}");
    }
}

#[test]
fn test_unknown_words_are_ignored() {
    let (model, analyzer) = train_from_texts(&training_pairs());

    let plain = features_for(&model, &analyzer, "The team won the match");
    let padded = features_for(
        &model,
        &analyzer,
        "The team won the match xylophone quasar blorptastic",
    );

    assert_eq!(
        model.predict(&plain).unwrap(),
        model.predict(&padded).unwrap()
    );
    assert_eq!(
        model.predict_distribution(&plain).unwrap(),
        model.predict_distribution(&padded).unwrap()
    );
}

#[test]
fn test_single_category_is_certain() {
    let (model, analyzer) = train_from_texts(&[("The team won the match", "sport")]);

    let features = features_for(&model, &analyzer, "anything at all");
    let distribution = model.predict_distribution(&features).unwrap();

    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0].category, "sport");
    assert_eq!(distribution[0].confidence, 100.0);
}

#[test]
fn test_retraining_is_bit_identical() {
    let analyzer = PipelineAnalyzer::standard();
    let documents: Vec<LabeledDocument> = training_pairs()
        .iter()
        .map(|(text, category)| {
            let features = features_from_text(&analyzer, text, FeatureMode::Count).unwrap();
            LabeledDocument::new(features, *category)
        })
        .collect();

    let first = NaiveBayesTrainer::new().train(&documents).unwrap();
    let second = NaiveBayesTrainer::new().train(&documents).unwrap();

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_training_and_inference_share_the_pipeline() {
    // Drift guard: features built at inference time from a training text
    // must equal the features that text produced during training.
    let analyzer = PipelineAnalyzer::standard();
    let text = SPORT_TEXTS[0];

    let at_train_time = features_from_text(&analyzer, text, FeatureMode::Count).unwrap();
    let at_inference_time = features_from_text(&analyzer, text, FeatureMode::Count).unwrap();
    assert_eq!(at_train_time, at_inference_time);
}

#[test]
fn test_presence_mode_end_to_end() {
    let analyzer = PipelineAnalyzer::standard();
    let documents: Vec<LabeledDocument> = training_pairs()
        .iter()
        .map(|(text, category)| {
            let features = features_from_text(&analyzer, text, FeatureMode::Presence).unwrap();
            LabeledDocument::new(features, *category)
        })
        .collect();

    let model = NaiveBayesTrainer::with_mode(FeatureMode::Presence)
        .train(&documents)
        .unwrap();
    assert_eq!(model.feature_mode(), FeatureMode::Presence);

    // The mode travels with the model, so inference clamps the same way.
    let features = features_for(&model, &analyzer, "win win win the match match");
    assert!(features.values().all(|&v| v == 1));
    assert_eq!(model.predict(&features).unwrap(), "sport");
}

#[test]
fn test_empty_training_set_is_rejected() {
    match NaiveBayesTrainer::new().train(&[]) {
        Err(TextcatError::EmptyTrainingSet) => {}
        other => panic!("expected EmptyTrainingSet, got {other:?}"),
    }
}

#[test]
fn test_recorded_stopwords_reproduce_preprocessing() {
    let analyzer = PipelineAnalyzer::standard();
    let documents: Vec<LabeledDocument> = training_pairs()
        .iter()
        .map(|(text, category)| {
            let features = features_from_text(&analyzer, text, FeatureMode::Count).unwrap();
            LabeledDocument::new(features, *category)
        })
        .collect();
    let model = NaiveBayesTrainer::new()
        .stopwords(textcat::analysis::stop::default_words())
        .train(&documents)
        .unwrap();

    // Rebuilding the pipeline from the persisted stop words yields the
    // same tokens as the pipeline used during training.
    let rebuilt =
        PipelineAnalyzer::standard_with_stop_words(model.stopwords().unwrap().iter().cloned());
    let text = "The team won the match after a late goal";
    let original: Vec<_> = analyzer.analyze(text).unwrap().map(|t| t.text).collect();
    let replayed: Vec<_> = rebuilt.analyze(text).unwrap().map(|t| t.text).collect();
    assert_eq!(original, replayed);
}
