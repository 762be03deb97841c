//! Dataset loading and splitting for the tabular training format.
//!
//! The format is CSV: the header row names the vocabulary columns plus a
//! trailing category column, each data row carries per-word feature values
//! and ends with the category label.

use std::collections::BTreeSet;
use std::path::Path;

use ahash::AHashSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, TextcatError};
use crate::features::{FeatureMap, FeatureMode, LabeledDocument};

/// Reader for tabular CSV datasets.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use textcat::dataset::DatasetReader;
///
/// let documents = DatasetReader::new()
///     .allow_categories(["sport", "business"])
///     .read_csv(Path::new("train_dataset.csv"))?;
/// # Ok::<(), textcat::error::TextcatError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetReader {
    mode: FeatureMode,
    allowed_categories: Option<AHashSet<String>>,
}

impl DatasetReader {
    /// Create a reader with the default feature mode (counts).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with an explicit feature mode. In presence mode,
    /// positive values are clamped to 1.
    pub fn with_mode(mode: FeatureMode) -> Self {
        DatasetReader {
            mode,
            allowed_categories: None,
        }
    }

    /// Restrict labels to the given set; a row with any other label fails
    /// with [`TextcatError::InvalidCategory`].
    pub fn allow_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_categories = Some(categories.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Read a CSV dataset into labeled documents.
    ///
    /// Only positive feature values are kept in the maps; zeros carry no
    /// information and would only inflate memory.
    pub fn read_csv(&self, path: &Path) -> Result<Vec<LabeledDocument>> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(TextcatError::dataset(
                "header must name at least one vocabulary column plus the category column",
            ));
        }
        let vocabulary: Vec<String> = headers
            .iter()
            .take(headers.len() - 1)
            .map(str::to_string)
            .collect();

        let mut documents = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Rows are 1-based and the header occupies the first line.
            let line = row + 2;
            if record.len() != headers.len() {
                return Err(TextcatError::dataset(format!(
                    "row {line}: expected {} fields, got {}",
                    headers.len(),
                    record.len()
                )));
            }

            let category = record[record.len() - 1].to_string();
            if let Some(allowed) = &self.allowed_categories {
                if !allowed.contains(&category) {
                    return Err(TextcatError::invalid_category(format!(
                        "row {line}: {category:?}"
                    )));
                }
            }

            let mut features = FeatureMap::new();
            for (word, field) in vocabulary.iter().zip(record.iter()) {
                let value: u32 = field.trim().parse().map_err(|_| {
                    TextcatError::dataset(format!(
                        "row {line}: non-numeric value {field:?} in column {word:?}"
                    ))
                })?;
                if value > 0 {
                    let value = match self.mode {
                        FeatureMode::Count => value,
                        FeatureMode::Presence => 1,
                    };
                    features.insert(word.clone(), value);
                }
            }

            documents.push(LabeledDocument::new(features, category));
        }

        Ok(documents)
    }
}

/// Write labeled documents back out as a tabular CSV.
///
/// The vocabulary is the sorted union of all feature words; absent words
/// are written as 0.
pub fn write_csv(path: &Path, documents: &[LabeledDocument]) -> Result<()> {
    let vocabulary: BTreeSet<&str> = documents
        .iter()
        .flat_map(|d| d.features.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    let mut header: Vec<&str> = vocabulary.iter().copied().collect();
    header.push("category");
    writer.write_record(&header)?;

    for document in documents {
        let mut row: Vec<String> = vocabulary
            .iter()
            .map(|word| {
                document
                    .features
                    .get(*word)
                    .copied()
                    .unwrap_or(0)
                    .to_string()
            })
            .collect();
        row.push(document.category.clone());
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Split documents into train and test sets after a seeded shuffle.
///
/// Returns `(train, test)`. The same seed and input order always produce
/// the same split.
pub fn train_test_split(
    mut documents: Vec<LabeledDocument>,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<LabeledDocument>, Vec<LabeledDocument>)> {
    if !(0.0..=1.0).contains(&test_ratio) {
        return Err(TextcatError::dataset(format!(
            "test ratio {test_ratio} outside [0, 1]"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    documents.shuffle(&mut rng);

    let test_len = (documents.len() as f64 * test_ratio).round() as usize;
    let train = documents.split_off(test_len);
    Ok((train, documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
win,match,stock,market,category
1,2,0,0,sport
0,0,1,1,business
";

    fn write_sample(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("dataset.csv");
        fs::write(&path, SAMPLE_CSV).unwrap();
        path
    }

    #[test]
    fn test_read_csv() {
        let dir = TempDir::new().unwrap();
        let documents = DatasetReader::new().read_csv(&write_sample(&dir)).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].category, "sport");
        assert_eq!(documents[0].features["win"], 1);
        assert_eq!(documents[0].features["match"], 2);
        // Zeros are not materialized
        assert!(!documents[0].features.contains_key("stock"));
        assert_eq!(documents[1].category, "business");
    }

    #[test]
    fn test_presence_mode_clamps_counts() {
        let dir = TempDir::new().unwrap();
        let documents = DatasetReader::with_mode(FeatureMode::Presence)
            .read_csv(&write_sample(&dir))
            .unwrap();

        assert_eq!(documents[0].features["match"], 1);
    }

    #[test]
    fn test_invalid_category_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = DatasetReader::new()
            .allow_categories(["sport"])
            .read_csv(&write_sample(&dir));

        match result {
            Err(TextcatError::InvalidCategory(_)) => {}
            other => panic!("expected InvalidCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "win,category\nmany,sport\n").unwrap();

        match DatasetReader::new().read_csv(&path) {
            Err(TextcatError::Dataset(_)) => {}
            other => panic!("expected Dataset error, got {other:?}"),
        }
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let documents = DatasetReader::new().read_csv(&write_sample(&dir)).unwrap();

        let out = dir.path().join("out.csv");
        write_csv(&out, &documents).unwrap();
        let restored = DatasetReader::new().read_csv(&out).unwrap();

        assert_eq!(restored.len(), documents.len());
        assert_eq!(restored[0].features, documents[0].features);
        assert_eq!(restored[0].category, documents[0].category);
    }

    #[test]
    fn test_split_is_reproducible() {
        let dir = TempDir::new().unwrap();
        let documents = DatasetReader::new().read_csv(&write_sample(&dir)).unwrap();

        let (train_a, test_a) = train_test_split(documents.clone(), 0.5, 42).unwrap();
        let (train_b, test_b) = train_test_split(documents, 0.5, 42).unwrap();

        assert_eq!(train_a.len(), 1);
        assert_eq!(test_a.len(), 1);
        assert_eq!(train_a[0].category, train_b[0].category);
        assert_eq!(test_a[0].category, test_b[0].category);
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        match train_test_split(Vec::new(), 1.5, 0) {
            Err(TextcatError::Dataset(_)) => {}
            other => panic!("expected Dataset error, got {other:?}"),
        }
    }
}
