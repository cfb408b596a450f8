//! Configuration for classification runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::error::{Result, TailwizError};
use crate::frame::{LABEL_COLUMN, Label, PREDICTION_COLUMN, TEXT_COLUMN};

/// Settings for [`Tailwiz`](crate::Tailwiz) and [`classify_with`](crate::classify_with).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use tailwiz::config::ClassifyConfig;
///
/// let config: ClassifyConfig = serde_json::from_str(r#"{"cv_folds": 3}"#).unwrap();
/// assert_eq!(config.cv_folds, 3);
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Number of cross-validation folds used for metrics.
    pub cv_folds: usize,
    /// Seed for fold shuffling.
    pub seed: u64,
    /// Analyzer used by the supervised model.
    pub analyzer: AnalyzerKind,
    /// Label given by the zero-shot model when the text carries no sentiment.
    pub zero_shot_neutral_label: Label,
    /// Column the predictions are written to.
    pub prediction_column: String,
    /// Column holding the text to classify.
    pub text_column: String,
    /// Column holding training labels.
    pub label_column: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            cv_folds: 5,
            seed: 42,
            analyzer: AnalyzerKind::default(),
            zero_shot_neutral_label: Label::Int(1),
            prediction_column: PREDICTION_COLUMN.to_string(),
            text_column: TEXT_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
        }
    }
}

impl ClassifyConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifyConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of cross-validation folds.
    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    /// Set the fold shuffling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the supervised analyzer.
    pub fn with_analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Check the configuration for values no run can use.
    pub fn validate(&self) -> Result<()> {
        if self.cv_folds < 2 {
            return Err(TailwizError::config(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        for (name, value) in [
            ("prediction_column", &self.prediction_column),
            ("text_column", &self.text_column),
            ("label_column", &self.label_column),
        ] {
            if value.is_empty() {
                return Err(TailwizError::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
