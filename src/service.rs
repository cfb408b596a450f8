//! The classification service.
//!
//! [`classify`] labels every row of a text frame. With training examples the
//! labels come from a supervised model and stay inside the training label
//! space; without them a zero-shot sentiment model assigns `0` (negative) or
//! `1` (positive). [`classify_with_metrics`] additionally cross-validates the
//! supervised model on the training examples.

use std::time::Instant;

use log::{info, warn};

use crate::classifier::{LexiconClassifier, Prediction, PrototypeClassifier, TextClassifier};
use crate::config::ClassifyConfig;
use crate::error::{Result, TailwizError};
use crate::evaluation::{Metrics, cross_validate_with};
use crate::frame::Frame;

/// Output of a classification run.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The input frame with the prediction column set.
    pub results: Frame,
    /// Per-row predictions, including confidence scores.
    pub predictions: Vec<Prediction>,
    /// Cross-validated metrics, when requested and training data was given.
    pub metrics: Option<Metrics>,
    /// Name of the model that produced the predictions.
    pub model: String,
}

/// Reusable classification service holding a configuration.
///
/// ```
/// use tailwiz::{Frame, Tailwiz};
/// use tailwiz::config::ClassifyConfig;
///
/// let service = Tailwiz::with_config(ClassifyConfig::default().with_cv_folds(3));
/// let results = service
///     .classify(&Frame::from_texts(vec!["What a wonderful day"]), None)
///     .unwrap();
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tailwiz {
    config: ClassifyConfig,
}

impl Tailwiz {
    /// Create a service with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with a custom configuration.
    pub fn with_config(config: ClassifyConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    /// Label every row of `texts`.
    pub fn classify(&self, texts: &Frame, training: Option<&Frame>) -> Result<Frame> {
        Ok(self.run(texts, training, false)?.results)
    }

    /// Label every row of `texts` and cross-validate on `training`.
    ///
    /// The metrics are `None` when no training frame is given.
    pub fn classify_with_metrics(
        &self,
        texts: &Frame,
        training: Option<&Frame>,
    ) -> Result<(Frame, Option<Metrics>)> {
        let classification = self.run(texts, training, true)?;
        Ok((classification.results, classification.metrics))
    }

    /// Run a full classification, optionally computing metrics.
    pub fn run(
        &self,
        texts: &Frame,
        training: Option<&Frame>,
        with_metrics: bool,
    ) -> Result<Classification> {
        let config = &self.config;
        config.validate()?;
        let started = Instant::now();

        let inputs = texts.texts(&config.text_column)?;

        let (predictions, metrics, model) = match training {
            Some(training) => {
                let examples = training.labeled_texts(&config.text_column, &config.label_column)?;
                if examples.is_empty() {
                    return Err(TailwizError::invalid_argument(
                        "training frame has no rows",
                    ));
                }

                let analyzer = config.analyzer.build()?;
                let classifier = PrototypeClassifier::train(&examples, analyzer.clone())?;
                let predictions = classifier.predict_batch(&inputs)?;
                let metrics = if with_metrics {
                    Some(cross_validate_with(&examples, config, analyzer)?)
                } else {
                    None
                };
                (predictions, metrics, classifier.name().to_string())
            }
            None => {
                if with_metrics {
                    warn!("metrics requested without training data; no metrics will be computed");
                }
                let classifier = LexiconClassifier::sentiment()
                    .with_neutral_label(config.zero_shot_neutral_label.clone())?;
                let predictions = classifier.predict_batch(&inputs)?;
                (predictions, None, classifier.name().to_string())
            }
        };

        let labels = predictions.iter().map(|p| p.label.to_value()).collect();
        let results = texts.with_column(&config.prediction_column, labels)?;

        info!(
            "classified {} rows with the {} model in {} ms",
            results.len(),
            model,
            started.elapsed().as_millis()
        );

        Ok(Classification {
            results,
            predictions,
            metrics,
            model,
        })
    }
}

/// Label every row of `texts` using the default configuration.
///
/// ```
/// use tailwiz::{Frame, Label, classify};
///
/// let results = classify(
///     &Frame::from_texts(vec!["I hate you"]),
///     Some(&Frame::from_labeled(vec![
///         ("You are ugly", 0),
///         ("Lovely weather today!", 1),
///         ("Everything sucks", 0),
///     ])),
/// )
/// .unwrap();
///
/// let label = results.get(0, "label_from_tailwiz").unwrap();
/// assert_eq!(Label::from_value(label).unwrap(), Label::from(0));
/// ```
pub fn classify(texts: &Frame, training: Option<&Frame>) -> Result<Frame> {
    Tailwiz::new().classify(texts, training)
}

/// Label every row of `texts` and cross-validate on `training`, using the
/// default configuration.
pub fn classify_with_metrics(
    texts: &Frame,
    training: Option<&Frame>,
) -> Result<(Frame, Option<Metrics>)> {
    Tailwiz::new().classify_with_metrics(texts, training)
}

/// Run a classification with an explicit metrics flag and configuration.
pub fn classify_with(
    texts: &Frame,
    training: Option<&Frame>,
    with_metrics: bool,
    config: &ClassifyConfig,
) -> Result<Classification> {
    Tailwiz::with_config(config.clone()).run(texts, training, with_metrics)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::frame::{Label, PREDICTION_COLUMN};

    fn predicted(frame: &Frame) -> Vec<Label> {
        frame.labels(PREDICTION_COLUMN).unwrap()
    }

    #[test]
    fn test_preserves_columns_and_rows() {
        let texts = Frame::from_records(vec![
            json!({"id": 7, "text": "great stuff"}).as_object().unwrap().clone(),
            json!({"id": 8, "text": "awful stuff"}).as_object().unwrap().clone(),
        ]);
        let results = classify(&texts, None).unwrap();

        assert_eq!(results.columns(), &["id", "text", PREDICTION_COLUMN]);
        assert_eq!(results.get(1, "id"), Some(&json!(8)));
        assert_eq!(predicted(&results), vec![Label::from(1), Label::from(0)]);
    }

    #[test]
    fn test_empty_input() {
        let results = classify(&Frame::new(vec!["text"]), None).unwrap();
        assert!(results.is_empty());
        assert!(results.has_column(PREDICTION_COLUMN));
    }

    #[test]
    fn test_missing_columns() {
        let texts = Frame::new(vec!["body"]);
        assert!(matches!(
            classify(&texts, None),
            Err(TailwizError::MissingColumn(_))
        ));

        let texts = Frame::from_texts(vec!["hello"]);
        let training = Frame::from_texts(vec!["no labels here"]);
        assert!(matches!(
            classify(&texts, Some(&training)),
            Err(TailwizError::MissingColumn(ref c)) if c == "label"
        ));
    }

    #[test]
    fn test_empty_training_rejected() {
        let texts = Frame::from_texts(vec!["hello"]);
        let training = Frame::new(vec!["text", "label"]);
        assert!(matches!(
            classify(&texts, Some(&training)),
            Err(TailwizError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_metrics_without_training_is_none() {
        let (results, metrics) =
            classify_with_metrics(&Frame::from_texts(vec!["fine"]), None).unwrap();
        assert_eq!(results.len(), 1);
        assert!(metrics.is_none());
    }

    #[test]
    fn test_custom_columns() {
        let config = ClassifyConfig {
            text_column: "body".to_string(),
            label_column: "class".to_string(),
            prediction_column: "predicted".to_string(),
            ..Default::default()
        };
        let texts = Frame::from_records(vec![
            json!({"body": "cheap flights"}).as_object().unwrap().clone(),
        ]);
        let training = Frame::from_records(vec![
            json!({"body": "cheap flights now", "class": "spam"})
                .as_object()
                .unwrap()
                .clone(),
            json!({"body": "meeting notes attached", "class": "ham"})
                .as_object()
                .unwrap()
                .clone(),
        ]);

        let classification = classify_with(&texts, Some(&training), true, &config).unwrap();
        assert_eq!(classification.model, "prototype");
        assert_eq!(
            classification.results.labels("predicted").unwrap(),
            vec![Label::from("spam")]
        );
        assert_eq!(classification.predictions.len(), 1);
        assert!(classification.metrics.unwrap().contains("acc"));
    }

    #[test]
    fn test_out_of_range_labels_rejected() {
        let training = Frame::from_records(vec![
            json!({"text": "dogs bark", "label": 9_223_372_036_854_775_808u64})
                .as_object()
                .unwrap()
                .clone(),
            json!({"text": "cats purr", "label": 9_223_372_036_854_775_809u64})
                .as_object()
                .unwrap()
                .clone(),
        ]);
        let result = classify(&Frame::from_texts(vec!["dogs bark"]), Some(&training));
        assert!(matches!(result, Err(TailwizError::InvalidLabel(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClassifyConfig::default().with_cv_folds(0);
        let result = classify_with(&Frame::from_texts(vec!["x"]), None, false, &config);
        assert!(matches!(result, Err(TailwizError::Config(_))));

        let config = ClassifyConfig {
            zero_shot_neutral_label: Label::from(5),
            ..Default::default()
        };
        let result = classify_with(&Frame::from_texts(vec!["x"]), None, false, &config);
        assert!(matches!(result, Err(TailwizError::Config(_))));
    }
}
