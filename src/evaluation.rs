//! Cross-validated evaluation of the supervised model.
//!
//! Training examples are split into stratified folds; each fold is predicted
//! by a model trained on the remaining folds, and the (expected, predicted)
//! pairs are reduced to per-label [`Metrics`].

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;

use crate::analysis::analyzer::Analyzer;
use crate::classifier::{PrototypeClassifier, TextClassifier};
use crate::config::ClassifyConfig;
use crate::error::{Result, TailwizError};
use crate::frame::{Label, LabeledText};

pub mod folds;
pub mod metrics;

pub use folds::stratified_folds;
pub use metrics::{ACCURACY, F1, Metrics, MetricsCalculator, PRECISION, RECALL, SUPPORT};

/// Cross-validate a [`PrototypeClassifier`] on `examples`.
///
/// With fewer than two examples there is nothing to hold out, so the model
/// is trained and scored on the same example.
pub fn cross_validate(examples: &[LabeledText], config: &ClassifyConfig) -> Result<Metrics> {
    let analyzer = config.analyzer.build()?;
    cross_validate_with(examples, config, analyzer)
}

/// Cross-validate with an already built analyzer.
pub fn cross_validate_with(
    examples: &[LabeledText],
    config: &ClassifyConfig,
    analyzer: Arc<dyn Analyzer>,
) -> Result<Metrics> {
    config.validate()?;
    if examples.is_empty() {
        return Err(TailwizError::invalid_argument(
            "cannot evaluate without training examples",
        ));
    }

    let label_space: Vec<Label> = examples
        .iter()
        .map(|e| e.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut calculator = MetricsCalculator::new(label_space);

    if examples.len() < 2 {
        warn!("only one training example; metrics are measured on the training data itself");
        let classifier = PrototypeClassifier::train(examples, Arc::clone(&analyzer))?;
        for example in examples {
            let predicted = classifier.predict(&example.text)?.label;
            calculator.push(example.label.clone(), predicted);
        }
        return Ok(calculator.finalize());
    }

    let labels: Vec<Label> = examples.iter().map(|e| e.label.clone()).collect();
    let folds = stratified_folds(&labels, config.cv_folds, config.seed);
    debug!(
        "cross-validating {} examples over {} folds",
        examples.len(),
        folds.len()
    );

    let fold_results: Vec<Vec<(Label, Label)>> = folds
        .par_iter()
        .map(|held_out| evaluate_fold(examples, held_out, Arc::clone(&analyzer)))
        .collect::<Result<_>>()?;

    for (expected, predicted) in fold_results.into_iter().flatten() {
        calculator.push(expected, predicted);
    }

    Ok(calculator.finalize())
}

/// Train on everything outside `held_out` and predict the held-out examples.
fn evaluate_fold(
    examples: &[LabeledText],
    held_out: &[usize],
    analyzer: Arc<dyn Analyzer>,
) -> Result<Vec<(Label, Label)>> {
    let held: BTreeSet<usize> = held_out.iter().copied().collect();
    let training: Vec<LabeledText> = examples
        .iter()
        .enumerate()
        .filter(|(i, _)| !held.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    let classifier = PrototypeClassifier::train(&training, analyzer)?;
    held_out
        .iter()
        .map(|&i| {
            let example = &examples[i];
            let predicted = classifier.predict(&example.text)?.label;
            Ok((example.label.clone(), predicted))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment_examples() -> Vec<LabeledText> {
        vec![
            LabeledText::new("You are ugly", 0),
            LabeledText::new("Lovely weather today!", 1),
            LabeledText::new("Everything sucks", 0),
        ]
    }

    #[test]
    fn test_cross_validate_reports_every_label() {
        let metrics = cross_validate(&sentiment_examples(), &ClassifyConfig::default()).unwrap();

        let acc = metrics.get(ACCURACY).unwrap();
        assert_eq!(acc.len(), 2);
        for label in [Label::from(0), Label::from(1)] {
            let score = acc[&label];
            assert!((0.0..=1.0).contains(&score));
        }
        assert_eq!(metrics.score(SUPPORT, &Label::from(0)), Some(2.0));
        assert_eq!(metrics.score(SUPPORT, &Label::from(1)), Some(1.0));
    }

    #[test]
    fn test_cross_validate_separable_data() {
        let examples = vec![
            LabeledText::new("red apple", "fruit"),
            LabeledText::new("green apple", "fruit"),
            LabeledText::new("ripe apple", "fruit"),
            LabeledText::new("fast car", "vehicle"),
            LabeledText::new("red car", "vehicle"),
            LabeledText::new("old car", "vehicle"),
        ];
        let config = ClassifyConfig::default().with_cv_folds(3);
        let metrics = cross_validate(&examples, &config).unwrap();

        assert_eq!(metrics.score(ACCURACY, &Label::from("fruit")), Some(1.0));
        assert_eq!(metrics.score(F1, &Label::from("vehicle")), Some(1.0));
    }

    #[test]
    fn test_cross_validate_single_example() {
        let examples = vec![LabeledText::new("alone", 3)];
        let metrics = cross_validate(&examples, &ClassifyConfig::default()).unwrap();
        assert_eq!(metrics.score(ACCURACY, &Label::from(3)), Some(1.0));
    }

    #[test]
    fn test_cross_validate_is_deterministic() {
        let examples = vec![
            LabeledText::new("I am positive!", 0),
            LabeledText::new("No. Absolutely not.", 1),
            LabeledText::new("Hm, I am not sure.", 2),
            LabeledText::new("Yes, certainly", 0),
            LabeledText::new("Never ever", 1),
            LabeledText::new("Maybe later", 2),
        ];
        let config = ClassifyConfig::default();
        let first = cross_validate(&examples, &config).unwrap();
        let second = cross_validate(&examples, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cross_validate_rejects_single_fold() {
        let config = ClassifyConfig::default().with_cv_folds(1);
        let result = cross_validate(&sentiment_examples(), &config);
        assert!(matches!(result, Err(TailwizError::Config(_))));
    }

    #[test]
    fn test_cross_validate_two_folds() {
        let config = ClassifyConfig::default().with_cv_folds(2);
        let metrics = cross_validate(&sentiment_examples(), &config).unwrap();
        assert_eq!(metrics.score(SUPPORT, &Label::from(0)), Some(2.0));
    }

    #[test]
    fn test_cross_validate_empty() {
        assert!(cross_validate(&[], &ClassifyConfig::default()).is_err());
    }
}
