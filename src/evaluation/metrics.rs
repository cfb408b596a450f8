//! Per-label classification metrics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::frame::Label;

/// One-vs-rest accuracy per label.
pub const ACCURACY: &str = "acc";
/// Precision per label.
pub const PRECISION: &str = "precision";
/// Recall per label.
pub const RECALL: &str = "recall";
/// F1 score per label.
pub const F1: &str = "f1";
/// Number of examples per expected label.
pub const SUPPORT: &str = "support";

/// Metric name -> label -> score.
///
/// ```
/// use tailwiz::evaluation::{ACCURACY, MetricsCalculator};
/// use tailwiz::frame::Label;
///
/// let mut calculator = MetricsCalculator::new(vec![Label::from(0), Label::from(1)]);
/// calculator.push(Label::from(0), Label::from(0));
/// calculator.push(Label::from(1), Label::from(0));
/// let metrics = calculator.finalize();
///
/// assert_eq!(metrics.score(ACCURACY, &Label::from(0)), Some(0.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<String, BTreeMap<Label, f64>>);

impl Metrics {
    /// Create an empty metrics mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores of one metric, keyed by label.
    pub fn get(&self, metric: &str) -> Option<&BTreeMap<Label, f64>> {
        self.0.get(metric)
    }

    /// A single score.
    pub fn score(&self, metric: &str, label: &Label) -> Option<f64> {
        self.0.get(metric)?.get(label).copied()
    }

    /// Whether the metric is present.
    pub fn contains(&self, metric: &str) -> bool {
        self.0.contains_key(metric)
    }

    /// Metric names in sorted order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Set a single score.
    pub fn insert<S: Into<String>>(&mut self, metric: S, label: Label, score: f64) {
        self.0.entry(metric.into()).or_default().insert(label, score);
    }

    /// Iterate over metrics and their per-label scores.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<Label, f64>)> {
        self.0.iter()
    }

    /// Unwrap into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<Label, f64>> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Confusion {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
}

/// Accumulates (expected, predicted) pairs and reduces them to [`Metrics`].
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    labels: Vec<Label>,
    pairs: Vec<(Label, Label)>,
}

impl MetricsCalculator {
    /// Create a calculator over a label space. Every label in it gets a score.
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            labels,
            pairs: Vec::new(),
        }
    }

    /// Record one prediction.
    pub fn push(&mut self, expected: Label, predicted: Label) {
        self.pairs.push((expected, predicted));
    }

    /// Number of recorded predictions.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Fraction of predictions that match their expected label.
    pub fn overall_accuracy(&self) -> f64 {
        if self.pairs.is_empty() {
            return 0.0;
        }
        let correct = self.pairs.iter().filter(|(e, p)| e == p).count();
        correct as f64 / self.pairs.len() as f64
    }

    fn confusion(&self, label: &Label) -> Confusion {
        let mut confusion = Confusion::default();
        for (expected, predicted) in &self.pairs {
            match (expected == label, predicted == label) {
                (true, true) => confusion.true_positive += 1,
                (false, true) => confusion.false_positive += 1,
                (true, false) => confusion.false_negative += 1,
                (false, false) => {}
            }
        }
        confusion
    }

    /// Compute `acc`, `precision`, `recall`, `f1` and `support` for every label.
    ///
    /// Ratios with a zero denominator are reported as `0.0`.
    pub fn finalize(&self) -> Metrics {
        let total = self.pairs.len();
        let mut metrics = Metrics::new();

        for label in &self.labels {
            let c = self.confusion(label);
            let true_negative = total - c.true_positive - c.false_positive - c.false_negative;

            let accuracy = ratio(c.true_positive + true_negative, total);
            let precision = ratio(c.true_positive, c.true_positive + c.false_positive);
            let recall = ratio(c.true_positive, c.true_positive + c.false_negative);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            metrics.insert(ACCURACY, label.clone(), accuracy);
            metrics.insert(PRECISION, label.clone(), precision);
            metrics.insert(RECALL, label.clone(), recall);
            metrics.insert(F1, label.clone(), f1);
            metrics.insert(
                SUPPORT,
                label.clone(),
                (c.true_positive + c.false_negative) as f64,
            );
        }

        metrics
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
