//! Supervised classifier using TF-IDF prototypes.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::analyzer::Analyzer;
use crate::classifier::tfidf::{TfIdfVectorizer, cosine_similarity};
use crate::classifier::{Prediction, TextClassifier};
use crate::error::{Result, TailwizError};
use crate::frame::{Label, LabeledText};

/// Scores closer than this are treated as a tie.
const SCORE_EPSILON: f64 = 1e-12;

/// Supervised classifier trained from labeled examples.
///
/// Every training example is kept as a TF-IDF prototype. A text is scored
/// against each label by the mean cosine similarity to that label's
/// prototypes and receives the best-scoring label. Ties go to the label
/// with more training examples, then to the smallest label.
#[derive(Debug)]
pub struct PrototypeClassifier {
    vectorizer: TfIdfVectorizer,
    /// Training feature vectors grouped by label.
    prototypes: BTreeMap<Label, Vec<Vec<f64>>>,
    labels: Vec<Label>,
}

impl PrototypeClassifier {
    /// Train a classifier from labeled examples.
    pub fn train(examples: &[LabeledText], analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        if examples.is_empty() {
            return Err(TailwizError::model("Training examples cannot be empty"));
        }

        let documents: Vec<String> = examples.iter().map(|e| e.text.clone()).collect();
        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        vectorizer.fit(&documents)?;

        let mut prototypes: BTreeMap<Label, Vec<Vec<f64>>> = BTreeMap::new();
        for example in examples {
            let features = vectorizer.transform(&example.text)?;
            prototypes
                .entry(example.label.clone())
                .or_default()
                .push(features);
        }

        let labels: Vec<Label> = prototypes.keys().cloned().collect();
        if labels.len() == 1 {
            warn!(
                "training data has a single label ({}); every prediction will be that label",
                labels[0]
            );
        }
        debug!(
            "trained prototype classifier: {} examples, {} labels, vocabulary size {}",
            examples.len(),
            labels.len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self {
            vectorizer,
            prototypes,
            labels,
        })
    }

    /// Number of training examples per label.
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        self.prototypes
            .iter()
            .map(|(label, vectors)| (label.clone(), vectors.len()))
            .collect()
    }

    /// Mean similarity of `text` to each label's prototypes.
    pub fn scores(&self, text: &str) -> Result<BTreeMap<Label, f64>> {
        let features = self.vectorizer.transform(text)?;
        Ok(self
            .prototypes
            .iter()
            .map(|(label, vectors)| {
                let total: f64 = vectors
                    .iter()
                    .map(|prototype| cosine_similarity(&features, prototype))
                    .sum();
                (label.clone(), total / vectors.len() as f64)
            })
            .collect())
    }
}

impl TextClassifier for PrototypeClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let scores = self.scores(text)?;

        // Labels iterate in ascending order, so only a strictly better
        // score or count replaces the current best.
        let mut best: Option<(&Label, f64, usize)> = None;
        for (label, &score) in &scores {
            let count = self.prototypes[label].len();
            let better = match best {
                None => true,
                Some((_, best_score, best_count)) => {
                    score > best_score + SCORE_EPSILON
                        || ((score - best_score).abs() <= SCORE_EPSILON && count > best_count)
                }
            };
            if better {
                best = Some((label, score, count));
            }
        }

        best.map(|(label, score, _)| Prediction::new(label.clone(), score.clamp(0.0, 1.0)))
            .ok_or_else(|| TailwizError::model("classifier has no labels"))
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn name(&self) -> &str {
        "prototype"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;

    fn analyzer() -> Arc<dyn Analyzer> {
        Arc::new(StandardAnalyzer::new().unwrap())
    }

    #[test]
    fn test_prototype_classifier_binary() {
        let examples = vec![
            LabeledText::new("You are ugly", 0),
            LabeledText::new("Lovely weather today!", 1),
            LabeledText::new("Everything sucks", 0),
        ];
        let classifier = PrototypeClassifier::train(&examples, analyzer()).unwrap();

        assert_eq!(classifier.labels(), &[Label::from(0), Label::from(1)]);
        assert_eq!(classifier.predict("I hate you").unwrap().label, Label::from(0));
        assert_eq!(
            classifier.predict("The weather is lovely").unwrap().label,
            Label::from(1)
        );
    }

    #[test]
    fn test_prototype_classifier_multi_class() {
        let examples = vec![
            LabeledText::new("what is rust", "informational"),
            LabeledText::new("how to learn programming", "informational"),
            LabeledText::new("github homepage", "navigational"),
            LabeledText::new("facebook homepage", "navigational"),
            LabeledText::new("buy laptop", "transactional"),
            LabeledText::new("purchase book", "transactional"),
        ];
        let classifier = PrototypeClassifier::train(&examples, analyzer()).unwrap();

        assert_eq!(
            classifier.predict("what is deep learning").unwrap().label,
            Label::from("informational")
        );
        assert_eq!(
            classifier.predict("reddit homepage").unwrap().label,
            Label::from("navigational")
        );
        assert_eq!(
            classifier.predict("buy smartphone").unwrap().label,
            Label::from("transactional")
        );
    }

    #[test]
    fn test_ties_prefer_frequent_then_smallest_label() {
        let examples = vec![
            LabeledText::new("alpha", 2),
            LabeledText::new("beta", 1),
            LabeledText::new("gamma", 1),
        ];
        let classifier = PrototypeClassifier::train(&examples, analyzer()).unwrap();
        let prediction = classifier.predict("nothing in common").unwrap();
        assert_eq!(prediction.label, Label::from(1));
        assert_eq!(prediction.score, 0.0);

        let balanced = vec![LabeledText::new("alpha", 2), LabeledText::new("beta", 1)];
        let classifier = PrototypeClassifier::train(&balanced, analyzer()).unwrap();
        assert_eq!(classifier.predict("zzz").unwrap().label, Label::from(1));
    }

    #[test]
    fn test_single_label() {
        let examples = vec![LabeledText::new("only one class here", 7)];
        let classifier = PrototypeClassifier::train(&examples, analyzer()).unwrap();
        assert_eq!(classifier.predict("anything").unwrap().label, Label::from(7));
        assert_eq!(classifier.label_counts()[&Label::from(7)], 1);
    }

    #[test]
    fn test_empty_training_rejected() {
        let result = PrototypeClassifier::train(&[], analyzer());
        assert!(matches!(result, Err(TailwizError::Model(_))));
    }

    #[test]
    fn test_predict_batch_keeps_order() {
        let examples = vec![
            LabeledText::new("cats purr", "cat"),
            LabeledText::new("dogs bark", "dog"),
        ];
        let classifier = PrototypeClassifier::train(&examples, analyzer()).unwrap();
        let texts: Vec<String> = ["dogs", "cats", "dogs bark loudly", "purr"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let labels: Vec<Label> = classifier
            .predict_batch(&texts)
            .unwrap()
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                Label::from("dog"),
                Label::from("cat"),
                Label::from("dog"),
                Label::from("cat")
            ]
        );
    }
}
