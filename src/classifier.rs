//! Text classification models.
//!
//! - [`TextClassifier`] trait: common interface for all models
//! - [`PrototypeClassifier`]: supervised, TF-IDF vectors compared to the
//!   training examples of each label by cosine similarity
//! - [`LexiconClassifier`]: zero-shot binary sentiment from word lexicons,
//!   used when no training examples are available
//! - [`TfIdfVectorizer`]: feature extraction for the supervised model
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tailwiz::analysis::analyzer::StandardAnalyzer;
//! use tailwiz::classifier::{PrototypeClassifier, TextClassifier};
//! use tailwiz::frame::{Label, LabeledText};
//!
//! let examples = vec![
//!     LabeledText::new("You are ugly", 0),
//!     LabeledText::new("Lovely weather today!", 1),
//! ];
//! let analyzer = Arc::new(StandardAnalyzer::new().unwrap());
//! let classifier = PrototypeClassifier::train(&examples, analyzer).unwrap();
//!
//! let prediction = classifier.predict("What lovely weather").unwrap();
//! assert_eq!(prediction.label, Label::from(1));
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Label;

mod lexicon;
mod prototype;
mod tfidf;

pub use lexicon::LexiconClassifier;
pub use prototype::PrototypeClassifier;
pub use tfidf::TfIdfVectorizer;

/// A single model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label.
    pub label: Label,
    /// Confidence score in `[0, 1]`.
    pub score: f64,
}

impl Prediction {
    /// Create a new prediction.
    pub fn new<L: Into<Label>>(label: L, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Text classifier trait.
///
/// Models are immutable once built, so one instance can serve predictions
/// from many threads.
pub trait TextClassifier: Send + Sync {
    /// Predict the label of a single text.
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Predict labels for many texts, in input order.
    fn predict_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        texts.par_iter().map(|text| self.predict(text)).collect()
    }

    /// The label space this model predicts from, sorted.
    fn labels(&self) -> &[Label];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
