//! Zero-shot sentiment classifier backed by word lexicons.
//!
//! Used when no training examples are supplied. The label space is binary:
//! `0` for negative text and `1` for positive text.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::{SimpleStemmer, Stemmer};
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::classifier::{Prediction, TextClassifier};
use crate::error::{Result, TailwizError};
use crate::frame::Label;

/// Label for negative sentiment.
pub const NEGATIVE_LABEL: i64 = 0;

/// Label for positive sentiment.
pub const POSITIVE_LABEL: i64 = 1;

const POSITIVE_WORDS: &[&str] = &[
    "adore", "amazing", "awesome", "beautiful", "best", "better", "brilliant", "calm", "charming",
    "cheerful", "clean", "cool", "delight", "delighted", "delightful", "enjoy", "enjoyed",
    "excellent", "exciting", "fabulous", "fantastic", "fine", "fortunate", "free", "fresh",
    "friend", "friendly", "fun", "glad", "good", "gorgeous", "grateful", "great", "happy",
    "helpful", "hope", "incredible", "joy", "kind", "like", "liked", "lovely", "love", "loved",
    "loving", "lucky", "marvelous", "nice", "perfect", "pleasant", "pleased", "positive",
    "proud", "recommend", "safe", "smile", "splendid", "success", "sunny", "super",
    "superb", "sweet", "thank", "thanks", "terrific", "win", "wonderful", "wow", "yes",
];

const NEGATIVE_WORDS: &[&str] = &[
    "abysmal", "afraid", "angry", "annoy", "annoying", "anxious", "awful", "bad", "boring",
    "broken", "cruel", "damn", "dead", "depressed", "dirty", "disappoint", "disappointed",
    "disgusting", "dislike", "dreadful", "dull", "enemy", "evil", "fail", "failed", "fear",
    "filthy", "gross", "hate", "hated", "hateful", "horrible", "hurt", "ill", "lame", "lonely",
    "lose", "lost", "mad", "miserable", "nasty", "negative", "pain", "pathetic", "poor",
    "rude", "sad", "scary", "sick", "stupid", "suck", "sucks", "terrible", "tired", "ugly",
    "unhappy", "upset", "useless", "waste", "weak", "worse", "worst", "wrong",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "neither", "nor", "none", "cannot", "without",
];

/// How many preceding tokens are checked for a negator.
const NEGATION_WINDOW: usize = 2;

/// Shorter stems collide with unrelated words ("hated" stems to "hat").
const MIN_STEM_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

/// Zero-shot classifier that counts positive and negative lexicon hits.
///
/// A negator within the two preceding tokens flips a hit's polarity
/// ("not good" counts as negative). A positive balance yields label `1`,
/// a negative balance label `0`, and no balance the neutral label.
pub struct LexiconClassifier {
    positive: HashSet<String>,
    negative: HashSet<String>,
    positive_stems: HashSet<String>,
    negative_stems: HashSet<String>,
    negators: HashSet<String>,
    stemmer: SimpleStemmer,
    analyzer: Arc<dyn Analyzer>,
    neutral: Label,
    labels: Vec<Label>,
}

impl std::fmt::Debug for LexiconClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconClassifier")
            .field("positive_words", &self.positive.len())
            .field("negative_words", &self.negative.len())
            .field("neutral", &self.neutral)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl LexiconClassifier {
    /// Create a sentiment classifier with the built-in English lexicons.
    pub fn sentiment() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("sentiment");
        Self::new(
            POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            Arc::new(analyzer),
        )
    }

    /// Create a classifier from custom lexicons. Lexicon words should be lowercase.
    pub fn new(
        positive: HashSet<String>,
        negative: HashSet<String>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        let stemmer = SimpleStemmer::new();
        let stems = |words: &HashSet<String>| -> HashSet<String> {
            words
                .iter()
                .map(|w| stemmer.stem(w))
                .filter(|stem| stem.chars().count() >= MIN_STEM_CHARS)
                .collect()
        };
        let positive_stems = stems(&positive);
        let negative_stems = stems(&negative);
        Self {
            positive,
            negative,
            positive_stems,
            negative_stems,
            negators: NEGATORS.iter().map(|w| w.to_string()).collect(),
            stemmer,
            analyzer,
            neutral: Label::Int(POSITIVE_LABEL),
            labels: vec![Label::Int(NEGATIVE_LABEL), Label::Int(POSITIVE_LABEL)],
        }
    }

    /// Set the label given to text with no sentiment balance.
    ///
    /// The label must belong to the binary label space.
    pub fn with_neutral_label(mut self, label: Label) -> Result<Self> {
        if !self.labels.contains(&label) {
            return Err(TailwizError::config(format!(
                "neutral label {label} is not one of {NEGATIVE_LABEL} or {POSITIVE_LABEL}"
            )));
        }
        self.neutral = label;
        Ok(self)
    }

    fn polarity(&self, term: &str) -> Option<Polarity> {
        if self.positive.contains(term) {
            return Some(Polarity::Positive);
        }
        if self.negative.contains(term) {
            return Some(Polarity::Negative);
        }

        let stem = self.stemmer.stem(term);
        match (
            self.positive_stems.contains(&stem),
            self.negative_stems.contains(&stem),
        ) {
            (true, false) => Some(Polarity::Positive),
            (false, true) => Some(Polarity::Negative),
            _ => None,
        }
    }

    fn is_negator(&self, term: &str) -> bool {
        self.negators.contains(term) || term.ends_with("n't") || term.ends_with("n\u{2019}t")
    }

    /// Sentiment balance of a text and the number of lexicon hits.
    pub fn balance(&self, text: &str) -> Result<(i64, usize)> {
        let terms = self.analyzer.terms(text)?;
        let mut balance = 0i64;
        let mut hits = 0usize;

        for (i, term) in terms.iter().enumerate() {
            let Some(polarity) = self.polarity(term) else {
                continue;
            };
            let negated = terms[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|previous| self.is_negator(previous));
            let positive = (polarity == Polarity::Positive) != negated;
            balance += if positive { 1 } else { -1 };
            hits += 1;
        }

        Ok((balance, hits))
    }
}

impl TextClassifier for LexiconClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let (balance, hits) = self.balance(text)?;

        let label = match balance.signum() {
            1 => Label::Int(POSITIVE_LABEL),
            -1 => Label::Int(NEGATIVE_LABEL),
            _ => self.neutral.clone(),
        };
        let score = if hits == 0 {
            0.5
        } else {
            0.5 + 0.5 * balance.unsigned_abs() as f64 / hits as f64
        };

        Ok(Prediction::new(label, score))
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_basic() {
        let classifier = LexiconClassifier::sentiment();

        assert_eq!(classifier.predict("I hate you").unwrap().label, Label::Int(0));
        assert_eq!(
            classifier.predict("You are my best friend").unwrap().label,
            Label::Int(1)
        );
        assert_eq!(
            classifier.predict("Lovely weather today!").unwrap().label,
            Label::Int(1)
        );
        assert_eq!(classifier.predict("Everything sucks").unwrap().label, Label::Int(0));
    }

    #[test]
    fn test_negation_flips_polarity() {
        let classifier = LexiconClassifier::sentiment();

        assert_eq!(classifier.balance("this is good").unwrap(), (1, 1));
        assert_eq!(classifier.balance("this is not good").unwrap(), (-1, 1));
        assert_eq!(classifier.balance("I don't like it").unwrap(), (-1, 1));
        assert_eq!(classifier.balance("never a bad day").unwrap(), (1, 1));
    }

    #[test]
    fn test_inflections_match_through_stems() {
        let classifier = LexiconClassifier::sentiment();
        assert_eq!(classifier.balance("my friends").unwrap(), (1, 1));
        assert_eq!(classifier.balance("AWFUL").unwrap(), (-1, 1));
    }

    #[test]
    fn test_neutral_label() {
        let classifier = LexiconClassifier::sentiment();
        let prediction = classifier.predict("The meeting is at noon").unwrap();
        assert_eq!(prediction.label, Label::Int(1));
        assert_eq!(prediction.score, 0.5);

        let classifier = LexiconClassifier::sentiment()
            .with_neutral_label(Label::Int(0))
            .unwrap();
        assert_eq!(classifier.predict("").unwrap().label, Label::Int(0));

        assert!(
            LexiconClassifier::sentiment()
                .with_neutral_label(Label::Int(2))
                .is_err()
        );
    }

    #[test]
    fn test_score_reflects_agreement() {
        let classifier = LexiconClassifier::sentiment();
        let strong = classifier.predict("great and wonderful").unwrap();
        let mixed = classifier.predict("great but awful and wonderful").unwrap();
        assert_eq!(strong.score, 1.0);
        assert!(mixed.score < strong.score);
        assert_eq!(mixed.label, Label::Int(1));
    }

    #[test]
    fn test_labels() {
        let classifier = LexiconClassifier::sentiment();
        assert_eq!(classifier.labels(), &[Label::Int(0), Label::Int(1)]);
        assert_eq!(classifier.name(), "lexicon");
    }
}
