//! TF-IDF vectorizer for text feature extraction.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Term indices follow first occurrence, so fitting is deterministic.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut vocabulary: AHashMap<String, usize> = AHashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen = AHashSet::new();
            for term in self.analyzer.terms(doc)? {
                if !seen.insert(term.clone()) {
                    continue;
                }
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[idx] += 1;
            }
        }

        // IDF = ln((N + 1) / (df + 1)) + 1
        let n = documents.len() as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; term counts are
    /// normalized by the document's term count.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let terms = self.analyzer.terms(document)?;
        let mut features = vec![0.0; self.vocabulary.len()];

        for term in &terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                features[idx] += 1.0;
            }
        }

        if !terms.is_empty() {
            let doc_length = terms.len() as f64;
            for (idx, value) in features.iter_mut().enumerate() {
                *value = *value / doc_length * self.idf[idx];
            }
        }

        Ok(features)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// The fitted IDF weight of a term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}

/// Cosine similarity between two vectors; `0.0` for mismatched or zero vectors.
pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}
