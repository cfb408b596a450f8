//! Analyzers that combine a tokenizer with a chain of filters.
//!
//! - [`pipeline::PipelineAnalyzer`] - Any tokenizer plus any filters
//! - [`standard::StandardAnalyzer`] - Word tokens, lowercase, optional stop words and stemming
//!
//! [`AnalyzerKind`] names the analyzers the classifiers can be configured with.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;
pub mod standard;

pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the text and collect the surviving token texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect())
    }
}

/// Analyzer selection for the supervised model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Regex tokenizer, lowercase and English stop words.
    #[default]
    Standard,
    /// Regex tokenizer and lowercase only.
    StandardNoStop,
    /// Standard analyzer followed by the simple suffix stemmer.
    Stemmed,
}

impl AnalyzerKind {
    /// Build the analyzer this kind names.
    pub fn build(self) -> Result<Arc<dyn Analyzer>> {
        let analyzer: Arc<dyn Analyzer> = match self {
            AnalyzerKind::Standard => Arc::new(StandardAnalyzer::new()?),
            AnalyzerKind::StandardNoStop => Arc::new(StandardAnalyzer::without_stop_words()?),
            AnalyzerKind::Stemmed => Arc::new(StandardAnalyzer::stemmed()?),
        };
        Ok(analyzer)
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerKind::Standard => write!(f, "standard"),
            AnalyzerKind::StandardNoStop => write!(f, "standard_no_stop"),
            AnalyzerKind::Stemmed => write!(f, "stemmed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_kinds() {
        let standard = AnalyzerKind::Standard.build().unwrap();
        assert_eq!(standard.terms("You are ugly").unwrap(), vec!["you", "ugly"]);

        let no_stop = AnalyzerKind::StandardNoStop.build().unwrap();
        assert_eq!(
            no_stop.terms("You are ugly").unwrap(),
            vec!["you", "are", "ugly"]
        );

        let stemmed = AnalyzerKind::Stemmed.build().unwrap();
        assert_eq!(
            stemmed.terms("Everything sucks").unwrap(),
            vec!["everyth", "suck"]
        );
    }

    #[test]
    fn test_built_analyzer_reports_its_kind() {
        for kind in [
            AnalyzerKind::Standard,
            AnalyzerKind::StandardNoStop,
            AnalyzerKind::Stemmed,
        ] {
            assert_eq!(kind.build().unwrap().name(), kind.to_string());
        }
    }

    #[test]
    fn test_analyzer_kind_serde() {
        let kind: AnalyzerKind = serde_json::from_str("\"standard_no_stop\"").unwrap();
        assert_eq!(kind, AnalyzerKind::StandardNoStop);
        assert_eq!(kind.to_string(), "standard_no_stop");
    }
}
