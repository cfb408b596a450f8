//! English analyzer used by the supervised classifier.
//!
//! `\w+` tokens are lowercased, then optionally stripped of stop words and
//! suffix-stemmed:
//!
//! ```
//! use tailwiz::analysis::analyzer::Analyzer;
//! use tailwiz::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::stemmed().unwrap();
//! assert_eq!(analyzer.terms("The cats are LOVED").unwrap(), vec!["cat", "lov"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

#[derive(Debug)]
pub struct StandardAnalyzer {
    pipeline: PipelineAnalyzer,
    name: &'static str,
    stop_words: bool,
    stemming: bool,
}

impl StandardAnalyzer {
    /// Lowercased word tokens without English stop words.
    pub fn new() -> Result<Self> {
        Self::build(true, false)
    }

    /// Lowercased word tokens, stop words kept.
    pub fn without_stop_words() -> Result<Self> {
        Self::build(false, false)
    }

    /// Like [`StandardAnalyzer::new`], with suffix stemming.
    pub fn stemmed() -> Result<Self> {
        Self::build(true, true)
    }

    fn build(stop_words: bool, stemming: bool) -> Result<Self> {
        let mut pipeline = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()));
        if stop_words {
            pipeline = pipeline.add_filter(Arc::new(StopFilter::new()));
        }
        if stemming {
            pipeline = pipeline.add_filter(Arc::new(StemFilter::new()));
        }
        let name = match (stop_words, stemming) {
            (true, false) => "standard",
            (false, false) => "standard_no_stop",
            (true, true) => "stemmed",
            (false, true) => "stemmed_no_stop",
        };

        Ok(StandardAnalyzer {
            pipeline: pipeline.with_name(name),
            name,
            stop_words,
            stemming,
        })
    }

    /// Whether English stop words are removed.
    pub fn removes_stop_words(&self) -> bool {
        self.stop_words
    }

    /// Whether terms are suffix-stemmed.
    pub fn stems(&self) -> bool {
        self.stemming
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
