//! Simple suffix-stripping stemmer.

use crate::analysis::token_filter::stem::Stemmer;

const DEFAULT_SUFFIXES: &[&str] = &[
    "ing", "ed", "er", "est", "ly", "s", "es", "ies", "ied", "tion", "sion", "able", "ible", "ment",
    "ness", "ful",
];

/// Stemmer that removes the longest matching common English suffix.
///
/// Words of three characters or fewer are left alone, and at least three
/// characters always remain after stripping.
#[derive(Debug, Clone)]
pub struct SimpleStemmer {
    /// Suffixes, longest first.
    suffixes: Vec<String>,
}

impl SimpleStemmer {
    /// Create a new simple stemmer.
    pub fn new() -> Self {
        Self::with_suffixes(DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect())
    }

    /// Create a simple stemmer with custom suffixes.
    pub fn with_suffixes(mut suffixes: Vec<String>) -> Self {
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
        SimpleStemmer { suffixes }
    }
}

impl Default for SimpleStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SimpleStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if word.chars().count() <= 3 {
            return word;
        }

        for suffix in &self.suffixes {
            if word.len() > suffix.len() + 2 && word.ends_with(suffix.as_str()) {
                let cut = word.len() - suffix.len();
                if word.is_char_boundary(cut) {
                    return word[..cut].to_string();
                }
            }
        }

        word
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_stemmer() {
        let stemmer = SimpleStemmer::new();

        assert_eq!(stemmer.stem("running"), "runn");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("beautiful"), "beauti");
        assert_eq!(stemmer.stem("agreement"), "agree");
        assert_eq!(stemmer.stem("happiness"), "happi");
    }

    #[test]
    fn test_short_words_untouched() {
        let stemmer = SimpleStemmer::new();
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("Bed"), "bed");
        assert_eq!(stemmer.stem("hate"), "hate");
    }
}
