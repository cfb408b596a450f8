//! Text analysis for tailwiz.
//!
//! Raw text is turned into normalized terms before any model sees it:
//! a tokenizer splits the text, then token filters lowercase, drop stop words
//! or stem the resulting tokens. Analyzers bundle a tokenizer with its filters.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
