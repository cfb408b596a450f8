//! # tailwiz
//!
//! Text classification for tables of text.
//!
//! ## Features
//!
//! - Supervised classification from labeled examples (binary or multi-class)
//! - Zero-shot sentiment labels when no examples are given
//! - Stratified cross-validation with per-label metrics
//! - Configurable text analysis pipeline
//!
//! ```
//! use tailwiz::{Frame, classify_with_metrics};
//!
//! let texts = Frame::from_texts(vec!["Not in a million years."]);
//! let training = Frame::from_labeled(vec![
//!     ("I am positive!", 0),
//!     ("No. Absolutely not.", 1),
//!     ("Hm, I am not sure.", 2),
//! ]);
//!
//! let (results, metrics) = classify_with_metrics(&texts, Some(&training)).unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(metrics.unwrap().contains("acc"));
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod frame;
pub mod service;

pub use error::{Result, TailwizError};
pub use evaluation::Metrics;
pub use frame::{Frame, Label, LabeledText, PREDICTION_COLUMN};
pub use service::{Classification, Tailwiz, classify, classify_with, classify_with_metrics};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
