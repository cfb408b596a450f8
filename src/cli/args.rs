//! Command line argument parsing for the tailwiz CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// tailwiz - classify tables of text
#[derive(Parser, Debug, Clone)]
#[command(name = "tailwiz")]
#[command(about = "Classify tables of text, with or without labeled examples")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TailwizArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TailwizArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Label every row of an input table
    Classify(ClassifyArgs),

    /// Cross-validate on a training table and print metrics
    Evaluate(EvaluateArgs),
}

/// Arguments for classifying a table
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Table to classify (JSON array of objects, or JSONL)
    #[arg(short, long, value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Labeled training table (JSON or JSONL with text and label columns)
    #[arg(short, long, value_name = "TRAINING_FILE")]
    pub training: Option<PathBuf>,

    /// Also compute cross-validated metrics on the training table
    #[arg(short, long)]
    pub metrics: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for evaluating on a training table
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Labeled training table (JSON or JSONL with text and label columns)
    #[arg(short, long, value_name = "TRAINING_FILE")]
    pub training: PathBuf,

    /// Number of cross-validation folds (overrides the configuration)
    #[arg(short = 'k', long)]
    pub folds: Option<usize>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// A single JSON document
    Json,
    /// One JSON object per line
    Jsonl,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_classify_command() {
        let args = TailwizArgs::try_parse_from([
            "tailwiz",
            "classify",
            "--input",
            "input.jsonl",
            "--training",
            "train.json",
            "--metrics",
            "-o",
            "out.jsonl",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.input, PathBuf::from("input.jsonl"));
            assert_eq!(classify_args.training, Some(PathBuf::from("train.json")));
            assert!(classify_args.metrics);
            assert_eq!(classify_args.output, Some(PathBuf::from("out.jsonl")));
            assert!(classify_args.config.is_none());
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_evaluate_command() {
        let args =
            TailwizArgs::try_parse_from(["tailwiz", "evaluate", "-t", "train.json", "-k", "3"]).unwrap();

        if let Command::Evaluate(evaluate_args) = args.command {
            assert_eq!(evaluate_args.training, PathBuf::from("train.json"));
            assert_eq!(evaluate_args.folds, Some(3));
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = TailwizArgs::try_parse_from(["tailwiz", "classify", "-i", "in.json"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = TailwizArgs::try_parse_from(["tailwiz", "-vv", "classify", "-i", "in.json"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            TailwizArgs::try_parse_from(["tailwiz", "--quiet", "-vvv", "classify", "-i", "in.json"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            TailwizArgs::try_parse_from(["tailwiz", "--format", "jsonl", "classify", "-i", "in.json"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Jsonl);

        assert!(
            TailwizArgs::try_parse_from(["tailwiz", "--format", "yaml", "classify", "-i", "in.json"])
                .is_err()
        );
    }
}
