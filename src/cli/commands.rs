//! Command implementations for the tailwiz CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::{Map, Value};

use crate::cli::args::*;
use crate::cli::output::{ClassifyReport, write_metrics, write_report};
use crate::config::ClassifyConfig;
use crate::error::TailwizError;
use crate::evaluation::cross_validate_with;
use crate::frame::Frame;
use crate::service::Tailwiz;

/// Execute a CLI command.
pub fn execute_command(args: TailwizArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args.clone(), &args),
    }
}

/// Classify an input table and write the results.
fn classify(args: ClassifyArgs, cli_args: &TailwizArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let prediction_column = config.prediction_column.clone();

    let texts = read_frame(&args.input)?;
    let training = match &args.training {
        Some(path) => Some(read_frame(path)?),
        None => None,
    };

    let started = Instant::now();
    let classification = Tailwiz::with_config(config)
        .run(&texts, training.as_ref(), args.metrics)
        .context("classification failed")?;

    let report = ClassifyReport {
        results: classification.results,
        metrics: classification.metrics,
        model: classification.model,
        duration_ms: started.elapsed().as_millis() as u64,
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(
                &report,
                cli_args.output_format,
                cli_args.pretty,
                &prediction_column,
                &mut writer,
            )?;
            writer.flush()?;
            info!("wrote {} rows to {}", report.results.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(
                &report,
                cli_args.output_format,
                cli_args.pretty,
                &prediction_column,
                &mut writer,
            )?;
        }
    }

    Ok(())
}

/// Cross-validate on a training table and print the metrics.
fn evaluate(args: EvaluateArgs, cli_args: &TailwizArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    evaluate_to(args, cli_args, &mut writer)
}

fn evaluate_to<W: Write>(
    args: EvaluateArgs,
    cli_args: &TailwizArgs,
    writer: &mut W,
) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(folds) = args.folds {
        config = config.with_cv_folds(folds);
    }
    config.validate()?;

    let training = read_frame(&args.training)?;
    let examples = training.labeled_texts(&config.text_column, &config.label_column)?;
    if examples.is_empty() {
        return Err(TailwizError::invalid_argument("training table has no rows").into());
    }

    let analyzer = config.analyzer.build()?;
    let metrics = cross_validate_with(&examples, &config, analyzer)?;

    write_metrics(&metrics, cli_args.output_format, cli_args.pretty, writer)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ClassifyConfig> {
    match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            ClassifyConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(ClassifyConfig::default()),
    }
}

/// Read a table from a file.
///
/// Files ending in `.jsonl` or `.ndjson` hold one JSON object per line. Any
/// other file must hold a JSON array of objects.
pub fn read_frame(path: &Path) -> Result<Frame> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_lines = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    let records = if is_lines {
        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: Map<String, Value> = serde_json::from_str(&line).with_context(|| {
                format!("invalid record at {}:{}", path.display(), line_num + 1)
            })?;
            records.push(record);
        }
        records
    } else {
        serde_json::from_reader::<_, Vec<Map<String, Value>>>(reader)
            .with_context(|| format!("expected a JSON array of objects in {}", path.display()))?
    };

    debug!("read {} rows from {}", records.len(), path.display());
    Ok(Frame::from_records(records))
}
