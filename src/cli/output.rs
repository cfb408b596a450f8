//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::evaluation::Metrics;
use crate::frame::Frame;

/// Results of a `classify` run as written by the CLI.
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub results: Frame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub model: String,
    pub duration_ms: u64,
}

/// Write a classification report in the requested format.
pub fn write_report<W: Write>(
    report: &ClassifyReport,
    format: OutputFormat,
    pretty: bool,
    prediction_column: &str,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_human(report, prediction_column, writer),
        OutputFormat::Json => write_json(report, pretty, writer),
        OutputFormat::Jsonl => write_jsonl(report, writer),
    }
}

/// Write metrics alone in the requested format.
pub fn write_metrics<W: Write>(
    metrics: &Metrics,
    format: OutputFormat,
    pretty: bool,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_metrics_human(metrics, writer),
        OutputFormat::Json | OutputFormat::Jsonl => {
            let mut wrapper = Map::new();
            wrapper.insert("metrics".to_string(), serde_json::to_value(metrics)?);
            write_json(&wrapper, pretty && format == OutputFormat::Json, writer)
        }
    }
}

fn write_json<T: Serialize, W: Write>(value: &T, pretty: bool, writer: &mut W) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    writeln!(writer, "{json}")?;
    Ok(())
}

fn write_jsonl<W: Write>(report: &ClassifyReport, writer: &mut W) -> Result<()> {
    for record in report.results.to_records() {
        writeln!(writer, "{}", Value::Object(record))?;
    }
    if let Some(metrics) = &report.metrics {
        let mut wrapper = Map::new();
        wrapper.insert("metrics".to_string(), serde_json::to_value(metrics)?);
        writeln!(writer, "{}", Value::Object(wrapper))?;
    }
    Ok(())
}

fn write_human<W: Write>(
    report: &ClassifyReport,
    prediction_column: &str,
    writer: &mut W,
) -> Result<()> {
    writeln!(
        writer,
        "Classified {} rows with the {} model ({} ms)",
        report.results.len(),
        report.model,
        report.duration_ms
    )?;
    writeln!(writer, "═══════════════")?;

    for (row, record) in report.results.to_records().into_iter().enumerate() {
        let label = record
            .get(prediction_column)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let text = record
            .iter()
            .filter(|(column, _)| column.as_str() != prediction_column)
            .map(|(column, value)| match value {
                Value::String(s) => format!("{column}={s}"),
                other => format!("{column}={other}"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "{:>4}  {:>6}  {}", row + 1, label, text)?;
    }

    if let Some(metrics) = &report.metrics {
        writeln!(writer)?;
        write_metrics_human(metrics, writer)?;
    }
    Ok(())
}

fn write_metrics_human<W: Write>(metrics: &Metrics, writer: &mut W) -> Result<()> {
    writeln!(writer, "Metrics:")?;
    writeln!(writer, "─────────────")?;
    for (name, scores) in metrics.iter() {
        let line = scores
            .iter()
            .map(|(label, score)| format!("{label}={score:.3}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{name:<10} {line}")?;
    }
    Ok(())
}
