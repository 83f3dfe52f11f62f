//! Conversion command handler.
//!
//! Opens the report file, streams it through [`topterms_report::convert`],
//! and prints a human-readable summary. File open/create failures and any
//! pipeline error are fatal; malformed individual records are skipped and
//! counted inside the pipeline.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;

use topterms_core::{AppConfig, ReportMeta};
use topterms_report::{convert, ConvertOptions};

/// Convert one report file to NDJSON.
///
/// When `output` is `None` the output path is derived from the input path
/// (`.json` → `.bigquery.ndjson`).
///
/// # Errors
///
/// Returns an error if the input cannot be opened, the output cannot be
/// created, or the pipeline fails to read/write.
pub(crate) fn run_convert(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    meta: ReportMeta,
) -> anyhow::Result<()> {
    let derived;
    let output = match output {
        Some(path) => path,
        None => {
            derived = derive_output_path(input);
            derived.as_path()
        }
    };

    let input_file = File::open(input)
        .with_context(|| format!("failed to open report file {}", input.display()))?;
    let file_size = input_file
        .metadata()
        .with_context(|| format!("failed to stat report file {}", input.display()))?
        .len();

    #[allow(clippy::cast_precision_loss)]
    let size_gb = file_size as f64 / (1024.0 * 1024.0 * 1024.0);
    println!("Converting {} ({size_gb:.2} GB)", input.display());
    println!("Output: {}", output.display());

    let output_file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;

    let options = ConvertOptions {
        meta,
        ingested_at: Utc::now(),
        read_buffer_bytes: config.read_buffer_bytes,
        progress_interval: config.progress_interval,
    };
    let summary = convert(input_file, output_file, &options)?;

    tracing::info!(
        rows_written = summary.rows_written,
        records_parsed = summary.records_parsed,
        records_skipped = summary.records_skipped,
        bytes_read = summary.bytes_read,
        output = %output.display(),
        "conversion finished"
    );
    println!(
        "conversion complete: {} search terms written ({} entries parsed, {} skipped)",
        summary.rows_written, summary.records_parsed, summary.records_skipped
    );
    Ok(())
}

/// Derives the NDJSON output path from the report path.
///
/// A `.json` suffix is replaced with `.bigquery.ndjson`; any other name gets
/// the suffix appended.
fn derive_output_path(input: &Path) -> PathBuf {
    match input.file_name().and_then(|n| n.to_str()) {
        Some(name) => match name.strip_suffix(".json") {
            Some(stem) => input.with_file_name(format!("{stem}.bigquery.ndjson")),
            None => input.with_file_name(format!("{name}.bigquery.ndjson")),
        },
        None => input.with_extension("bigquery.ndjson"),
    }
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
