//! End-to-end conversion: report JSON in, NDJSON rows out.
//!
//! One strictly sequential pull loop: byte chunks from the reader feed the
//! [`ArrayElementScanner`], each completed element is parsed into a
//! [`RawSearchTermEntry`], entries flow through the [`GroupAggregator`], and
//! every closed group is serialized as one output line. Memory use is
//! bounded by the largest single element, never by the input size.

use std::io::{BufWriter, ErrorKind, Read, Write};

use chrono::{DateTime, Utc};

use topterms_core::{ReportMeta, SearchTermRow, TermGroup};

use crate::aggregate::GroupAggregator;
use crate::error::ReportError;
use crate::extract::ArrayElementScanner;
use crate::types::RawSearchTermEntry;

/// Array field holding the search-term entries in a Top Search Terms report.
pub const SEARCH_TERM_ARRAY_FIELD: &str = "dataByDepartmentAndSearchTerm";

/// Per-run settings for [`convert`].
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Provenance stamped onto every output row.
    pub meta: ReportMeta,
    /// Ingestion timestamp stamped onto every output row. Injected by the
    /// caller so a conversion is reproducible byte-for-byte under test.
    pub ingested_at: DateTime<Utc>,
    /// Size of each read from the input, in bytes.
    pub read_buffer_bytes: usize,
    /// Log a progress event every this many rows.
    pub progress_interval: u64,
}

/// Counters reported after a completed conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertSummary {
    /// NDJSON rows written (one per closed group).
    pub rows_written: u64,
    /// Report entries successfully parsed.
    pub records_parsed: u64,
    /// Report entries dropped because they failed to parse.
    pub records_skipped: u64,
    /// Input bytes consumed.
    pub bytes_read: u64,
}

/// Converts one report stream into NDJSON rows on `writer`.
///
/// Reading stops as soon as the search-term array closes. A report in which
/// the array field never appears converts cleanly to zero rows. Entries that
/// fail to parse are logged, counted, and skipped; read, write, and
/// serialization failures abort the run.
///
/// # Errors
///
/// Returns [`ReportError`] when the input cannot be read or the output
/// cannot be written.
pub fn convert<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ReportError> {
    let mut writer = BufWriter::new(writer);
    let mut scanner = ArrayElementScanner::new(SEARCH_TERM_ARRAY_FIELD);
    let mut aggregator = GroupAggregator::new();
    let mut summary = ConvertSummary::default();
    let mut chunk = vec![0_u8; options.read_buffer_bytes.max(1)];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReportError::Read(e)),
        };
        summary.bytes_read += n as u64;

        for element in scanner.feed(&chunk[..n]) {
            match serde_json::from_slice::<RawSearchTermEntry>(&element) {
                Ok(entry) => {
                    summary.records_parsed += 1;
                    if let Some(group) = aggregator.push(entry) {
                        write_row(&mut writer, &group, options, &mut summary)?;
                    }
                }
                Err(error) => {
                    summary.records_skipped += 1;
                    tracing::warn!(
                        %error,
                        records_skipped = summary.records_skipped,
                        "skipping malformed report entry"
                    );
                }
            }
        }

        if scanner.is_closed() {
            break;
        }
    }

    if let Some(group) = aggregator.finish() {
        write_row(&mut writer, &group, options, &mut summary)?;
    }
    writer.flush().map_err(ReportError::Write)?;
    Ok(summary)
}

fn write_row<W: Write>(
    writer: &mut W,
    group: &TermGroup,
    options: &ConvertOptions,
    summary: &mut ConvertSummary,
) -> Result<(), ReportError> {
    let row = SearchTermRow::from_group(group, &options.meta, options.ingested_at);
    let line = serde_json::to_string(&row)?;
    writeln!(writer, "{line}").map_err(ReportError::Write)?;

    summary.rows_written += 1;
    if options.progress_interval > 0 && summary.rows_written % options.progress_interval == 0 {
        tracing::info!(rows_written = summary.rows_written, "conversion progress");
    }
    Ok(())
}
