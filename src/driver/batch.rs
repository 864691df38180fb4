use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::detector::currency_filter::CurrencyFilter;
use crate::rewriter::query_rewriter;

/// One output row of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    /// The source query as read from the input column.
    pub query_original: String,
    /// The rewritten query.
    pub query_nueva: String,
    /// Currency code for the rewritten query.
    pub moneda_detectada: u64,
    /// Rewrite path tag: `specific`, `unfiltered-MN`, or `unfiltered-ME`.
    pub tipo: String,
}

/// Serialization format for batch output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Flat CSV with a header row.
    Csv,
    /// Pretty-printed JSON array of records.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// Counters and findings from one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-blank source rows read from the input column.
    pub queries_read: usize,
    /// Output records produced (one or two per source row).
    pub queries_generated: usize,
    /// 1-based input rows whose query carried more than one currency filter.
    pub ambiguous_rows: Vec<usize>,
}

/// Read queries from `input`, rewrite them, and write records to `output`.
pub fn run(
    input: &Path,
    output: &Path,
    column: &str,
    format: OutputFormat,
) -> Result<BatchSummary, String> {
    let queries = read_query_column(input, column)?;
    let (records, summary) = process_queries(&queries);
    write_records(output, &records, format)?;
    Ok(summary)
}

/// Read the named column from a CSV file with headers, skipping blank cells.
pub fn read_query_column(path: &Path, column: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers from {}: {e}", path.display()))?;
    let index = headers.iter().position(|h| h == column).ok_or_else(|| {
        format!(
            "Column '{column}' not found in {} (available: {})",
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })?;

    let mut queries = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| format!("Failed to read row from {}: {e}", path.display()))?;
        let value = record.get(index).unwrap_or("").trim();
        if !value.is_empty() {
            queries.push(value.to_string());
        }
    }
    Ok(queries)
}

/// Rewrite every query, producing output records in input order.
pub fn process_queries(queries: &[String]) -> (Vec<BatchRecord>, BatchSummary) {
    let mut records = Vec::new();
    let mut summary = BatchSummary::default();

    for (row, query) in queries.iter().enumerate() {
        summary.queries_read += 1;
        let outcome = query_rewriter::rewrite(query);
        if outcome.filter().is_some_and(CurrencyFilter::is_ambiguous) {
            summary.ambiguous_rows.push(row + 1);
        }
        for rewritten in outcome.queries() {
            records.push(BatchRecord {
                query_original: query.clone(),
                query_nueva: rewritten.sql.clone(),
                moneda_detectada: rewritten.currency_code,
                tipo: rewritten.kind.to_string(),
            });
        }
    }

    summary.queries_generated = records.len();
    (records, summary)
}

/// Write records to `path` in the requested format.
pub fn write_records(
    path: &Path,
    records: &[BatchRecord],
    format: OutputFormat,
) -> Result<(), String> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            for record in records {
                writer
                    .serialize(record)
                    .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            }
            writer
                .flush()
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records)
                .map_err(|e| format!("Failed to serialize records: {e}"))?;
            std::fs::write(path, json)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        }
    }
    Ok(())
}
