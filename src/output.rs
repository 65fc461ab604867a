//! Output formatting and persistence for ingest stats and chart data.
//!
//! Supports pretty-printing, JSON files, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::IngestStats;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Serializes `value` as pretty JSON into `path`, replacing any existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write '{}'", path.display()))?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Appends one ingest run to a CSV log, one row per run.
///
/// The header row is only written when the log is new or empty.
pub fn append_record(path: &str, stats: &IngestStats) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open stats log '{path}'"))?;
    let needs_header = file.metadata()?.len() == 0;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer.serialize(stats)?;
    writer.flush()?;

    debug!(path, needs_header, rows_kept = stats.rows_kept, "Ingest stats appended");
    Ok(())
}
