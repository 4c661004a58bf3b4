//! Machine-readable run reports.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gedcom_model::TransformReport;

/// Write `report` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_report_json(path: &Path, report: &TransformReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
