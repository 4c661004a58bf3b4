//! Per-run results.

use serde::Serialize;

/// Outcome of normalizing one `DATE` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDiagnostic {
    pub line_number: usize,
    pub tag: String,
    /// Value before normalization.
    pub input: String,
    /// Value written to the output.
    pub output: String,
    /// The date could not be parsed and the original text was kept.
    pub failed: bool,
}

/// Counters and diagnostics collected over one transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub lines_read: usize,
    pub lines_written: usize,
    pub lines_suppressed: usize,
    pub dates_normalized: usize,
    pub dates_failed: usize,
    pub objects_created: usize,
    /// Whether a `TRLR` record was seen.
    pub trailer_seen: bool,
    /// Per-line date diagnostics (collected in verbose mode).
    pub diagnostics: Vec<DateDiagnostic>,
}

impl TransformReport {
    pub fn has_date_failures(&self) -> bool {
        self.dates_failed > 0
    }
}
