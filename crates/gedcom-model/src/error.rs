//! Error types for GEDCOM transformation runs.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort a transformation run.
///
/// Unparseable dates are not errors: they are reported through
/// [`crate::DateDiagnostic`] and the run continues.
#[derive(Debug, Error)]
pub enum GedcomError {
    /// Input file missing or not a regular file.
    #[error("no input file given or file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// A line that does not tokenize into an integer level and a tag.
    #[error(
        "cannot parse file, this application can process only GEDCOM files \
         (line {line_number}: {content:?})"
    )]
    MalformedLine { line_number: usize, content: String },

    /// Object records cannot be rooted at this level.
    #[error("object record level {level} is out of range (at most {max})")]
    ObjectLevelOutOfRange { level: u32, max: u32 },

    /// Failed to create the output file.
    #[error("failed to create output file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a partially written output file.
    #[error("failed to remove partial output file {path}: {source}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GedcomError {
    /// Returns true for errors caused by the input content rather than the environment.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedLine { .. })
    }
}

pub type Result<T> = std::result::Result<T, GedcomError>;
