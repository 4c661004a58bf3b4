//! Multimedia object records.

use serde::Serialize;

/// A finalized multimedia object, written as a top-level `OBJE` record
/// before the trailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaObject {
    /// Sequential identifier, unique within one run.
    pub id: u32,
    /// Sanitized title used as the file name stem.
    pub file: String,
    /// Declared media format (`jpg`, `pdf`, ...).
    pub form: String,
    /// Media classification.
    pub media_type: String,
}

impl MediaObject {
    /// Cross-reference pointer, e.g. `@O3@`.
    pub fn xref(&self) -> String {
        object_xref(self.id)
    }

    /// File name written in the `FILE` line.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file, self.form)
    }
}

/// Cross-reference pointer for an object id.
pub fn object_xref(id: u32) -> String {
    format!("@O{id}@")
}
