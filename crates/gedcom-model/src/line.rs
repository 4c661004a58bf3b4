//! GEDCOM line tokenizing.
//!
//! A line is `<level> <tag> [<value...>]`. Lines are handled as raw bytes so
//! that anything the transformer does not rewrite can be written back
//! verbatim, whatever character set the file uses.

use crate::error::{GedcomError, Result};

/// Byte order mark that may prefix the first line of a UTF-8 file.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Deepest nesting level a line may declare.
pub const MAX_LEVEL: u32 = 99;

/// One tokenized GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    /// 1-based position of the line in the input.
    pub line_number: usize,
    /// Nesting level (first token).
    pub level: u32,
    /// Tag (second token), kept as written.
    pub tag: String,
    /// Remainder of the line, trimmed, with commas removed.
    pub value: String,
    /// The original line without its terminator.
    pub raw: Vec<u8>,
}

impl GedcomLine {
    /// Case-sensitive tag comparison; GEDCOM tags are upper-case.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Tokenize a raw line (terminator already stripped).
///
/// # Errors
///
/// Returns [`GedcomError::MalformedLine`] when the line has fewer than two
/// tokens or the first token is not an integer in `0..=MAX_LEVEL`.
pub fn parse_line(raw: &[u8], line_number: usize) -> Result<GedcomLine> {
    let malformed = || GedcomError::MalformedLine {
        line_number,
        content: String::from_utf8_lossy(raw).into_owned(),
    };

    let text = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let (level_token, rest) = split_token(text).ok_or_else(malformed)?;
    let (tag_token, rest) = split_token(rest).ok_or_else(malformed)?;

    let level = std::str::from_utf8(level_token)
        .ok()
        .and_then(|token| token.parse::<u32>().ok())
        .filter(|level| *level <= MAX_LEVEL)
        .ok_or_else(malformed)?;

    Ok(GedcomLine {
        line_number,
        level,
        tag: String::from_utf8_lossy(tag_token).into_owned(),
        value: clean_value(rest),
        raw: raw.to_vec(),
    })
}

/// Split off the first whitespace-delimited token.
fn split_token(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    let rest = &bytes[start..];
    let end = rest
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(rest.len());
    Some(rest.split_at(end))
}

fn clean_value(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().replace(',', "")
}
