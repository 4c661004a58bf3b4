//! Date qualifier prefixes.

use serde::Serialize;
use std::fmt;

/// Approximation marker in front of a date body.
///
/// English GEDCOM keywords and their German equivalents map onto the four
/// canonical GEDCOM qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateQualifier {
    /// `EST` (also `CA`)
    Estimated,
    /// `BEF` (also `VOR`)
    Before,
    /// `AFT` (also `AFTER`, `NACH`)
    After,
    /// `ABT` (also `ABOUT`, `UM`)
    About,
}

impl DateQualifier {
    /// Recognize a qualifier token, ignoring case and periods (`ca.`, `Abt.`).
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_uppercase().replace('.', "").as_str() {
            "CA" | "EST" => Some(Self::Estimated),
            "VOR" | "BEF" => Some(Self::Before),
            "NACH" | "AFT" | "AFTER" => Some(Self::After),
            "UM" | "ABT" | "ABOUT" => Some(Self::About),
            _ => None,
        }
    }

    /// Canonical three-letter GEDCOM keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estimated => "EST",
            Self::Before => "BEF",
            Self::After => "AFT",
            Self::About => "ABT",
        }
    }
}

impl fmt::Display for DateQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a date value into its qualifier and the remaining body.
///
/// The qualifier is the first space-separated token. When it is not a known
/// qualifier the whole value is the body.
///
/// ```
/// use gedcom_model::{DateQualifier, split_qualifier};
///
/// assert_eq!(split_qualifier("um 1850"), (Some(DateQualifier::About), "1850"));
/// assert_eq!(split_qualifier("12 MAR 1850"), (None, "12 MAR 1850"));
/// ```
pub fn split_qualifier(value: &str) -> (Option<DateQualifier>, &str) {
    let first = value.split(' ').next().unwrap_or_default();
    match DateQualifier::parse(first) {
        Some(qualifier) => {
            let body = value.split_once(' ').map_or("", |(_, rest)| rest.trim());
            (Some(qualifier), body)
        }
        None => (None, value),
    }
}
